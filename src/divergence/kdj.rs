// =============================================================================
// KDJ Dual-Line Divergence Strategy
// =============================================================================
//
// Oscillator chain (all windows configurable, classic constants in comments):
//
//   lowv  = EMA(LLV(low, 34), 3)        highv = EMA(HHV(high, 34), 3)
//   RSV_i = 50                          when highv_i == lowv_i
//         = (close_i - lowv_i) / (highv_i - lowv_i) * 100    otherwise
//   K = WSMA(EMA(RSV, 3), 8, 1)         D = WSMA(K, 6, 1)
//   J = 3K - 2D                         J1 = MA(J, 3)
//
// Classification runs from the window index onward. A "J crosses above J1"
// event at bar i is compared against the most recent prior crossing in the
// same direction at bar p (p >= window): bottom divergence when
// close[p] > close[i], J[i] > J[p], and J[i] < oversold. The opposite
// crossing direction flags a top divergence when close[p] < close[i],
// J1[p] > J1[i], and J[i] > overbought.
//
// The reference procedure rescans backward for p on every crossing; here two
// most-recent-crossing slots (one per direction) are updated in the forward
// pass instead. Both see exactly the crossings at indices >= window, so the
// outputs are identical (asserted against a naive rescan in the tests).

use tracing::debug;

use crate::candle::{self, Candle};
use crate::config::KdjConfig;
use crate::cross_detector::crossed_above;
use crate::divergence::DivergenceStrategy;
use crate::error::Result;
use crate::indicators::{ema, hhv, llv, ma, weighted_sma};
use crate::types::{DetectionMethod, Signal, SignalKind};

/// The four index-aligned KDJ lines.
#[derive(Debug, Clone)]
pub struct KdjLines {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
    pub j: Vec<f64>,
    pub j1: Vec<f64>,
}

/// Compute K, D, J, and J1 from OHLC columns.
pub fn kdj_lines(high: &[f64], low: &[f64], close: &[f64], cfg: &KdjConfig) -> KdjLines {
    let n = high.len().min(low.len()).min(close.len());

    let lowv = ema(&llv(&low[..n], cfg.window), cfg.smooth);
    let highv = ema(&hhv(&high[..n], cfg.window), cfg.smooth);

    let rsv: Vec<f64> = (0..n)
        .map(|i| {
            if highv[i] == lowv[i] {
                50.0
            } else {
                (close[i] - lowv[i]) / (highv[i] - lowv[i]) * 100.0
            }
        })
        .collect();

    let k = weighted_sma(&ema(&rsv, cfg.smooth), cfg.k_n, cfg.k_m);
    let d = weighted_sma(&k, cfg.d_n, cfg.d_m);
    let j: Vec<f64> = k.iter().zip(&d).map(|(kv, dv)| 3.0 * kv - 2.0 * dv).collect();
    let j1 = ma(&j, cfg.j1_period);

    KdjLines { k, d, j, j1 }
}

/// Classify crossings of the J/J1 pair against the most recent prior crossing
/// in the same direction. Returns `(bar index, kind)` pairs ascending by index.
fn classify_crossings(
    close: &[f64],
    j: &[f64],
    j1: &[f64],
    cfg: &KdjConfig,
) -> Vec<(usize, SignalKind)> {
    let n = close.len().min(j.len()).min(j1.len());
    let start = cfg.window.max(1);

    let mut out = Vec::new();
    let mut last_up: Option<usize> = None;
    let mut last_down: Option<usize> = None;

    for i in start..n {
        if crossed_above(j[i - 1], j1[i - 1], j[i], j1[i]) {
            if let Some(p) = last_up {
                if close[p] > close[i] && j[i] > j[p] && j[i] < cfg.oversold {
                    out.push((i, SignalKind::Bottom));
                }
            }
            last_up = Some(i);
        }

        if crossed_above(j1[i - 1], j[i - 1], j1[i], j[i]) {
            if let Some(p) = last_down {
                if close[p] < close[i] && j1[p] > j1[i] && j[i] > cfg.overbought {
                    out.push((i, SignalKind::Top));
                }
            }
            last_down = Some(i);
        }
    }
    out
}

/// The KDJ dual-line strategy. Holds only its configuration.
#[derive(Debug, Clone, Default)]
pub struct KdjStrategy {
    config: KdjConfig,
}

impl KdjStrategy {
    pub fn new(config: KdjConfig) -> Self {
        Self { config }
    }
}

impl DivergenceStrategy for KdjStrategy {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::Kdj
    }

    fn min_bars(&self) -> usize {
        // A signal needs two crossings at indices >= window.
        self.config.window + 2
    }

    fn detect(&self, candles: &[Candle]) -> Result<Vec<Signal>> {
        if candles.len() < self.min_bars() {
            debug!(
                bars = candles.len(),
                min_bars = self.min_bars(),
                "KDJ: input below minimum, no signals"
            );
            return Ok(Vec::new());
        }

        let high = candle::highs(candles);
        let low = candle::lows(candles);
        let close = candle::closes(candles);

        let lines = kdj_lines(&high, &low, &close, &self.config);
        let hits = classify_crossings(&close, &lines.j, &lines.j1, &self.config);

        let signals: Vec<Signal> = hits
            .into_iter()
            .map(|(i, kind)| Signal {
                index: i,
                time: candles[i].open_time,
                kind,
                price: close[i],
                indicator_value: lines.j[i],
                method: DetectionMethod::Kdj,
            })
            .collect();

        debug!(bars = candles.len(), signals = signals.len(), "KDJ pass complete");
        Ok(signals)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn flat_candles(n: usize, price: f64) -> Vec<Candle> {
        (0..n)
            .map(|i| Candle {
                open_time: i as i64 * 900_000,
                close_time: i as i64 * 900_000 + 899_999,
                open: price,
                high: price,
                low: price,
                close: price,
                volume: 10.0,
            })
            .collect()
    }

    /// The reference backward-rescan classifier the crossing cache replaces.
    fn classify_naive(
        close: &[f64],
        j: &[f64],
        j1: &[f64],
        cfg: &KdjConfig,
    ) -> Vec<(usize, SignalKind)> {
        let n = close.len().min(j.len()).min(j1.len());
        let start = cfg.window.max(1);
        let mut out = Vec::new();

        for i in start..n {
            if crossed_above(j[i - 1], j1[i - 1], j[i], j1[i]) {
                let mut p = None;
                for k in (start..i).rev() {
                    if crossed_above(j[k - 1], j1[k - 1], j[k], j1[k]) {
                        p = Some(k);
                        break;
                    }
                }
                if let Some(p) = p {
                    if close[p] > close[i] && j[i] > j[p] && j[i] < cfg.oversold {
                        out.push((i, SignalKind::Bottom));
                    }
                }
            }
            if crossed_above(j1[i - 1], j[i - 1], j1[i], j[i]) {
                let mut p = None;
                for k in (start..i).rev() {
                    if crossed_above(j1[k - 1], j[k - 1], j1[k], j[k]) {
                        p = Some(k);
                        break;
                    }
                }
                if let Some(p) = p {
                    if close[p] < close[i] && j1[p] > j1[i] && j[i] > cfg.overbought {
                        out.push((i, SignalKind::Top));
                    }
                }
            }
        }
        out
    }

    #[test]
    fn constant_series_rsv_is_50_and_lines_converge() {
        let cfg = KdjConfig::default();
        let candles = flat_candles(80, 250.0);
        let high = candle::highs(&candles);
        let low = candle::lows(&candles);
        let close = candle::closes(&candles);

        let lines = kdj_lines(&high, &low, &close, &cfg);
        // highv == lowv everywhere => RSV = 50, so K = D = 50 and J = 50.
        for i in 0..80 {
            assert!((lines.k[i] - 50.0).abs() < 1e-9, "K[{i}] = {}", lines.k[i]);
            assert!((lines.d[i] - 50.0).abs() < 1e-9, "D[{i}] = {}", lines.d[i]);
            assert!((lines.j[i] - 50.0).abs() < 1e-9, "J[{i}] = {}", lines.j[i]);
        }
        // J1 is a plain MA of J, so it converges to the same constant.
        for i in 2..80 {
            assert!((lines.j1[i] - 50.0).abs() < 1e-9, "J1[{i}] = {}", lines.j1[i]);
        }
    }

    #[test]
    fn constant_series_fires_nothing() {
        let strategy = KdjStrategy::default();
        let signals = strategy.detect(&flat_candles(80, 250.0)).unwrap();
        assert!(signals.is_empty(), "got {signals:?}");
    }

    #[test]
    fn short_input_is_empty_not_an_error() {
        let strategy = KdjStrategy::default();
        assert!(strategy.detect(&flat_candles(10, 100.0)).unwrap().is_empty());
        assert!(strategy.detect(&[]).unwrap().is_empty());
    }

    #[test]
    fn bottom_divergence_on_crafted_lines() {
        // J1 flat at 10; J pokes above it at bars 35 and 37. The second
        // crossing has a lower close, a higher J, and J < 20.
        let cfg = KdjConfig::default();
        let n = 40;
        let mut j = vec![5.0; n];
        let j1 = vec![10.0; n];
        let mut close = vec![95.0; n];

        j[35] = 12.0; // first up-crossing, recorded only
        j[37] = 15.0; // second up-crossing, diverges
        close[35] = 100.0;
        close[37] = 90.0;

        let hits = classify_crossings(&close, &j, &j1, &cfg);
        assert_eq!(hits, vec![(37, SignalKind::Bottom)]);
    }

    #[test]
    fn bottom_divergence_respects_every_condition() {
        let cfg = KdjConfig::default();
        let n = 40;
        let j1 = vec![10.0; n];

        // Same shape, but the close rises between crossings: no divergence.
        let mut j = vec![5.0; n];
        j[35] = 12.0;
        j[37] = 15.0;
        let mut close = vec![95.0; n];
        close[35] = 90.0;
        close[37] = 100.0;
        assert!(classify_crossings(&close, &j, &j1, &cfg).is_empty());

        // Lower close but J fails to make a higher value: no divergence.
        let mut j = vec![5.0; n];
        j[35] = 15.0;
        j[37] = 12.0;
        let mut close = vec![95.0; n];
        close[35] = 100.0;
        close[37] = 90.0;
        assert!(classify_crossings(&close, &j, &j1, &cfg).is_empty());

        // Everything lines up but J is not oversold: no divergence.
        let mut j = vec![5.0; n];
        let j1_high = vec![30.0; n];
        j[35] = 32.0;
        j[37] = 35.0;
        let mut close = vec![95.0; n];
        close[35] = 100.0;
        close[37] = 90.0;
        assert!(classify_crossings(&close, &j, &j1_high, &cfg).is_empty());
    }

    #[test]
    fn top_divergence_on_crafted_lines() {
        // J flat near 95; J1 pokes above it at bars 35 and 37. The second
        // crossing has a higher close, a lower J1, and J > 90.
        let cfg = KdjConfig::default();
        let n = 40;
        let mut j = vec![95.0; n];
        let mut j1 = vec![90.0; n];
        let mut close = vec![95.0; n];

        j1[35] = 96.0; // first down-crossing, recorded only
        j[37] = 93.0;
        j1[37] = 94.0; // second down-crossing, diverges
        close[35] = 90.0;
        close[37] = 100.0;

        let hits = classify_crossings(&close, &j, &j1, &cfg);
        assert_eq!(hits, vec![(37, SignalKind::Top)]);
    }

    #[test]
    fn crossings_before_the_window_are_invisible() {
        // The same divergent shape placed at bars 20/22 fires nothing,
        // because classification starts at the window index.
        let cfg = KdjConfig::default();
        let n = 40;
        let mut j = vec![5.0; n];
        let j1 = vec![10.0; n];
        let mut close = vec![95.0; n];
        j[20] = 12.0;
        j[22] = 15.0;
        close[20] = 100.0;
        close[22] = 90.0;

        assert!(classify_crossings(&close, &j, &j1, &cfg).is_empty());
    }

    #[test]
    fn cache_agrees_with_naive_rescan() {
        // Deterministic pseudo-random walks with plenty of crossings.
        let cfg = KdjConfig::default();
        for seed in 0..8u64 {
            let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let mut next = || {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                (state >> 33) as f64 / (1u64 << 31) as f64 // in [0, 1)
            };

            let n = 120;
            let j: Vec<f64> = (0..n).map(|_| next() * 120.0 - 10.0).collect();
            let j1: Vec<f64> = (0..n).map(|_| next() * 120.0 - 10.0).collect();
            let close: Vec<f64> = (0..n).map(|_| 100.0 + next() * 20.0).collect();

            assert_eq!(
                classify_crossings(&close, &j, &j1, &cfg),
                classify_naive(&close, &j, &j1, &cfg),
                "seed {seed}"
            );
        }
    }

    /// Two-legged decline: a sharp capitulation into bar 42 bounces at 43,
    /// then a slower grind to a lower low bounces at 58. Each bounce produces
    /// a J-over-J1 up-crossing; the second sits at a lower close (85 vs 61)
    /// with a shallower J trough, which is a bottom divergence at bar 58.
    fn two_legged_decline() -> Vec<Candle> {
        let mut close: Vec<f64> = Vec::with_capacity(75);
        for i in 0..75usize {
            let prev = close.last().copied().unwrap_or(0.0);
            let c = if i < 38 {
                200.0 - 2.0 * i as f64
            } else if i < 43 {
                prev - 9.0
            } else if i < 46 {
                prev + 4.0
            } else if i < 58 {
                prev - 3.0
            } else if i < 61 {
                prev + 4.0
            } else {
                prev - 1.0
            };
            close.push(c);
        }

        close
            .into_iter()
            .enumerate()
            .map(|(i, c)| Candle {
                open_time: i as i64 * 900_000,
                close_time: i as i64 * 900_000 + 899_999,
                open: c,
                high: c + 1.0,
                low: c - 1.0,
                close: c,
                volume: 50.0,
            })
            .collect()
    }

    #[test]
    fn bottom_divergence_fires_from_candles() {
        let strategy = KdjStrategy::default();
        let candles = two_legged_decline();

        let signals = strategy.detect(&candles).unwrap();
        assert_eq!(signals.len(), 1, "got {signals:?}");

        let s = &signals[0];
        assert_eq!(s.index, 58);
        assert_eq!(s.kind, SignalKind::Bottom);
        assert_eq!(s.method, DetectionMethod::Kdj);
        assert_eq!(s.time, candles[58].open_time);
        assert_eq!(s.price, candles[58].close);
        assert!(s.indicator_value < 20.0, "J = {}", s.indicator_value);

        // Idempotence: a second run over the same array is bit-identical.
        assert_eq!(strategy.detect(&candles).unwrap(), signals);
    }
}
