// =============================================================================
// MACD-Fractal Divergence Strategy
// =============================================================================
//
// Runs a fast MACD (5/15 by default) and the 5-sample fractal detector over
// its line. Every fractal centre records the price extreme and MACD value at
// that centre; the next fractal of the same kind is compared against the
// recording:
//
//   top fractal:    bearish when the new high exceeds the recorded high while
//                   the new MACD sits below the recorded MACD
//   bottom fractal: bullish when the new low undercuts the recorded low while
//                   the new MACD sits above the recorded MACD
//
// Signals fire at the fractal centre, which is the bar the pattern actually
// identifies (two bars behind the latest sample needed to confirm it).

use tracing::debug;

use crate::candle::{self, Candle};
use crate::config::MacdFractalConfig;
use crate::divergence::DivergenceStrategy;
use crate::error::Result;
use crate::indicators::macd;
use crate::pivot_detector::{fractal_at, Fractal};
use crate::types::{DetectionMethod, Signal, SignalKind};

/// Compare each fractal on `line` against the previous fractal of the same
/// kind. `times[c]` stamps the emitted signal.
fn fractal_divergences(
    line: &[f64],
    high: &[f64],
    low: &[f64],
    times: &[i64],
) -> Vec<Signal> {
    let n = line.len().min(high.len()).min(low.len()).min(times.len());

    let mut signals = Vec::new();
    let mut last_top: Option<(f64, f64)> = None; // (high, macd) at the centre
    let mut last_bottom: Option<(f64, f64)> = None; // (low, macd) at the centre

    for c in 2..n.saturating_sub(2) {
        match fractal_at(&line[..n], c) {
            Fractal::Top => {
                if let Some((prev_high, prev_macd)) = last_top {
                    if high[c] > prev_high && line[c] < prev_macd {
                        signals.push(Signal {
                            index: c,
                            time: times[c],
                            kind: SignalKind::Top,
                            price: high[c],
                            indicator_value: line[c],
                            method: DetectionMethod::MacdFractal,
                        });
                    }
                }
                last_top = Some((high[c], line[c]));
            }
            Fractal::Bottom => {
                if let Some((prev_low, prev_macd)) = last_bottom {
                    if low[c] < prev_low && line[c] > prev_macd {
                        signals.push(Signal {
                            index: c,
                            time: times[c],
                            kind: SignalKind::Bottom,
                            price: low[c],
                            indicator_value: line[c],
                            method: DetectionMethod::MacdFractal,
                        });
                    }
                }
                last_bottom = Some((low[c], line[c]));
            }
            Fractal::None => {}
        }
    }
    signals
}

/// The MACD-fractal strategy. Holds only its configuration.
#[derive(Debug, Clone, Default)]
pub struct MacdFractalStrategy {
    config: MacdFractalConfig,
}

impl MacdFractalStrategy {
    pub fn new(config: MacdFractalConfig) -> Self {
        Self { config }
    }
}

impl DivergenceStrategy for MacdFractalStrategy {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::MacdFractal
    }

    fn min_bars(&self) -> usize {
        // One full fractal window.
        5
    }

    fn detect(&self, candles: &[Candle]) -> Result<Vec<Signal>> {
        if candles.len() < self.min_bars() {
            debug!(
                bars = candles.len(),
                min_bars = self.min_bars(),
                "MACD-fractal: input below minimum, no signals"
            );
            return Ok(Vec::new());
        }

        let cfg = &self.config;
        let close = candle::closes(candles);
        let line = macd(&close, cfg.fast, cfg.slow, cfg.signal).macd;

        let signals = fractal_divergences(
            &line,
            &candle::highs(candles),
            &candle::lows(candles),
            &candle::open_times(candles),
        );

        debug!(
            bars = candles.len(),
            signals = signals.len(),
            "MACD-fractal pass complete"
        );
        Ok(signals)
    }
}
