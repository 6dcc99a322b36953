// =============================================================================
// Composite (Multi-Indicator Vote) Divergence Strategy
// =============================================================================
//
// Finds strict pivots on the close series, then asks eleven oscillators
// whether they confirm each new price extreme against the nearest earlier
// pivot of the same kind:
//
//   price higher-high pivot:  each indicator LOWER than at the prior pivot
//                             votes -1 (it failed to confirm the high)
//   price lower-low pivot:    each indicator HIGHER than at the prior pivot
//                             votes +1 (it failed to confirm the low)
//
// The panel, in vote order: RSI, MACD line, MACD histogram, Momentum, CCI,
// OBV, smoothed Stochastic, DIOSC, VWMACD spread, CMF, MFI. The score at a
// pivot is therefore in [-11, +11]; a pivot high scoring <= -min_divergence
// is a regular bearish (Top) signal, a pivot low scoring >= +min_divergence
// is a regular bullish (Bottom) signal.
//
// Indicator columns are compared at the pivot indices as-is, warm-up
// sentinels included; the strategy's minimum bar count keeps realistic
// inputs out of warm-up territory.

use tracing::{debug, warn};

use crate::candle::{self, Candle};
use crate::config::CompositeConfig;
use crate::divergence::DivergenceStrategy;
use crate::error::Result;
use crate::indicators::{
    cci, cmf, di_oscillator, ma, macd, mfi, momentum, obv, rsi, stochastic, vwmacd,
};
use crate::pivot_detector::{pivot_highs, pivot_lows};
use crate::types::{DetectionMethod, Signal, SignalKind};

/// Number of indicators on the voting panel.
pub const PANEL_SIZE: usize = 11;

/// Vote at pivot `i` against the prior same-kind pivot `p`, given the panel
/// columns. Only a price higher-high (at highs) or lower-low (at lows)
/// produces a non-zero score.
fn score_pivot(panel: &[Vec<f64>; PANEL_SIZE], close: &[f64], p: usize, i: usize, kind: SignalKind) -> i32 {
    let mut score = 0;
    match kind {
        SignalKind::Top => {
            if close[i] > close[p] {
                for column in panel {
                    if column[i] < column[p] {
                        score -= 1;
                    }
                }
            }
        }
        SignalKind::Bottom => {
            if close[i] < close[p] {
                for column in panel {
                    if column[i] > column[p] {
                        score += 1;
                    }
                }
            }
        }
    }
    score
}

/// The composite vote strategy. Holds only its configuration.
#[derive(Debug, Clone, Default)]
pub struct CompositeStrategy {
    config: CompositeConfig,
}

impl CompositeStrategy {
    pub fn new(config: CompositeConfig) -> Self {
        Self { config }
    }

    /// Collect the indices marked in a NaN-marked pivot series.
    fn pivot_indices(series: &[f64]) -> Vec<usize> {
        series
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .map(|(i, _)| i)
            .collect()
    }
}

impl DivergenceStrategy for CompositeStrategy {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::Composite
    }

    fn min_bars(&self) -> usize {
        let c = &self.config;
        // Enough bars for the RSI seed, the slowest window, and one full
        // pivot neighbourhood.
        (c.rsi_period + 1)
            .max(c.macd_slow + c.macd_signal)
            .max(c.vwmacd_slow)
            .max(c.cmf_period)
            .max(c.mfi_period + 1)
            .max(c.di_period + 1)
            .max(c.stoch_period + c.stoch_smooth)
            .max(2 * c.pivot_period + 1)
    }

    fn detect(&self, candles: &[Candle]) -> Result<Vec<Signal>> {
        let cfg = &self.config;
        if cfg.pivot_period == 0 {
            warn!("composite: pivot_period is 0, no pivots can form");
            return Ok(Vec::new());
        }
        if candles.len() < self.min_bars() {
            debug!(
                bars = candles.len(),
                min_bars = self.min_bars(),
                "composite: input below minimum, no signals"
            );
            return Ok(Vec::new());
        }

        let high = candle::highs(candles);
        let low = candle::lows(candles);
        let close = candle::closes(candles);
        let volume = candle::volumes(candles);

        let macd_out = macd(&close, cfg.macd_fast, cfg.macd_slow, cfg.macd_signal);
        let panel: [Vec<f64>; PANEL_SIZE] = [
            rsi(&close, cfg.rsi_period)?,
            macd_out.macd,
            macd_out.histogram,
            momentum(&close, cfg.momentum_period),
            cci(&high, &low, &close, cfg.cci_period),
            obv(&close, &volume),
            ma(&stochastic(&high, &low, &close, cfg.stoch_period), cfg.stoch_smooth),
            di_oscillator(&high, &low, &close, cfg.di_period),
            vwmacd(&close, &volume, cfg.vwmacd_fast, cfg.vwmacd_slow),
            cmf(&high, &low, &close, &volume, cfg.cmf_period),
            mfi(&high, &low, &close, &volume, cfg.mfi_period),
        ];

        let mut signals = Vec::new();
        for (pivots, kind) in [
            (pivot_highs(&close, cfg.pivot_period, cfg.pivot_period), SignalKind::Top),
            (pivot_lows(&close, cfg.pivot_period, cfg.pivot_period), SignalKind::Bottom),
        ] {
            let indices = Self::pivot_indices(&pivots);
            for pair in indices.windows(2) {
                let (p, i) = (pair[0], pair[1]);
                let score = score_pivot(&panel, &close, p, i, kind);
                let fires = match kind {
                    SignalKind::Top => score <= -cfg.min_divergence,
                    SignalKind::Bottom => score >= cfg.min_divergence,
                };
                if fires {
                    signals.push(Signal {
                        index: i,
                        time: candles[i].open_time,
                        kind,
                        price: close[i],
                        indicator_value: score as f64,
                        method: DetectionMethod::Composite,
                    });
                }
            }
        }
        signals.sort_by_key(|s| s.index);

        debug!(
            bars = candles.len(),
            signals = signals.len(),
            "composite pass complete"
        );
        Ok(signals)
    }
}
