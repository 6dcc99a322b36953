// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes.
//
// Step 1 — Compute price changes (deltas) from consecutive samples.
// Step 2 — Seed average gain / average loss with the SMA of the first `period`
//          gains / losses.
// Step 3 — Apply Wilder's exponential smoothing:
//            avg_gain = (prev_avg_gain * (period - 1) + gain) / period
//            avg_loss = (prev_avg_loss * (period - 1) + loss) / period
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// When the average loss is exactly zero the division is skipped and RSI is
// pinned to 100 (this includes a perfectly flat series).
// =============================================================================

use crate::error::{EngineError, Result};

/// Compute the full index-aligned RSI series.
///
/// The first `period` indices hold the 0.0 warm-up sentinel; the first real
/// value lands at index `period`.
///
/// # Errors
/// - `InvalidParameter` when `period == 0`.
/// - `InsufficientData` when `data.len() < period + 1` (the seed averages
///   need `period` deltas).
pub fn rsi(data: &[f64], period: usize) -> Result<Vec<f64>> {
    if period == 0 {
        return Err(EngineError::InvalidParameter(
            "rsi period must be at least 1".into(),
        ));
    }
    if data.len() < period + 1 {
        return Err(EngineError::InsufficientData {
            required: period + 1,
            got: data.len(),
        });
    }

    let period_f = period as f64;

    // --- Seed averages with the first `period` deltas ------------------------
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for w in data.windows(2).take(period) {
        let delta = w[1] - w[0];
        if delta > 0.0 {
            avg_gain += delta;
        } else {
            avg_loss += -delta;
        }
    }
    avg_gain /= period_f;
    avg_loss /= period_f;

    let mut out = vec![0.0; period];
    out.push(rsi_value(avg_gain, avg_loss));

    // --- Wilder's smoothing for the remaining deltas --------------------------
    for w in data.windows(2).skip(period) {
        let delta = w[1] - w[0];
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { -delta } else { 0.0 };

        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;

        out.push(rsi_value(avg_gain, avg_loss));
    }

    Ok(out)
}

/// Convert average gain / average loss into an RSI value in [0, 100].
/// Zero average loss pins RSI to 100.
fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
