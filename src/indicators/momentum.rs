// =============================================================================
// Momentum-Family Oscillators — Momentum, CCI, Stochastic %K
// =============================================================================
//
// Momentum_i = data_i - data_{i-period}
// CCI_i      = (tp_i - MA(tp)_i) / (0.015 * mean_dev_i)
//              tp = (high + low + close) / 3
//              mean_dev = mean(|tp_j - MA(tp)_i|) over the trailing window
// %K_i       = (close_i - LLV(low)_i) / (HHV(high)_i - LLV(low)_i) * 100
//
// OHLC slices must be index-aligned; output length follows the shortest
// input. Zero denominators fall back to 0.0, never inf/NaN.
// =============================================================================

use crate::indicators::extremes::{hhv, llv};
use crate::indicators::smoothing::ma;

/// Price change over `period` bars; 0.0 while `i < period`.
pub fn momentum(data: &[f64], period: usize) -> Vec<f64> {
    (0..data.len())
        .map(|i| if i >= period { data[i] - data[i - period] } else { 0.0 })
        .collect()
}

/// Commodity Channel Index over typical price.
///
/// # Edge cases
/// - indices `< period-1` => 0.0
/// - `period == 0` => all 0.0
/// - zero mean deviation (flat window) => 0.0
pub fn cci(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    let n = high.len().min(low.len()).min(close.len());
    if period == 0 {
        return vec![0.0; n];
    }

    let tp: Vec<f64> = (0..n)
        .map(|i| (high[i] + low[i] + close[i]) / 3.0)
        .collect();
    let sma = ma(&tp, period);

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        if i + 1 < period {
            out.push(0.0);
            continue;
        }
        let mean = sma[i];
        let mean_dev: f64 = tp[i + 1 - period..=i]
            .iter()
            .map(|x| (x - mean).abs())
            .sum::<f64>()
            / period as f64;
        if mean_dev == 0.0 {
            out.push(0.0);
        } else {
            out.push((tp[i] - mean) / (0.015 * mean_dev));
        }
    }
    out
}

/// Raw stochastic %K over a trailing window.
///
/// # Edge cases
/// - indices `< period-1` => 0.0
/// - `period == 0` => all 0.0
/// - zero high-low range over the window => 0.0
pub fn stochastic(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    let n = high.len().min(low.len()).min(close.len());
    if period == 0 {
        return vec![0.0; n];
    }

    let highest = hhv(&high[..n], period);
    let lowest = llv(&low[..n], period);

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        if i + 1 < period {
            out.push(0.0);
            continue;
        }
        let range = highest[i] - lowest[i];
        if range == 0.0 {
            out.push(0.0);
        } else {
            out.push((close[i] - lowest[i]) / range * 100.0);
        }
    }
    out
}
