// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// MACD line = EMA(data, fast) - EMA(data, slow)
// Signal    = EMA(MACD line, signal_period)
// Histogram = MACD line - Signal
//
// Both EMAs seed at data[0], so all three series are defined from index 0 and
// stay aligned with the input. A volume-weighted variant (VWMACD) swaps the
// EMAs for VWMAs; the composite vote uses only its spread.
// =============================================================================

use crate::indicators::smoothing::ema;
use crate::indicators::volume::vwma;

/// The three aligned series produced by one MACD pass.
#[derive(Debug, Clone)]
pub struct MacdOutput {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Compute MACD line, signal line, and histogram in one pass.
pub fn macd(data: &[f64], fast: usize, slow: usize, signal: usize) -> MacdOutput {
    let fast_ema = ema(data, fast);
    let slow_ema = ema(data, slow);

    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema(&line, signal);
    let histogram: Vec<f64> = line
        .iter()
        .zip(&signal_line)
        .map(|(l, s)| l - s)
        .collect();

    MacdOutput {
        macd: line,
        signal: signal_line,
        histogram,
    }
}

/// Volume-weighted MACD spread: `vwma(close, fast) - vwma(close, slow)`.
///
/// Warm-up indices inherit the VWMA 0.0 sentinels: the spread is 0.0 before
/// the fast window fills and equals the fast VWMA alone until the slow
/// window fills.
pub fn vwmacd(close: &[f64], volume: &[f64], fast: usize, slow: usize) -> Vec<f64> {
    let fast_vwma = vwma(close, volume, fast);
    let slow_vwma = vwma(close, volume, slow);
    fast_vwma
        .iter()
        .zip(&slow_vwma)
        .map(|(f, s)| f - s)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macd_is_index_aligned() {
        let data: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin()).collect();
        let out = macd(&data, 12, 26, 9);
        assert_eq!(out.macd.len(), data.len());
        assert_eq!(out.signal.len(), data.len());
        assert_eq!(out.histogram.len(), data.len());
    }

    #[test]
    fn macd_constant_series_is_flat_zero() {
        let out = macd(&[250.0; 50], 12, 26, 9);
        for i in 0..50 {
            assert!(out.macd[i].abs() < 1e-9, "macd[{i}] = {}", out.macd[i]);
            assert!(out.signal[i].abs() < 1e-9, "signal[{i}] = {}", out.signal[i]);
            assert!(
                out.histogram[i].abs() < 1e-9,
                "histogram[{i}] = {}",
                out.histogram[i]
            );
        }
    }

    #[test]
    fn macd_uptrend_goes_positive() {
        // Fast EMA tracks a rising series more closely than the slow EMA.
        let data: Vec<f64> = (0..80).map(|i| 100.0 + i as f64).collect();
        let out = macd(&data, 5, 15, 9);
        let last = *out.macd.last().unwrap();
        assert!(last > 0.0, "expected positive MACD in uptrend, got {last}");
    }

    #[test]
    fn macd_histogram_is_line_minus_signal() {
        let data: Vec<f64> = (0..40).map(|i| (i as f64 * 0.5).cos() * 10.0).collect();
        let out = macd(&data, 12, 26, 9);
        for i in 0..data.len() {
            let expected = out.macd[i] - out.signal[i];
            assert!(
                (out.histogram[i] - expected).abs() < 1e-12,
                "histogram[{i}] inconsistent"
            );
        }
    }

    #[test]
    fn macd_empty_input() {
        let out = macd(&[], 12, 26, 9);
        assert!(out.macd.is_empty());
        assert!(out.signal.is_empty());
        assert!(out.histogram.is_empty());
    }

    #[test]
    fn vwmacd_warmup_is_zero_then_tracks_spread() {
        let close: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let volume = vec![10.0; 30];
        let out = vwmacd(&close, &volume, 3, 6);
        assert_eq!(out.len(), 30);
        // Before the fast window fills both VWMAs are 0.0.
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 0.0);
        // With constant volume VWMA reduces to MA; fast MA > slow MA uptrend.
        assert!(out[29] > 0.0, "expected positive spread, got {}", out[29]);
    }
}
