// =============================================================================
// Trend Strength — True Range and Directional Indicators
// =============================================================================
//
// True Range (TR) per bar:
//   TR = max(H - L, |H - prevClose|, |L - prevClose|)     (index 0: H - L)
//
// Directional movement per bar (index 0: both zero):
//   up   = H_i - H_{i-1}            down = L_{i-1} - L_i
//   +DM  = up   when up > down && up > 0,   else 0
//   -DM  = down when down > up && down > 0, else 0
//
// Wilder-smoothed and normalised:
//   +DI   = 100 * RMA(+DM, period) / RMA(TR, period)
//   -DI   = 100 * RMA(-DM, period) / RMA(TR, period)
//   DIOSC = +DI - -DI
//
// Where the smoothed True Range is zero both DIs read 0.
// =============================================================================

use crate::indicators::smoothing::rma;

/// Bar-by-bar True Range. Index 0 has no previous close and falls back to
/// the plain high-low range.
pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    let n = high.len().min(low.len()).min(close.len());
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        if i == 0 {
            out.push(high[0] - low[0]);
            continue;
        }
        let hl = high[i] - low[i];
        let hc = (high[i] - close[i - 1]).abs();
        let lc = (low[i] - close[i - 1]).abs();
        out.push(hl.max(hc).max(lc));
    }
    out
}

/// The +DI / -DI pair from one directional-movement pass.
#[derive(Debug, Clone)]
pub struct DirectionalIndex {
    pub plus: Vec<f64>,
    pub minus: Vec<f64>,
}

/// Wilder directional indicators over OHLC columns.
///
/// # Edge cases
/// - RMA warm-up indices => 0.0 on both lines
/// - zero smoothed True Range => 0.0 on both lines
pub fn directional_index(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
) -> DirectionalIndex {
    let n = high.len().min(low.len()).min(close.len());

    let mut plus_dm = Vec::with_capacity(n);
    let mut minus_dm = Vec::with_capacity(n);
    for i in 0..n {
        if i == 0 {
            plus_dm.push(0.0);
            minus_dm.push(0.0);
            continue;
        }
        let up = high[i] - high[i - 1];
        let down = low[i - 1] - low[i];
        plus_dm.push(if up > down && up > 0.0 { up } else { 0.0 });
        minus_dm.push(if down > up && down > 0.0 { down } else { 0.0 });
    }

    let smoothed_tr = rma(&true_range(&high[..n], &low[..n], &close[..n]), period);
    let smoothed_plus = rma(&plus_dm, period);
    let smoothed_minus = rma(&minus_dm, period);

    let normalise = |dm: &[f64]| -> Vec<f64> {
        dm.iter()
            .zip(&smoothed_tr)
            .map(|(&d, &tr)| if tr == 0.0 { 0.0 } else { 100.0 * d / tr })
            .collect()
    };

    DirectionalIndex {
        plus: normalise(&smoothed_plus),
        minus: normalise(&smoothed_minus),
    }
}

/// Directional oscillator: `+DI - -DI`.
pub fn di_oscillator(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    let di = directional_index(high, low, close, period);
    di.plus.iter().zip(&di.minus).map(|(p, m)| p - m).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn true_range_index_zero_is_high_minus_low() {
        let tr = true_range(&[105.0], &[95.0], &[100.0]);
        assert_eq!(tr, vec![10.0]);
    }

    #[test]
    fn true_range_uses_prev_close_on_gaps() {
        // Gap up: |115 - 95| = 20 beats the bar range 115 - 108 = 7.
        let high = vec![105.0, 115.0];
        let low = vec![95.0, 108.0];
        let close = vec![95.0, 112.0];
        let tr = true_range(&high, &low, &close);
        assert!((tr[1] - 20.0).abs() < 1e-10, "got {}", tr[1]);
    }

    #[test]
    fn di_uptrend_is_plus_dominated() {
        // Higher highs and higher lows: -DM is always zero.
        let high: Vec<f64> = (0..40).map(|i| 102.0 + i as f64 * 2.0).collect();
        let low: Vec<f64> = (0..40).map(|i| 98.0 + i as f64 * 2.0).collect();
        let close: Vec<f64> = (0..40).map(|i| 100.0 + i as f64 * 2.0).collect();

        let di = directional_index(&high, &low, &close, 14);
        let osc = di_oscillator(&high, &low, &close, 14);
        let last = di.plus.len() - 1;
        assert!(di.plus[last] > 0.0, "expected +DI > 0, got {}", di.plus[last]);
        assert!(di.minus[last].abs() < 1e-10, "expected -DI = 0, got {}", di.minus[last]);
        assert!(osc[last] > 0.0, "expected positive DIOSC, got {}", osc[last]);
    }

    #[test]
    fn di_downtrend_is_minus_dominated() {
        let high: Vec<f64> = (0..40).map(|i| 102.0 - i as f64 * 2.0).collect();
        let low: Vec<f64> = (0..40).map(|i| 98.0 - i as f64 * 2.0).collect();
        let close: Vec<f64> = (0..40).map(|i| 100.0 - i as f64 * 2.0).collect();

        let osc = di_oscillator(&high, &low, &close, 14);
        let last = osc.len() - 1;
        assert!(osc[last] < 0.0, "expected negative DIOSC, got {}", osc[last]);
    }

    #[test]
    fn di_flat_market_reads_zero() {
        // Identical bars: no directional movement, TR stays positive.
        let high = vec![101.0; 40];
        let low = vec![99.0; 40];
        let close = vec![100.0; 40];
        let osc = di_oscillator(&high, &low, &close, 14);
        assert!(osc.iter().all(|&v| v.abs() < 1e-10));
    }

    #[test]
    fn di_warmup_is_sentinel() {
        let high: Vec<f64> = (0..40).map(|i| 102.0 + i as f64).collect();
        let low: Vec<f64> = (0..40).map(|i| 98.0 + i as f64).collect();
        let close: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let di = directional_index(&high, &low, &close, 14);
        for i in 0..13 {
            assert_eq!(di.plus[i], 0.0, "index {i}");
            assert_eq!(di.minus[i], 0.0, "index {i}");
        }
    }

    #[test]
    fn di_output_alignment() {
        let high = vec![10.0, 11.0, 12.0];
        let low = vec![9.0, 10.0, 11.0];
        let close = vec![9.5, 10.5, 11.5];
        let di = directional_index(&high, &low, &close, 14);
        assert_eq!(di.plus.len(), 3);
        assert_eq!(di.minus.len(), 3);
        assert_eq!(di_oscillator(&high, &low, &close, 14).len(), 3);
    }
}
