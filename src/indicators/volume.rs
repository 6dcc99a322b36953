// =============================================================================
// Volume-Weighted Indicators — OBV, VWMA, CMF, MFI
// =============================================================================
//
// OBV_i  = OBV_{i-1} + volume_i * sign(close_i - close_{i-1}),  OBV_0 = 0
// VWMA_i = sum(close * volume) / sum(volume) over the trailing window
// CMF_i  = MA(mfv, period)_i / MA(volume, period)_i
//          mfv = ((c - l) - (h - c)) / (h - l) * volume    (0 when h == l)
// MFI_i  = 100 - 100 / (1 + pos_flow / neg_flow)
//          money flow = typical price * volume, split by typical-price
//          direction; a tie counts as negative flow
//
// Zero denominators (empty volume window, zero negative flow) fall back to
// the documented constants instead of dividing.
// =============================================================================

use crate::indicators::smoothing::ma;

/// On-balance volume: cumulative volume signed by close-to-close direction.
/// Seeded at 0.0; an unchanged close leaves the sum untouched.
pub fn obv(close: &[f64], volume: &[f64]) -> Vec<f64> {
    let n = close.len().min(volume.len());
    if n == 0 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(n);
    out.push(0.0);
    let mut acc = 0.0;
    for i in 1..n {
        if close[i] > close[i - 1] {
            acc += volume[i];
        } else if close[i] < close[i - 1] {
            acc -= volume[i];
        }
        out.push(acc);
    }
    out
}

/// Volume-weighted moving average.
///
/// # Edge cases
/// - indices `< period-1` => 0.0
/// - `period == 0` => all 0.0
/// - zero window volume => 0.0
pub fn vwma(close: &[f64], volume: &[f64], period: usize) -> Vec<f64> {
    let n = close.len().min(volume.len());
    if period == 0 {
        return vec![0.0; n];
    }

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        if i + 1 < period {
            out.push(0.0);
            continue;
        }
        let mut weighted = 0.0;
        let mut vol_sum = 0.0;
        for j in i + 1 - period..=i {
            weighted += close[j] * volume[j];
            vol_sum += volume[j];
        }
        if vol_sum == 0.0 {
            out.push(0.0);
        } else {
            out.push(weighted / vol_sum);
        }
    }
    out
}

/// Chaikin Money Flow in [-1, 1].
///
/// # Edge cases
/// - indices `< period-1` => 0.0 (warm-up of both MAs)
/// - `period == 0` => all 0.0
/// - `high == low` on a bar => that bar contributes 0 money flow
/// - zero volume MA over the window => 0.0
pub fn cmf(high: &[f64], low: &[f64], close: &[f64], volume: &[f64], period: usize) -> Vec<f64> {
    let n = high
        .len()
        .min(low.len())
        .min(close.len())
        .min(volume.len());
    if period == 0 {
        return vec![0.0; n];
    }

    let mfv: Vec<f64> = (0..n)
        .map(|i| {
            let range = high[i] - low[i];
            if range == 0.0 {
                0.0
            } else {
                ((close[i] - low[i]) - (high[i] - close[i])) / range * volume[i]
            }
        })
        .collect();

    let mfv_ma = ma(&mfv, period);
    let vol_ma = ma(&volume[..n], period);

    (0..n)
        .map(|i| {
            if vol_ma[i] == 0.0 {
                0.0
            } else {
                mfv_ma[i] / vol_ma[i]
            }
        })
        .collect()
}

/// Money Flow Index over typical-price money flow.
///
/// # Edge cases
/// - indices `< period` => 0.0 (each window sample needs a predecessor)
/// - `period == 0` => all 0.0
/// - zero negative flow => 100.0
pub fn mfi(high: &[f64], low: &[f64], close: &[f64], volume: &[f64], period: usize) -> Vec<f64> {
    let n = high
        .len()
        .min(low.len())
        .min(close.len())
        .min(volume.len());
    if period == 0 {
        return vec![0.0; n];
    }

    let tp: Vec<f64> = (0..n)
        .map(|i| (high[i] + low[i] + close[i]) / 3.0)
        .collect();

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        if i < period {
            out.push(0.0);
            continue;
        }
        let mut pos = 0.0;
        let mut neg = 0.0;
        for j in i + 1 - period..=i {
            let flow = tp[j] * volume[j];
            if tp[j] > tp[j - 1] {
                pos += flow;
            } else {
                neg += flow;
            }
        }
        if neg == 0.0 {
            out.push(100.0);
        } else {
            out.push(100.0 - 100.0 / (1.0 + pos / neg));
        }
    }
    out
}
