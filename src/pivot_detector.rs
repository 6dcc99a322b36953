// =============================================================================
// Pivot Detector — Strict local extrema and the 5-sample fractal pattern
// =============================================================================
//
// A pivot high at index i means data[i] is strictly greater than every sample
// in the `left` bars before it and the `right` bars after it (pivot lows are
// symmetric). Strictness matters: a run of equal values never produces a
// pivot, because no sample in the run beats its neighbours.
//
// The fractal detector checks the fixed 5-sample pattern centred on one
// index: both outer-left samples and both outer-right samples on the same
// side of the centre.
//
// Pivot series are NaN-marked: non-pivot indices carry NaN, pivot indices
// carry the pivot value. Neither detector ever reads outside [0, len).

use crate::types::{PivotKind, PivotPoint};

/// Result of the 5-sample fractal check at one centre index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fractal {
    Top,
    Bottom,
    None,
}

/// NaN-marked pivot-high series: `out[i]` is `data[i]` when index `i` is a
/// strict local maximum over `[i-left, i+right]`, NaN otherwise.
///
/// Candidates are limited to `left <= i < len - right` so the full window
/// always exists.
pub fn pivot_highs(data: &[f64], left: usize, right: usize) -> Vec<f64> {
    pivot_series(data, left, right, |candidate, neighbour| candidate > neighbour)
}

/// NaN-marked pivot-low series, the strict-minimum mirror of [`pivot_highs`].
pub fn pivot_lows(data: &[f64], left: usize, right: usize) -> Vec<f64> {
    pivot_series(data, left, right, |candidate, neighbour| candidate < neighbour)
}

fn pivot_series(
    data: &[f64],
    left: usize,
    right: usize,
    beats: impl Fn(f64, f64) -> bool,
) -> Vec<f64> {
    let mut out = vec![f64::NAN; data.len()];
    if data.len() < left + right + 1 {
        return out;
    }

    for i in left..data.len() - right {
        let candidate = data[i];
        let window_wins = data[i - left..i]
            .iter()
            .chain(&data[i + 1..=i + right])
            .all(|&neighbour| beats(candidate, neighbour));
        if window_wins {
            out[i] = candidate;
        }
    }
    out
}

/// All pivots of both kinds, ascending by index.
pub fn pivot_points(data: &[f64], left: usize, right: usize) -> Vec<PivotPoint> {
    let highs = pivot_highs(data, left, right);
    let lows = pivot_lows(data, left, right);

    let mut out = Vec::new();
    for i in 0..data.len() {
        if !highs[i].is_nan() {
            out.push(PivotPoint {
                index: i,
                value: highs[i],
                kind: PivotKind::High,
            });
        }
        if !lows[i].is_nan() {
            out.push(PivotPoint {
                index: i,
                value: lows[i],
                kind: PivotKind::Low,
            });
        }
    }
    out
}

/// Check the fixed 5-sample fractal pattern over `[center-2 ..= center+2]`.
///
/// Top: both outer-left samples and both outer-right samples are strictly
/// below the centre. Bottom is symmetric with "above". Anything else — or a
/// window that would leave `[0, len)` — is `Fractal::None`.
pub fn fractal_at(data: &[f64], center: usize) -> Fractal {
    if center < 2 || center + 2 >= data.len() {
        return Fractal::None;
    }

    let c = data[center];
    let wings = [
        data[center - 2],
        data[center - 1],
        data[center + 1],
        data[center + 2],
    ];

    if wings.iter().all(|&w| w < c) {
        Fractal::Top
    } else if wings.iter().all(|&w| w > c) {
        Fractal::Bottom
    } else {
        Fractal::None
    }
}
