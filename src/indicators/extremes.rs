// =============================================================================
// Rolling Extremes — HHV / LLV
// =============================================================================
//
// Highest-high and lowest-low over a trailing window. Near the start of the
// series the window is clamped at index 0 and shrinks, so every index has a
// value drawn from real samples.

/// Highest value over the trailing `period` window (clamped at the start).
///
/// # Edge cases
/// - `period == 0` => all 0.0
pub fn hhv(data: &[f64], period: usize) -> Vec<f64> {
    rolling_extreme(data, period, |best, x| x > best)
}

/// Lowest value over the trailing `period` window (clamped at the start).
///
/// # Edge cases
/// - `period == 0` => all 0.0
pub fn llv(data: &[f64], period: usize) -> Vec<f64> {
    rolling_extreme(data, period, |best, x| x < best)
}

fn rolling_extreme(data: &[f64], period: usize, better: impl Fn(f64, f64) -> bool) -> Vec<f64> {
    if period == 0 {
        return vec![0.0; data.len()];
    }

    let mut out = Vec::with_capacity(data.len());
    for i in 0..data.len() {
        let start = i.saturating_sub(period - 1);
        let mut best = data[start];
        for &x in &data[start + 1..=i] {
            if better(best, x) {
                best = x;
            }
        }
        out.push(best);
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_shrinks_at_series_start() {
        let data = vec![5.0, 3.0, 8.0, 1.0, 6.0];
        let highs = hhv(&data, 3);
        // Windows: [5], [5,3], [5,3,8], [3,8,1], [8,1,6]
        assert_eq!(highs, vec![5.0, 5.0, 8.0, 8.0, 8.0]);

        let lows = llv(&data, 3);
        assert_eq!(lows, vec![5.0, 3.0, 3.0, 1.0, 1.0]);
    }

    #[test]
    fn full_window_tracks_extremes() {
        let data = vec![1.0, 9.0, 2.0, 8.0, 3.0, 7.0];
        let highs = hhv(&data, 2);
        assert_eq!(highs, vec![1.0, 9.0, 9.0, 8.0, 8.0, 7.0]);
        let lows = llv(&data, 2);
        assert_eq!(lows, vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
    }

    #[test]
    fn period_one_copies_input() {
        let data = vec![4.0, 2.0, 9.0];
        assert_eq!(hhv(&data, 1), data);
        assert_eq!(llv(&data, 1), data);
    }

    #[test]
    fn period_zero_is_guarded() {
        assert_eq!(hhv(&[1.0, 2.0], 0), vec![0.0, 0.0]);
        assert_eq!(llv(&[1.0, 2.0], 0), vec![0.0, 0.0]);
    }

    #[test]
    fn empty_input() {
        assert!(hhv(&[], 14).is_empty());
        assert!(llv(&[], 14).is_empty());
    }
}
