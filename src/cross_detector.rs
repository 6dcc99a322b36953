// =============================================================================
// Cross Detector — Directional crossing between two series
// =============================================================================
//
// A completed cross needs two consecutive samples of both lines: line `a` at
// or below line `b` on the prior bar, strictly above on the current bar. The
// tie-break is asymmetric on purpose — a line sitting exactly on another has
// not crossed yet, so `a_prev == b_prev` counts as "not yet crossed" and only
// a strict `a_now > b_now` completes the move.

/// True iff `a` crossed above `b` between the previous and current sample.
pub fn crossed_above(a_prev: f64, b_prev: f64, a_now: f64, b_now: f64) -> bool {
    a_prev <= b_prev && a_now > b_now
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_then_above_is_a_cross() {
        assert!(crossed_above(1.0, 2.0, 3.0, 2.0));
    }

    #[test]
    fn equality_before_counts_as_not_yet_crossed() {
        assert!(crossed_above(2.0, 2.0, 3.0, 2.0));
    }

    #[test]
    fn equality_after_is_not_a_completed_cross() {
        assert!(!crossed_above(1.0, 2.0, 2.0, 2.0));
    }

    #[test]
    fn already_above_never_crosses() {
        // a_prev > b_prev rules the cross out regardless of the current bar.
        assert!(!crossed_above(3.0, 2.0, 4.0, 2.0));
        assert!(!crossed_above(3.0, 2.0, 1.0, 2.0));
        assert!(!crossed_above(3.0, 2.0, 2.0, 2.0));
    }

    #[test]
    fn staying_below_never_crosses() {
        assert!(!crossed_above(1.0, 2.0, 1.5, 2.0));
    }

    #[test]
    fn truth_table_matches_the_definition() {
        let samples = [-1.0, 0.0, 0.5, 1.0, 2.0];
        for &a1 in &samples {
            for &b1 in &samples {
                for &a2 in &samples {
                    for &b2 in &samples {
                        assert_eq!(
                            crossed_above(a1, b1, a2, b2),
                            a1 <= b1 && a2 > b2,
                            "({a1},{b1}) -> ({a2},{b2})"
                        );
                    }
                }
            }
        }
    }
}
