//! Heuristic value conventions.
//!
//! Heuristic values are plain `f64`. `+inf` is the absorbing value for
//! abstractly unsolvable states: it survives every sum and every maximum.

/// A heuristic estimate in `[0, +inf]`.
pub type HeuristicValue = f64;

/// Value reported for states proven unsolvable within an abstraction.
pub const INFINITE_HEURISTIC: HeuristicValue = f64::INFINITY;

/// Returns true if `value` is the absorbing infinite value.
#[inline]
pub fn is_infinite(value: HeuristicValue) -> bool {
    value == INFINITE_HEURISTIC
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infinite_absorbs_sums() {
        let sum = 3.0 + INFINITE_HEURISTIC + 1.0;
        assert!(is_infinite(sum));
        assert!(!is_infinite(f64::MAX));
    }

    #[test]
    fn test_infinite_wins_max() {
        assert!(is_infinite(INFINITE_HEURISTIC.max(42.0)));
    }
}
