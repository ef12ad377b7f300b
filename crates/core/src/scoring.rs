//! Scoring module - line clear rewards and speed progression

use crate::types::{LINE_SCORE_BASE, SPEED_DIVISOR};

/// Score for clearing `lines` rows at once: `n * 100 * (n * 1.5)`.
///
/// The quadratic term rewards multi-line clears. Computed in integers as
/// `n * n * 150`, which is exact for every `n`.
///
/// ```
/// use blockfall_core::scoring::line_clear_score;
///
/// assert_eq!(line_clear_score(1), 150);
/// assert_eq!(line_clear_score(2), 600);
/// assert_eq!(line_clear_score(4), 2400);
/// ```
pub fn line_clear_score(lines: usize) -> u32 {
    let n = lines as u32;
    n * LINE_SCORE_BASE * n * 3 / 2
}

/// Amount the speed multiplier grows after a clear, given the session's
/// cleared-line total (including the lines just cleared). Unbounded.
pub fn speed_increase(total_lines: u32) -> f64 {
    total_lines as f64 / SPEED_DIVISOR
}

/// Gravity accumulator step for a speed multiplier
pub fn gravity_step(speed: f64) -> u32 {
    speed.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_score_table() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 150);
        assert_eq!(line_clear_score(2), 600);
        assert_eq!(line_clear_score(3), 1350);
        assert_eq!(line_clear_score(4), 2400);
    }

    #[test]
    fn test_speed_increase() {
        assert_eq!(speed_increase(0), 0.0);
        assert_eq!(speed_increase(250), 0.5);
        assert_eq!(speed_increase(1000), 2.0);
    }

    #[test]
    fn test_gravity_step_rounds() {
        assert_eq!(gravity_step(1.0), 1);
        assert_eq!(gravity_step(1.49), 1);
        assert_eq!(gravity_step(1.5), 2);
        assert_eq!(gravity_step(2.2), 2);
    }
}
