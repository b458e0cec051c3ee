//! Final score formula
//!
//! A treated patient is worth 1 point, a caught milestone 2.

use crate::error::ScoreError;
use crate::sim::Scoreboard;

pub const POINTS_PER_PATIENT: u64 = 1;
pub const POINTS_PER_MILESTONE: u64 = 2;

/// Largest count accepted by [`compute_score`] (`Number.MAX_SAFE_INTEGER`)
pub const MAX_COUNT: f64 = 9_007_199_254_740_991.0;

/// Score for already-validated counters
#[inline]
pub fn final_score(board: &Scoreboard) -> u64 {
    board.treated as u64 * POINTS_PER_PATIENT + board.milestones as u64 * POINTS_PER_MILESTONE
}

/// Score from untyped numeric counts (as handed over from JavaScript)
///
/// Rejects NaN/infinite, negative, fractional and unsafely large values for
/// either argument.
pub fn compute_score(treated: f64, milestones: f64) -> Result<u64, ScoreError> {
    let treated = validate_count("treated", treated)?;
    let milestones = validate_count("milestones", milestones)?;
    // Both counts are at most 2^53 - 1, so the sum stays far below u64::MAX
    Ok(treated * POINTS_PER_PATIENT + milestones * POINTS_PER_MILESTONE)
}

/// `computeScore(treated, milestones)` for JavaScript callers
///
/// Anything that is not a JS number is rejected as non-numeric.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(js_name = computeScore)]
pub fn compute_score_js(
    treated: wasm_bindgen::JsValue,
    milestones: wasm_bindgen::JsValue,
) -> Result<f64, wasm_bindgen::JsError> {
    let treated = treated
        .as_f64()
        .ok_or(ScoreError::NotANumber { arg: "treated" })?;
    let milestones = milestones
        .as_f64()
        .ok_or(ScoreError::NotANumber { arg: "milestones" })?;
    Ok(compute_score(treated, milestones)? as f64)
}

fn validate_count(arg: &'static str, value: f64) -> Result<u64, ScoreError> {
    if !value.is_finite() {
        return Err(ScoreError::NotANumber { arg });
    }
    if value < 0.0 {
        return Err(ScoreError::Negative { arg, value });
    }
    if value.fract() != 0.0 {
        return Err(ScoreError::Fractional { arg, value });
    }
    if value > MAX_COUNT {
        return Err(ScoreError::TooLarge { arg, value });
    }
    Ok(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_formula_examples() {
        assert_eq!(compute_score(0.0, 0.0), Ok(0));
        assert_eq!(compute_score(5.0, 0.0), Ok(5));
        assert_eq!(compute_score(0.0, 3.0), Ok(6));
        assert_eq!(compute_score(4.0, 2.0), Ok(8));
    }

    #[test]
    fn test_score_rejects_negative() {
        assert_eq!(
            compute_score(-1.0, 0.0),
            Err(ScoreError::Negative {
                arg: "treated",
                value: -1.0,
            })
        );
        assert_eq!(
            compute_score(0.0, -2.0),
            Err(ScoreError::Negative {
                arg: "milestones",
                value: -2.0,
            })
        );
    }

    #[test]
    fn test_score_rejects_non_numeric() {
        assert_eq!(
            compute_score(f64::NAN, 1.0),
            Err(ScoreError::NotANumber { arg: "treated" })
        );
        assert_eq!(
            compute_score(1.0, f64::INFINITY),
            Err(ScoreError::NotANumber { arg: "milestones" })
        );
    }

    #[test]
    fn test_score_rejects_fractional() {
        assert!(matches!(
            compute_score(1.5, 0.0),
            Err(ScoreError::Fractional { arg: "treated", .. })
        ));
    }

    #[test]
    fn test_score_rejects_counts_beyond_safe_integer() {
        assert_eq!(
            compute_score(0.0, 1.0e19),
            Err(ScoreError::TooLarge {
                arg: "milestones",
                value: 1.0e19,
            })
        );
        assert_eq!(
            compute_score(1.0e30, 0.0),
            Err(ScoreError::TooLarge {
                arg: "treated",
                value: 1.0e30,
            })
        );
        assert!(matches!(
            compute_score(MAX_COUNT + 1.0, 0.0),
            Err(ScoreError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_score_accepts_max_safe_integer() {
        assert_eq!(
            compute_score(MAX_COUNT, MAX_COUNT),
            Ok(3 * 9_007_199_254_740_991)
        );
    }

    #[test]
    fn test_final_score_matches_compute() {
        let board = Scoreboard {
            treated: 7,
            milestones: 4,
        };
        assert_eq!(final_score(&board), 15);
        assert_eq!(compute_score(7.0, 4.0), Ok(final_score(&board)));
    }
}
