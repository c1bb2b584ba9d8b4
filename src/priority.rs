//! Urgency scoring for the review queue.
//!
//! Each due question gets a score from four independent components:
//! how overdue it is (saturating, so stale items can't dominate forever),
//! how the last attempt went, how hard the question is, and whether it's
//! flagged must-solve. The queue sorts on the total; the components are
//! printed next to each row so the ordering stays explainable.

use crate::dates;
use crate::schedule::Outcome;
use time::Date;

const OVERDUE_CAP: u32 = 30;
const WRONG_WEIGHT: u32 = 20;
const PARTIAL_WEIGHT: u32 = 10;
const DIFFICULTY_WEIGHT: u32 = 2;
const MUST_SOLVE_WEIGHT: u32 = 15;

/// Total score plus the per-component breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Priority {
    pub total: u32,
    pub days_overdue: u32,
    pub overdue: u32,
    pub wrong: u32,
    pub difficulty: u32,
    pub must_solve: u32,
}

/// Scores one question snapshot against `today`. Pure and deterministic:
/// same inputs and same `today` always give the same score.
pub fn score(
    next_review_date: Option<Date>,
    last_result: Option<Outcome>,
    difficulty: Option<u8>,
    must_solve: bool,
    today: Date,
) -> Priority {
    let days_overdue = next_review_date
        .map(|due| dates::diff_days(due, today).max(0) as u32)
        .unwrap_or(0);

    let overdue = days_overdue.min(OVERDUE_CAP);

    let wrong = match last_result {
        Some(Outcome::Wrong) => WRONG_WEIGHT,
        Some(Outcome::Partial) => PARTIAL_WEIGHT,
        _ => 0,
    };

    let difficulty = difficulty.map_or(0, |d| u32::from(d) * DIFFICULTY_WEIGHT);

    let must_solve = if must_solve { MUST_SOLVE_WEIGHT } else { 0 };

    Priority {
        total: overdue + wrong + difficulty + must_solve,
        days_overdue,
        overdue,
        wrong,
        difficulty,
        must_solve,
    }
}
