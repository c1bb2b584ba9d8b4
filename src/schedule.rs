//! Review-interval scheduling.
//!
//! A simplified SM-2: a correct answer doubles the interval up to a cap, a
//! wrong answer resets it to one day, a partial answer grows it slowly and
//! a skipped question keeps its interval. No per-question ease factor is
//! tracked.

use crate::dates;
use std::str::FromStr;
use thiserror::Error;
use time::Date;

const MAX_INTERVAL: u16 = 30;
const PARTIAL_GROWTH: f64 = 1.2;

/// How an attempt went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Partial,
    Wrong,
    Skipped,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown result `{0}`, expected Correct, Partial, Wrong or Skipped")]
pub struct UnknownResult(String);

impl FromStr for Outcome {
    type Err = UnknownResult;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("Correct") {
            Ok(Outcome::Correct)
        } else if s.eq_ignore_ascii_case("Partial") {
            Ok(Outcome::Partial)
        } else if s.eq_ignore_ascii_case("Wrong") {
            Ok(Outcome::Wrong)
        } else if s.eq_ignore_ascii_case("Skipped") {
            Ok(Outcome::Skipped)
        } else {
            Err(UnknownResult(s.to_string()))
        }
    }
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Correct => "Correct",
            Outcome::Partial => "Partial",
            Outcome::Wrong => "Wrong",
            Outcome::Skipped => "Skipped",
        }
    }

    /// Reads a result column back from storage. A value outside the four
    /// known names leaves the schedule untouched, so it maps to `Skipped`
    /// instead of failing the whole queue.
    pub fn parse_lossy(s: &str) -> Outcome {
        s.parse().unwrap_or(Outcome::Skipped)
    }
}

/// Output of [`next_review`]: the updated interval and the day the
/// question comes due again, always exactly `study_date + interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextReview {
    pub interval: u16,
    pub due: Date,
}

/// Computes the interval and due date that an attempt on `study_date`
/// earns the question.
///
/// A missing or zero current interval counts as one day: questions that
/// have never been reviewed start from 1, and a non-positive stored value
/// is clamped rather than rejected.
pub fn next_review(current_interval: Option<u16>, result: Outcome, study_date: Date) -> NextReview {
    let current = current_interval.unwrap_or(1).max(1);

    let interval = match result {
        Outcome::Correct => current.saturating_mul(2).min(MAX_INTERVAL),
        Outcome::Wrong => 1,
        Outcome::Partial => ((f64::from(current) * PARTIAL_GROWTH) as u16).max(1),
        Outcome::Skipped => current,
    };

    NextReview {
        interval,
        due: dates::add_days(study_date, i64::from(interval)),
    }
}
