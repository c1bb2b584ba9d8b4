use crate::dates;
use crate::db::Db;
use crate::schedule::Outcome;
use anyhow::Result;
use std::path::Path;
use time::Date;

pub fn run(
    db_path: &Path,
    question_id: &str,
    result: &str,
    study_date: Date,
    miss_type: Option<&str>,
    minutes: Option<u32>,
    memo: Option<&str>,
) -> Result<()> {
    // Strict here: the lossy fallback in `Outcome` is for rows already on
    // disk, not for operator input.
    let result: Outcome = result.parse()?;

    let mut db = Db::open(db_path)?;

    let next = db.record_attempt(question_id, result, study_date, miss_type, minutes, memo)?;

    println!(
        "{question_id}: {} on {}",
        result.as_str(),
        dates::format(study_date)
    );
    println!(
        "Next review in {} day(s), on {}",
        next.interval,
        dates::format(next.due)
    );

    Ok(())
}
