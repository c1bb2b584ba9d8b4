use crate::db::Db;
use anyhow::Result;
use std::path::Path;

pub fn run(db_path: &Path, question_id: Option<&str>, limit: u32) -> Result<()> {
    let db = Db::open_read_only(db_path)?;

    for attempt in db.attempts(question_id, limit)? {
        let minutes = attempt
            .minutes
            .map(|m| format!(" {m}min"))
            .unwrap_or_default();
        let miss = attempt
            .miss_type
            .map(|m| format!(" [{m}]"))
            .unwrap_or_default();
        let memo = attempt.memo.map(|m| format!(" {m}")).unwrap_or_default();

        println!(
            "{} {:<7} {}{minutes}{miss}{memo}",
            attempt.study_date, attempt.result, attempt.question_id,
        );
    }

    Ok(())
}
