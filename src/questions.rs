use crate::db::Db;
use anyhow::Result;
use std::path::Path;

pub fn run(db_path: &Path) -> Result<()> {
    let db = Db::open_read_only(db_path)?;

    for question in db.questions()? {
        let due = question.next_review_date.as_deref().unwrap_or("new");

        if question.must_solve {
            println!("[must] {} {due} {}", question.id, question.title);
        } else {
            println!("{} {due} {}", question.id, question.title);
        }
    }

    Ok(())
}
