use crate::db::Db;
use crate::db::NewQuestion;
use anyhow::Result;
use std::path::Path;

pub fn run(db_path: &Path, question: &NewQuestion) -> Result<()> {
    let mut db = Db::open(db_path)?;

    db.add_question(question)?;

    println!("Added {}", question.id);

    Ok(())
}
