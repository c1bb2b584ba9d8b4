use crate::dates;
use crate::db::Db;
use anyhow::Result;
use std::path::Path;
use time::Date;

pub fn run(db_path: &Path, today: Date) -> Result<()> {
    let db = Db::open_read_only(db_path)?;

    let queue = db.due_queue(today)?;

    if queue.is_empty() {
        println!("Nothing to review on {}", dates::format(today));
        return Ok(());
    }

    println!(
        "{} question(s) due on {}\n",
        queue.len(),
        dates::format(today)
    );

    println!("score  ovrd  wrng  diff  must  due         id");
    for entry in &queue {
        let p = entry.priority;

        println!(
            "{:>5}  {:>4}  {:>4}  {:>4}  {:>4}  {}  {}  {}",
            p.total,
            p.overdue,
            p.wrong,
            p.difficulty,
            p.must_solve,
            dates::format(entry.due_on),
            entry.id,
            entry.title,
        );
    }

    Ok(())
}
