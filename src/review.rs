use crate::dates;
use crate::db::Db;
use crate::prompt;
use crate::schedule::Outcome;
use anyhow::Result;
use std::path::Path;
use time::Date;

pub fn run(db_path: &Path, today: Date) -> Result<()> {
    let mut db = Db::open(db_path)?;

    let queue = db.due_queue(today)?;

    if queue.is_empty() {
        println!("Nothing to review on {}", dates::format(today));
        return Ok(());
    }

    let total = queue.len();
    println!("{total} question(s) to review\n");

    let mut answered = 0;
    let mut correct = 0;

    for entry in queue {
        let tag = entry
            .tag
            .as_deref()
            .map(|t| format!(" ({t})"))
            .unwrap_or_default();

        println!("{}{tag}  {}", entry.id, entry.title);

        let Some(outcome) = prompt::outcome("Result?")? else {
            break;
        };

        let next = db.record_attempt(&entry.id, outcome, today, None, None, None)?;

        println!(
            "Next review in {} day(s), on {}\n",
            next.interval,
            dates::format(next.due)
        );

        answered += 1;
        if outcome == Outcome::Correct {
            correct += 1;
        }
    }

    println!("Answered {answered}/{total}, {correct} correct");

    Ok(())
}
