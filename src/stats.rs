use crate::db::Db;
use crate::db::Overview;
use crate::db::TagStats;
use anyhow::Result;
use std::fmt;
use std::path::Path;
use time::Date;

impl fmt::Display for Overview {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} questions, {} not yet reviewed", self.questions, self.unseen)?;

        if self.must_solve_due > 0 {
            writeln!(f, "Due today: {} ({} must-solve)", self.due, self.must_solve_due)
        } else {
            writeln!(f, "Due today: {}", self.due)
        }
    }
}

impl fmt::Display for TagStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}\n{} questions, {} due", self.tag, self.questions, self.due)?;

        writeln!(
            f,
            "Past month accuracy: {:.0}% ({} / {})",
            if self.attempts > 0 {
                self.correct as f32 / self.attempts as f32 * 100.0
            } else {
                100.0
            },
            self.correct,
            self.attempts,
        )
    }
}

pub fn run(db_path: &Path, today: Date) -> Result<()> {
    let db = Db::open_read_only(db_path)?;

    let (overview, tag_stats) = db.stats(today)?;

    println!("{overview}");

    for stats in tag_stats {
        println!("{stats}");
    }

    Ok(())
}
