//! SQLite-backed storage for questions and attempt logs.
//!
//! Scheduling itself stays in [`crate::schedule`] and [`crate::priority`];
//! this module reads the state those functions need and persists what they
//! return, inside one transaction per logged attempt.

use crate::dates;
use crate::priority;
use crate::priority::Priority;
use crate::schedule;
use crate::schedule::NextReview;
use crate::schedule::Outcome;
use anyhow::bail;
use anyhow::Result;
use rusqlite::config::DbConfig;
use rusqlite::params;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use std::path::Path;
use time::Date;
use time::OffsetDateTime;

pub struct Db {
    conn: Connection,
}

#[derive(Debug)]
pub struct NewQuestion {
    pub id: String,
    pub title: String,
    pub year: Option<i32>,
    pub section: Option<u32>,
    pub sub: Option<String>,
    pub tag: Option<String>,
    pub difficulty: Option<u8>,
    pub must_solve: bool,
}

#[derive(Debug)]
pub struct QuestionPreview {
    pub id: String,
    pub title: String,
    pub next_review_date: Option<String>,
    pub must_solve: bool,
}

/// One row of the ranked review queue.
#[derive(Debug)]
pub struct DueEntry {
    pub id: String,
    pub title: String,
    pub tag: Option<String>,
    pub due_on: Date,
    pub priority: Priority,
}

#[derive(Debug)]
pub struct Attempt {
    pub question_id: String,
    pub study_date: String,
    pub result: String,
    pub miss_type: Option<String>,
    pub minutes: Option<u32>,
    pub memo: Option<String>,
}

#[derive(Debug)]
pub struct Overview {
    pub questions: u32,
    pub due: u32,
    pub unseen: u32,
    pub must_solve_due: u32,
}

#[derive(Debug)]
pub struct TagStats {
    pub tag: String,
    pub questions: u32,
    pub due: u32,
    pub correct: u32,
    pub attempts: u32,
}

impl Db {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;

        Ok(Self { conn })
    }

    pub fn open_read_only(db_path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

        Ok(Self { conn })
    }

    pub fn init(&self) -> Result<()> {
        self.conn.execute_batch(include_str!("schema.sql"))?;

        Ok(())
    }

    pub fn add_question(&mut self, question: &NewQuestion) -> Result<()> {
        if question.id.is_empty() {
            bail!("question id can't be empty");
        }
        if question.title.is_empty() {
            bail!("question title can't be empty");
        }
        if let Some(difficulty) = question.difficulty {
            if !(1..=5).contains(&difficulty) {
                bail!("difficulty must be between 1 and 5, given {difficulty}");
            }
        }

        let now = now_millis();

        self.conn.execute(
            "
            INSERT INTO Question(id, year, section, sub, title, tag, difficulty, mustSolve, creationTimestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
            params![
                question.id,
                question.year,
                question.section,
                question.sub,
                question.title,
                question.tag,
                question.difficulty,
                question.must_solve,
                now,
            ],
        )?;

        Ok(())
    }

    pub fn questions(&self) -> Result<Vec<QuestionPreview>> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, title, nextReviewDate, mustSolve
            FROM Question
            ORDER BY id
            ",
        )?;

        let iter = stmt.query_map([], |row| {
            Ok(QuestionPreview {
                id: row.get(0)?,
                title: row.get(1)?,
                next_review_date: row.get(2)?,
                must_solve: row.get(3)?,
            })
        })?;

        let r: Result<_, rusqlite::Error> = iter.collect();

        Ok(r?)
    }

    /// Logs one attempt and persists the new schedule onto the question,
    /// in a single transaction.
    pub fn record_attempt(
        &mut self,
        question_id: &str,
        result: Outcome,
        study_date: Date,
        miss_type: Option<&str>,
        minutes: Option<u32>,
        memo: Option<&str>,
    ) -> Result<NextReview> {
        let now = now_millis();

        let tx = self.conn.transaction()?;

        let interval: Option<Option<i64>> = tx
            .query_row(
                "SELECT reviewInterval FROM Question WHERE id = ?",
                [question_id],
                |row| row.get(0),
            )
            .optional()?;

        let Some(interval) = interval else {
            bail!("no question with id {question_id}");
        };

        // Stored intervals are expected to be >= 1; anything else
        // schedules like a first review.
        let current = interval
            .and_then(|days| u16::try_from(days).ok())
            .filter(|&days| days >= 1);

        let next = schedule::next_review(current, result, study_date);

        let study_date = dates::format(study_date);

        tx.execute(
            "
            INSERT INTO AttemptLog(questionId, studyDate, result, missType, minutes, memo, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
            params![
                question_id,
                study_date,
                result.as_str(),
                miss_type,
                minutes,
                memo,
                now,
            ],
        )?;

        tx.execute(
            "
            UPDATE Question
            SET reviewInterval = ?, nextReviewDate = ?, lastResult = ?, lastStudyDate = ?
            WHERE id = ?
            ",
            params![
                next.interval,
                dates::format(next.due),
                result.as_str(),
                study_date,
                question_id,
            ],
        )?;

        tx.commit()?;

        Ok(next)
    }

    /// Every question due on or before `today`, scored and sorted with the
    /// most urgent first.
    pub fn due_queue(&self, today: Date) -> Result<Vec<DueEntry>> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, title, tag, difficulty, mustSolve, nextReviewDate, lastResult
            FROM Question
            WHERE nextReviewDate IS NOT NULL AND nextReviewDate <= ?
            ",
        )?;

        let iter = stmt.query_map([dates::format(today)], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<i64>>(3)?,
                row.get::<_, bool>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, Option<String>>(6)?,
            ))
        })?;

        let rows: Vec<_> = iter.collect::<Result<_, rusqlite::Error>>()?;

        let mut queue = Vec::with_capacity(rows.len());
        for (id, title, tag, difficulty, must_solve, next_review_date, last_result) in rows {
            let due_on = dates::parse(&next_review_date)?;
            let difficulty = difficulty.and_then(|d| u8::try_from(d).ok());
            let last_result = last_result.as_deref().map(Outcome::parse_lossy);

            let priority = priority::score(Some(due_on), last_result, difficulty, must_solve, today);

            queue.push(DueEntry {
                id,
                title,
                tag,
                due_on,
                priority,
            });
        }

        // Most urgent first; ties fall back to the question id so the
        // queue prints in the same order run after run.
        queue.sort_by(|a, b| {
            b.priority
                .total
                .cmp(&a.priority.total)
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(queue)
    }

    pub fn attempts(&self, question_id: Option<&str>, limit: u32) -> Result<Vec<Attempt>> {
        let mut stmt = self.conn.prepare(
            "
            SELECT questionId, studyDate, result, missType, minutes, memo
            FROM AttemptLog
            WHERE ?1 IS NULL OR questionId = ?1
            ORDER BY studyDate DESC, timestamp DESC
            LIMIT ?2
            ",
        )?;

        let iter = stmt.query_map(params![question_id, limit], |row| {
            Ok(Attempt {
                question_id: row.get(0)?,
                study_date: row.get(1)?,
                result: row.get(2)?,
                miss_type: row.get(3)?,
                minutes: row.get(4)?,
                memo: row.get(5)?,
            })
        })?;

        let r: Result<_, rusqlite::Error> = iter.collect();

        Ok(r?)
    }

    pub fn stats(&self, today: Date) -> Result<(Overview, Vec<TagStats>)> {
        let accuracy_since = dates::format(dates::add_days(today, -30));
        let today = dates::format(today);

        let overview = self.conn.query_row(
            "
            SELECT
                (SELECT COUNT(*) FROM Question) AS questions,

                (SELECT COUNT(*)
                FROM Question
                WHERE nextReviewDate IS NOT NULL AND nextReviewDate <= :today) AS due,

                (SELECT COUNT(*)
                FROM Question
                WHERE nextReviewDate IS NULL) AS unseen,

                (SELECT COUNT(*)
                FROM Question
                WHERE mustSolve = 1 AND nextReviewDate IS NOT NULL AND nextReviewDate <= :today) AS mustSolveDue
            ",
            [&today],
            |row| {
                Ok(Overview {
                    questions: row.get(0)?,
                    due: row.get(1)?,
                    unseen: row.get(2)?,
                    must_solve_due: row.get(3)?,
                })
            },
        )?;

        let mut stmt = self.conn.prepare(
            "
            SELECT
                t.tag,

                (SELECT COUNT(*)
                FROM Question
                WHERE tag IS t.tag) AS questions,

                (SELECT COUNT(*)
                FROM Question
                WHERE tag IS t.tag AND nextReviewDate IS NOT NULL AND nextReviewDate <= :today) AS due,

                (SELECT COUNT(*)
                FROM AttemptLog JOIN Question ON Question.id = AttemptLog.questionId
                WHERE Question.tag IS t.tag AND result = 'Correct' AND studyDate >= :accuracySince) AS correct,

                (SELECT COUNT(*)
                FROM AttemptLog JOIN Question ON Question.id = AttemptLog.questionId
                WHERE Question.tag IS t.tag AND result <> 'Skipped' AND studyDate >= :accuracySince) AS attempts
            FROM (SELECT DISTINCT tag FROM Question) AS t
            ORDER BY t.tag
            ",
        )?;
        let iter = stmt.query_map(params![today, accuracy_since], |row| {
            Ok(TagStats {
                tag: row
                    .get::<_, Option<String>>(0)?
                    .unwrap_or_else(|| "(untagged)".to_string()),
                questions: row.get(1)?,
                due: row.get(2)?,
                correct: row.get(3)?,
                attempts: row.get(4)?,
            })
        })?;

        let tag_stats: Result<_, rusqlite::Error> = iter.collect();

        Ok((overview, tag_stats?))
    }
}

fn now_millis() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp() * 1000)
        .try_into()
        .expect("valid timestamp")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_test_db() -> Db {
        let conn = Connection::open_in_memory().unwrap();
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)
            .unwrap();

        let db = Db { conn };
        db.init().unwrap();

        db
    }

    fn question(id: &str) -> NewQuestion {
        NewQuestion {
            id: id.to_string(),
            title: format!("question {id}"),
            year: Some(2017),
            section: Some(1),
            sub: None,
            tag: Some("algebra".to_string()),
            difficulty: Some(3),
            must_solve: false,
        }
    }

    fn day(s: &str) -> Date {
        dates::parse(s).unwrap()
    }

    #[test]
    fn record_attempt_persists_the_schedule() {
        let mut db = open_test_db();
        db.add_question(&question("Q1")).unwrap();

        let next = db
            .record_attempt("Q1", Outcome::Correct, day("2025-01-01"), None, None, None)
            .unwrap();

        assert_eq!(next.interval, 2);
        assert_eq!(next.due, day("2025-01-03"));

        // The follow-up doubles from the interval stored by the first.
        let next = db
            .record_attempt("Q1", Outcome::Correct, day("2025-01-03"), None, None, None)
            .unwrap();

        assert_eq!(next.interval, 4);
        assert_eq!(next.due, day("2025-01-07"));

        let queue = db.due_queue(day("2025-01-07")).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, "Q1");
        assert_eq!(queue[0].due_on, day("2025-01-07"));
    }

    #[test]
    fn record_attempt_requires_an_existing_question() {
        let mut db = open_test_db();

        let r = db.record_attempt("missing", Outcome::Correct, day("2025-01-01"), None, None, None);

        assert!(r.is_err());
    }

    #[test]
    fn due_queue_skips_future_and_unseen_questions() {
        let mut db = open_test_db();
        db.add_question(&question("overdue")).unwrap();
        db.add_question(&question("ahead")).unwrap();
        db.add_question(&question("unseen")).unwrap();

        db.record_attempt("overdue", Outcome::Wrong, day("2025-01-01"), None, None, None)
            .unwrap();
        db.record_attempt("ahead", Outcome::Correct, day("2025-01-05"), None, None, None)
            .unwrap();

        let queue = db.due_queue(day("2025-01-03")).unwrap();

        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, "overdue");
    }

    #[test]
    fn due_queue_orders_by_priority_then_id() {
        let mut db = open_test_db();

        let mut urgent = question("urgent");
        urgent.difficulty = Some(5);
        urgent.must_solve = true;
        db.add_question(&urgent).unwrap();

        db.add_question(&question("tied-b")).unwrap();
        db.add_question(&question("tied-a")).unwrap();

        db.record_attempt("urgent", Outcome::Wrong, day("2025-01-01"), None, None, None)
            .unwrap();
        db.record_attempt("tied-b", Outcome::Wrong, day("2025-01-01"), None, None, None)
            .unwrap();
        db.record_attempt("tied-a", Outcome::Wrong, day("2025-01-01"), None, None, None)
            .unwrap();

        let queue = db.due_queue(day("2025-01-02")).unwrap();

        let ids: Vec<&str> = queue.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, ["urgent", "tied-a", "tied-b"]);

        // urgent: wrong 20 + difficulty 10 + must-solve 15
        assert_eq!(queue[0].priority.total, 45);
        // tied pair: wrong 20 + difficulty 6
        assert_eq!(queue[1].priority.total, 26);
        assert_eq!(queue[2].priority.total, 26);
    }

    #[test]
    fn add_question_validates_its_input() {
        let mut db = open_test_db();

        assert!(db.add_question(&question("")).is_err());

        let mut untitled = question("Q1");
        untitled.title = String::new();
        assert!(db.add_question(&untitled).is_err());

        let mut too_hard = question("Q2");
        too_hard.difficulty = Some(6);
        assert!(db.add_question(&too_hard).is_err());
    }

    #[test]
    fn attempts_list_newest_first_with_limit() {
        let mut db = open_test_db();
        db.add_question(&question("Q1")).unwrap();
        db.add_question(&question("Q2")).unwrap();

        db.record_attempt("Q1", Outcome::Wrong, day("2025-01-01"), None, None, None)
            .unwrap();
        db.record_attempt("Q2", Outcome::Correct, day("2025-01-02"), None, None, None)
            .unwrap();
        db.record_attempt("Q1", Outcome::Partial, day("2025-01-03"), None, None, None)
            .unwrap();

        let all = db.attempts(None, 50).unwrap();
        let dates: Vec<&str> = all.iter().map(|a| a.study_date.as_str()).collect();
        assert_eq!(dates, ["2025-01-03", "2025-01-02", "2025-01-01"]);

        let only_q1 = db.attempts(Some("Q1"), 50).unwrap();
        assert_eq!(only_q1.len(), 2);

        let limited = db.attempts(None, 1).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].result, "Partial");
    }

    #[test]
    fn stats_count_due_and_accuracy() {
        let mut db = open_test_db();

        let mut flagged = question("Q1");
        flagged.must_solve = true;
        db.add_question(&flagged).unwrap();
        db.add_question(&question("Q2")).unwrap();
        db.add_question(&question("Q3")).unwrap();

        db.record_attempt("Q1", Outcome::Wrong, day("2025-01-01"), None, None, None)
            .unwrap();
        db.record_attempt("Q2", Outcome::Correct, day("2025-01-01"), None, None, None)
            .unwrap();

        let (overview, tags) = db.stats(day("2025-01-02")).unwrap();

        assert_eq!(overview.questions, 3);
        assert_eq!(overview.due, 1);
        assert_eq!(overview.unseen, 1);
        assert_eq!(overview.must_solve_due, 1);

        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].tag, "algebra");
        assert_eq!(tags[0].questions, 3);
        assert_eq!(tags[0].correct, 1);
        assert_eq!(tags[0].attempts, 2);
    }
}
