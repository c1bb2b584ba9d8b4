//! Raw-mode keyboard prompt for review sessions.

use crate::schedule::Outcome;
use anyhow::Result;
use std::io::stdin;
use std::io::stdout;
use std::io::Write;
use termion::event::Event;
use termion::event::Key;
use termion::input::TermRead;
use termion::raw::IntoRawMode;

/// Displays the given prompt and waits for a single-key attempt result:
/// `c`orrect, `p`artial, `w`rong or `s`kipped. Returns `None` when the
/// session is ended with `q` or ctrl-c.
pub fn outcome(prompt: impl AsRef<str>) -> Result<Option<Outcome>> {
    let mut stdout = stdout().into_raw_mode()?;
    write!(stdout, "{} [c/p/w/s, q to stop] ", prompt.as_ref())?;
    stdout.flush()?;

    let stdin = stdin();

    for event in stdin.events() {
        let outcome = match event? {
            Event::Key(Key::Char('c')) => Outcome::Correct,
            Event::Key(Key::Char('p')) => Outcome::Partial,
            Event::Key(Key::Char('w')) => Outcome::Wrong,
            Event::Key(Key::Char('s')) => Outcome::Skipped,
            Event::Key(Key::Char('q')) | Event::Key(Key::Ctrl('c')) => {
                write!(stdout, "\r\n")?;
                stdout.flush()?;

                return Ok(None);
            }
            _ => continue,
        };

        write!(stdout, "{}\r\n", outcome.as_str())?;
        stdout.flush()?;

        return Ok(Some(outcome));
    }

    unreachable!()
}
