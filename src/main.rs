use anyhow::bail;
use anyhow::Result;
use std::path::PathBuf;
use studylog::add;
use studylog::clock::Clock;
use studylog::clock::JstClock;
use studylog::dates;
use studylog::db::NewQuestion;
use studylog::due;
use studylog::init;
use studylog::log;
use studylog::logs;
use studylog::questions;
use studylog::review;
use studylog::stats;
use time::Date;

const HELP: &str = "\
studylog - past-exam study log with spaced-repetition scheduling

USAGE:
    studylog [-p <path>] <command> [args]

COMMANDS:
    init                                 Create the database
    add <id> <title> [options]           Register a question
        --year <n> --section <n> --sub <s> --tag <s>
        --difficulty <1-5> --must-solve
    questions                            List registered questions
    log <id> <result> [options]          Record an attempt
        result: Correct | Partial | Wrong | Skipped
        --date <YYYY-MM-DD> (default: today, JST)
        --miss <type> --minutes <n> --memo <text>
    logs [--question <id>] [--limit <n>] Show recent attempts
    due                                  Show today's review queue, most urgent first
    review                               Review due questions interactively
    stats                                Summary statistics

OPTIONS:
    -p, --path <path>                    Database file (default: studylog.db)
    -h, --help                           Show this message
";

enum Command {
    Init,
    Add(NewQuestion),
    Questions,
    Log {
        question_id: String,
        result: String,
        study_date: Date,
        miss_type: Option<String>,
        minutes: Option<u32>,
        memo: Option<String>,
    },
    Logs {
        question_id: Option<String>,
        limit: u32,
    },
    Due,
    Review,
    Stats,
}

fn main() -> Result<()> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let db_path: PathBuf = args
        .opt_value_from_str(["-p", "--path"])?
        .unwrap_or_else(|| PathBuf::from("studylog.db"));

    // Captured once, so every step of one invocation sees the same day.
    let today = JstClock.today();

    let Some(name) = args.subcommand()? else {
        print!("{HELP}");
        return Ok(());
    };

    let command = match name.as_str() {
        "init" => Command::Init,
        "add" => Command::Add(NewQuestion {
            year: args.opt_value_from_str("--year")?,
            section: args.opt_value_from_str("--section")?,
            sub: args.opt_value_from_str("--sub")?,
            tag: args.opt_value_from_str("--tag")?,
            difficulty: args.opt_value_from_str("--difficulty")?,
            must_solve: args.contains("--must-solve"),
            id: args.free_from_str()?,
            title: args.free_from_str()?,
        }),
        "questions" => Command::Questions,
        "log" => {
            let study_date = match args.opt_value_from_str::<_, String>("--date")? {
                Some(date) => dates::parse(&date)?,
                None => today,
            };

            Command::Log {
                miss_type: args.opt_value_from_str("--miss")?,
                minutes: args.opt_value_from_str("--minutes")?,
                memo: args.opt_value_from_str("--memo")?,
                question_id: args.free_from_str()?,
                result: args.free_from_str()?,
                study_date,
            }
        }
        "logs" => Command::Logs {
            question_id: args.opt_value_from_str("--question")?,
            limit: args.opt_value_from_str("--limit")?.unwrap_or(50),
        },
        "due" => Command::Due,
        "review" => Command::Review,
        "stats" => Command::Stats,
        _ => bail!("unknown command `{name}`, run with --help for usage"),
    };

    let rest = args.finish();
    if !rest.is_empty() {
        bail!("unexpected arguments: {rest:?}");
    }

    match command {
        Command::Init => init::run(&db_path),
        Command::Add(question) => add::run(&db_path, &question),
        Command::Questions => questions::run(&db_path),
        Command::Log {
            question_id,
            result,
            study_date,
            miss_type,
            minutes,
            memo,
        } => log::run(
            &db_path,
            &question_id,
            &result,
            study_date,
            miss_type.as_deref(),
            minutes,
            memo.as_deref(),
        ),
        Command::Logs { question_id, limit } => logs::run(&db_path, question_id.as_deref(), limit),
        Command::Due => due::run(&db_path, today),
        Command::Review => review::run(&db_path, today),
        Command::Stats => stats::run(&db_path, today),
    }
}
