use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use services::{JsonFileSource, QuestionSource, QuizSession, TickOutcome};
use storage::file::FileStore;
use teori_core::model::SessionMode;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--questions <path>] [--state-dir <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --questions data/questions.json");
    eprintln!("  --state-dir .teori");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TEORI_QUESTIONS, TEORI_STATE_DIR");
}

struct Args {
    questions: PathBuf,
    state_dir: PathBuf,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut questions = std::env::var("TEORI_QUESTIONS")
            .unwrap_or_else(|_| "data/questions.json".to_owned());
        let mut state_dir =
            std::env::var("TEORI_STATE_DIR").unwrap_or_else(|_| ".teori".to_owned());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions" => questions = require_value(args, "--questions")?,
                "--state-dir" => state_dir = require_value(args, "--state-dir")?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            questions: questions.into(),
            state_dir: state_dir.into(),
        })
    }
}

fn format_time(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes:02}:{remainder:02}")
}

fn render(session: &QuizSession) {
    match session.mode() {
        SessionMode::Menu => {
            println!();
            println!("=== Somali Teori — Körkortsprov B ===");
            println!("  1) Träna frågor");
            println!("  2) Gör testprov (70 frågor)");
            println!("  q) Avsluta");
        }
        SessionMode::CategorySelect => {
            println!();
            println!("Välj del att träna:");
            for (i, category) in session.categories().iter().enumerate() {
                println!("  {}) {category}", i + 1);
            }
            println!("  b) Tillbaka");
        }
        SessionMode::Confirm => {
            println!();
            if let Some(category) = session.selected_category() {
                println!("Tränar: {category}");
            }
            println!("  [enter] Starta träning");
            println!("  b) Tillbaka");
        }
        SessionMode::Active => render_active(session),
        SessionMode::Finished => {
            let progress = session.progress();
            println!();
            println!("Quiz klart!");
            println!("Poäng: {} av {}", progress.score, progress.total);
            println!("Tid kvar: {}", format_time(progress.time_remaining_secs));
            println!("  [enter] Tillbaka till menyn    q) Avsluta");
        }
    }
}

fn render_active(session: &QuizSession) {
    let progress = session.progress();
    println!();
    println!(
        "Fråga {} / {}    Tid kvar: {}",
        progress.position,
        progress.total,
        format_time(progress.time_remaining_secs)
    );

    let Some(question) = session.current_question() else {
        return;
    };
    println!("{}", question.prompt);
    if let Some(image) = &question.image {
        println!("[bild: {image}]");
    }

    match session.selected_option() {
        None => {
            for (i, option) in question.options.iter().enumerate() {
                println!("  {}) {option}", i + 1);
            }
            println!("Välj ett svar (1-{}):", question.options.len());
        }
        Some(selected) => {
            if question.is_correct(selected) {
                println!("Rätt!");
            } else {
                let correct = question
                    .options
                    .get(question.answer_index)
                    .map_or("?", String::as_str);
                println!("Fel. Rätt svar: {correct}");
            }
            if let Some(explanation) = &question.explanation {
                println!("{explanation}");
            }
            println!("  [enter] Nästa fråga");
        }
    }
}

/// Apply one line of input to the session. Returns false to quit.
fn handle_input(session: &mut QuizSession, input: &str) -> bool {
    match session.mode() {
        SessionMode::Menu => match input {
            "1" => session.choose_training(),
            "2" => session.choose_test(),
            "q" => return false,
            _ => {}
        },
        SessionMode::CategorySelect => {
            if input == "b" {
                session.return_to_menu();
            } else if let Ok(n) = input.parse::<usize>() {
                let picked = n
                    .checked_sub(1)
                    .and_then(|i| session.categories().get(i).cloned());
                if let Some(category) = picked {
                    session.choose_category(category);
                }
            }
        }
        SessionMode::Confirm => match input {
            "" | "s" => session.confirm_start(),
            "b" => session.return_to_menu(),
            _ => {}
        },
        SessionMode::Active => {
            if session.selected_option().is_some() {
                if input.is_empty() || input == "n" {
                    session.advance();
                }
            } else if let Ok(n) = input.parse::<usize>() {
                if let Some(index) = n.checked_sub(1) {
                    session.select_option(index);
                }
            }
        }
        SessionMode::Finished => match input {
            "q" => return false,
            _ => session.return_to_menu(),
        },
    }
    true
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "app=info,services=info".to_owned());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let pool = JsonFileSource::new(&args.questions).load()?;
    info!(total = pool.len(), path = %args.questions.display(), "question pool loaded");

    let store = Arc::new(FileStore::new(&args.state_dir));
    let mut session = QuizSession::new(pool, store);
    if session.resume_saved() {
        println!("Återupptar pågående prov.");
    }
    render(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !handle_input(&mut session, line.trim()) {
                    break;
                }
                render(&session);
            }
            _ = ticker.tick() => {
                if session.tick() == TickOutcome::Expired {
                    println!();
                    println!("Tiden är ute!");
                    render(&session);
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
