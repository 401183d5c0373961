mod config_cmd;
mod criteria;
mod parse;
mod quiz;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::{config, load_questions, Question};
use crate::session::QuizSession;
use crate::store::FileStore;

#[derive(Parser)]
#[command(name = "mockexam")]
#[command(about = "Turn exam dumps into practice quizzes", long_about = None)]
pub struct Cli {
    /// State file holding saved answers and the pass criteria
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Parsed question file to quiz on
    #[arg(long, global = true)]
    pub questions: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a raw exam dump into a question file
    Parse {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        delimiter: Option<String>,
        #[arg(long)]
        correct_marker: Option<String>,
    },
    /// Take the quiz interactively
    Quiz,
    /// Show or change the percentage needed to pass
    Criteria { value: Option<String> },
    /// Show progress of the saved session
    Status,
    /// Forget all saved answers
    Reset,
    /// Show or change defaults
    Config {
        #[arg(long)]
        questions_path: Option<PathBuf>,
        #[arg(long)]
        delimiter: Option<String>,
        #[arg(long)]
        correct_marker: Option<String>,
    },
}

/// Where this invocation reads and writes.
pub struct Paths {
    pub store: PathBuf,
    pub questions: PathBuf,
}

impl Paths {
    fn resolve(store: Option<PathBuf>, questions: Option<PathBuf>) -> Self {
        let user_config = config::load_config();
        Self {
            store: store.unwrap_or_else(config::get_state_path),
            questions: questions.unwrap_or(user_config.questions_path),
        }
    }
}

pub fn run(cli: Cli) {
    let paths = Paths::resolve(cli.store, cli.questions);

    match cli.command {
        None | Some(Commands::Quiz) => quiz::take_quiz(&paths),
        Some(Commands::Parse {
            input,
            output,
            delimiter,
            correct_marker,
        }) => parse::parse_dump(&input, output, delimiter, correct_marker),
        Some(Commands::Criteria { value }) => criteria::handle_criteria(&paths, value),
        Some(Commands::Status) => status::show_status(&paths),
        Some(Commands::Reset) => status::reset_answers(&paths),
        Some(Commands::Config {
            questions_path,
            delimiter,
            correct_marker,
        }) => config_cmd::handle_config(questions_path, delimiter, correct_marker),
    }
}

/// Opens the saved session. With `require_questions` unset a missing
/// question file yields an empty quiz, enough for editing saved settings.
fn open_session(paths: &Paths, require_questions: bool) -> QuizSession<FileStore> {
    let questions: Vec<Question> = match load_questions(&paths.questions) {
        Ok(q) => q,
        Err(e) if require_questions => {
            eprintln!("{}", e);
            eprintln!("Run `mockexam parse <dump.txt>` first.");
            std::process::exit(1);
        }
        Err(e) => {
            log::warn!("{}", e);
            Vec::new()
        }
    };

    let store = match FileStore::open(&paths.store) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to open saved state: {}", e);
            std::process::exit(1);
        }
    };

    match QuizSession::restore(questions, store) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to restore session: {}", e);
            std::process::exit(1);
        }
    }
}
