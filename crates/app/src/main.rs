use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::model::{GradeFilter, Language, QuizSettings};
use services::{FisherYates, QuizSession};
use storage::{JsonFileSource, TermSource};
use tracing::info;

mod play;
mod render;

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidGrade { raw: String },
    InvalidLanguage { raw: String },
    InvalidSeed { raw: String },
    InvalidQuestionCount { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidGrade { raw } => write!(f, "invalid --grade value: {raw} (expected 0-5)"),
            ArgsError::InvalidLanguage { raw } => write!(f, "invalid --lang value: {raw} (expected en or zh)"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidQuestionCount { raw } => write!(f, "invalid --questions value: {raw}"),
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
    eprintln!("  quiz play   [options]          # interactive quiz (default)");
    eprintln!("  quiz browse [options] [query]  # list matching terms");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --glossary <path>   glossary JSON file (default data/glossary.json)");
    eprintln!("  --grade <0-5>       grade filter, 0 = all (default 0)");
    eprintln!("  --lang <en|zh>      display language (default en)");
    eprintln!("  --seed <u64>        reproducible shuffling");
    eprintln!("  --questions <n>     questions per session (default 10)");
    eprintln!("  --verbose, --quiet  log level");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_GLOSSARY, QUIZ_GRADE, QUIZ_LANG, QUIZ_SEED, QUIZ_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Browse,
    Help,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "browse" => Some(Self::Browse),
            "help" | "--help" | "-h" => Some(Self::Help),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    command: Command,
    glossary: PathBuf,
    grade: GradeFilter,
    language: Language,
    seed: Option<u64>,
    questions: usize,
    verbose: bool,
    quiet: bool,
    query: Option<String>,
}

fn parse_grade(raw: &str) -> Result<GradeFilter, ArgsError> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .and_then(|value| GradeFilter::from_u8(value).ok())
        .ok_or_else(|| ArgsError::InvalidGrade { raw: raw.to_string() })
}

fn parse_language(raw: &str) -> Result<Language, ArgsError> {
    raw.parse()
        .map_err(|_| ArgsError::InvalidLanguage { raw: raw.to_string() })
}

fn parse_seed(raw: &str) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidSeed { raw: raw.to_string() })
}

impl Args {
    /// Flags win over environment variables, which win over defaults.
    fn parse(
        argv: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut args = argv.into_iter().peekable();
        let command = match args.peek().and_then(|first| Command::from_arg(first)) {
            Some(command) => {
                args.next();
                command
            }
            None => Command::Play,
        };

        let mut parsed = Self {
            command,
            glossary: env("QUIZ_GLOSSARY").map_or_else(|| PathBuf::from("data/glossary.json"), PathBuf::from),
            grade: env("QUIZ_GRADE").as_deref().map(parse_grade).transpose()?.unwrap_or_default(),
            language: env("QUIZ_LANG").as_deref().map(parse_language).transpose()?.unwrap_or_default(),
            seed: env("QUIZ_SEED").as_deref().map(parse_seed).transpose()?,
            questions: QuizSettings::DEFAULT_QUESTION_COUNT,
            verbose: false,
            quiet: false,
            query: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--glossary" => parsed.glossary = require_value(&mut args, "--glossary")?.into(),
                "--grade" => parsed.grade = parse_grade(&require_value(&mut args, "--grade")?)?,
                "--lang" => parsed.language = parse_language(&require_value(&mut args, "--lang")?)?,
                "--seed" => parsed.seed = Some(parse_seed(&require_value(&mut args, "--seed")?)?),
                "--questions" => {
                    let value = require_value(&mut args, "--questions")?;
                    parsed.questions = value
                        .parse::<usize>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or(ArgsError::InvalidQuestionCount { raw: value })?;
                }
                "--verbose" | "-v" => parsed.verbose = true,
                "--quiet" | "-q" => parsed.quiet = true,
                "--help" | "-h" => parsed.command = Command::Help,
                other if parsed.command == Command::Browse && !other.starts_with('-') => {
                    let query = match parsed.query.take() {
                        Some(prev) => format!("{prev} {other}"),
                        None => other.to_string(),
                    };
                    parsed.query = Some(query);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("QUIZ_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| format!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    if args.command == Command::Help {
        print_usage();
        return Ok(());
    }

    init_tracing(args.quiet, args.verbose)?;

    let corpus = JsonFileSource::new(&args.glossary).with_skip_invalid(true).load()?;
    info!(path = %args.glossary.display(), terms = corpus.len(), "glossary loaded");

    match args.command {
        Command::Browse => {
            let query = args.query.as_deref().unwrap_or_default();
            let matches = corpus.search(query, args.grade);
            for term in &matches {
                println!("{}", render::term_line(term, args.language));
            }
            eprintln!("{} of {} terms", matches.len(), corpus.len());
            Ok(())
        }
        Command::Play => {
            let settings = QuizSettings::new(args.questions, QuizSettings::DEFAULT_WRONG_ANSWER_TARGET)?;
            let mut quiz = QuizSession::new(Arc::new(corpus))
                .with_settings(settings)
                .with_language(args.language)
                .with_grade(args.grade);
            if let Some(seed) = args.seed {
                quiz = quiz.with_permutation(FisherYates::seeded(seed));
            }

            let stdin = io::stdin();
            let mut stdout = io::stdout();
            play::play(&mut quiz, stdin.lock(), &mut stdout)?;
            Ok(())
        }
        Command::Help => Ok(()),
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
