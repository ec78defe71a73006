use std::{fs, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use hexcalc::{
    repl::{is_quit, render_line},
    report::DEFAULT_PRECISION,
    CalcError, Locale, Repl, Reporter,
};

#[derive(Parser)]
#[command(author, version, about = "Decimal and hexadecimal four-operation calculator")]
struct Args {
    /// Language of messages and shell text
    #[arg(long, value_enum, default_value_t = Lang::En, global = true)]
    lang: Lang,

    /// Decimal places shown for results
    #[arg(long, default_value_t = DEFAULT_PRECISION, global = true)]
    precision: usize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start an interactive session
    Repl,
    /// Evaluate a single expression, e.g. `2+3*4=`
    Eval { expression: String },
    /// Evaluate every line of a file
    Run { file: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum Lang {
    En,
    Zh,
}

impl From<Lang> for Locale {
    fn from(lang: Lang) -> Self {
        match lang {
            Lang::En => Locale::English,
            Lang::Zh => Locale::Chinese,
        }
    }
}

fn main() -> Result<ExitCode, CalcError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let reporter = Reporter::new(args.lang.into()).with_precision(args.precision);
    match args.command.unwrap_or(Command::Repl) {
        Command::Repl => {
            Repl::new(reporter).run()?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Eval { expression } => Ok(exit_code(eval_one(&reporter, &expression))),
        Command::Run { file } => run_file(&reporter, file),
    }
}

/// Prints the outcome; returns whether the expression evaluated.
fn eval_one(reporter: &Reporter, expression: &str) -> bool {
    match render_line(reporter, expression) {
        Ok(rendered) => {
            println!("{rendered}");
            true
        }
        Err(diagnostic) => {
            eprintln!("{diagnostic}");
            false
        }
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_file(reporter: &Reporter, path: PathBuf) -> Result<ExitCode, CalcError> {
    let source = fs::read_to_string(&path)?;
    let mut failures = 0usize;
    for line in source.lines() {
        if is_quit(line) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        if !eval_one(reporter, line) {
            failures += 1;
        }
    }
    tracing::debug!(file = %path.display(), failures, "batch finished");
    Ok(exit_code(failures == 0))
}
