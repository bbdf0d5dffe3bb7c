//! winbounds - window edge checker
//!
//! Reads window IDs on stdin and reports whether any of those windows touch
//! an edge of the screen they are on.

mod batch;
mod config;
mod environment;
mod input;
mod report;
mod screen;

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use batch::{BatchDriver, Verdict};
use config::{Config, Options, Overrides};
use screen::TargetArea;

const USAGE: &str = "\
usage: aerospace list-windows ... | winbounds [--visible|--frame] [--epsilon N] [--verbose] [--dump]
                                           [--config FILE] [--layout FILE]

Reads window IDs from stdin (whitespace-delimited; newline-delimited works).

Flags:
  --visible       Compare against visibleFrame (default)
  --frame         Compare against full screen frame
  --epsilon N     Tolerance in points (default: 1)
  --verbose       Print parse/lookup warnings to stderr
  --dump          Print per-window geometry and edge checks to stdout (JSONL)
  --config FILE   Read defaults from a TOML config file
  --layout FILE   Use a recorded display/window layout instead of the window server

Exit codes:
  0 = ALL windows are non-touching
  1 = at least one window touches an edge OR any error occurred (parse/not found/etc.)
  2 = usage / no valid window IDs on stdin";

/// Check whether windows touch the edges of their screen
#[derive(Parser, Debug)]
#[command(name = "winbounds")]
#[command(disable_help_flag = true)]
#[command(args_override_self = true)]
struct Cli {
    /// Compare against the visible frame (default)
    #[arg(long, overrides_with = "frame")]
    visible: bool,

    /// Compare against the full screen frame
    #[arg(long, overrides_with = "visible")]
    frame: bool,

    /// Tolerance in points
    #[arg(long, value_name = "N", allow_negative_numbers = true, value_parser = parse_epsilon)]
    epsilon: Option<f64>,

    /// Print parse/lookup warnings to stderr
    #[arg(long)]
    verbose: bool,

    /// Print per-window records to stdout (JSONL)
    #[arg(long)]
    dump: bool,

    /// Path to configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Recorded display/window layout to use instead of the window server
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,

    #[arg(short = 'h', long = "help")]
    help: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        let target = if self.frame {
            Some(TargetArea::Frame)
        } else if self.visible {
            Some(TargetArea::Visible)
        } else {
            None
        };

        Overrides {
            target,
            epsilon: self.epsilon,
            verbose: self.verbose,
            dump: self.dump,
            layout: self.layout.clone(),
        }
    }
}

fn parse_epsilon(value: &str) -> Result<f64, String> {
    let epsilon: f64 = value
        .parse()
        .map_err(|_| format!("invalid number: {}", value))?;
    config::validate_epsilon(epsilon).map_err(|e| e.to_string())
}

fn usage() -> ExitCode {
    eprintln!("{}", USAGE);
    ExitCode::from(2)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) if !cli.help => cli,
        _ => return usage(),
    };

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("winbounds: {:#}", err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    // Load configuration
    let config_path = Config::locate(cli.config.as_deref());
    let config = match &config_path {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    let options = Options::resolve(&config, cli.overrides());

    init_logging(options.verbose);
    if let Some(path) = &config_path {
        tracing::debug!("using config file {}", path.display());
    }

    match check(&options, io::stdin().lock(), &mut io::stdout().lock())? {
        Status::Usage => Ok(usage()),
        status => Ok(ExitCode::from(status.exit_code())),
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    /// No valid window IDs on stdin
    Usage,
    Checked(Verdict),
}

impl Status {
    fn exit_code(&self) -> u8 {
        match self {
            Status::Usage => 2,
            Status::Checked(verdict) => verdict.exit_code(),
        }
    }
}

/// Check every window ID read from `stdin`, writing dump records to `out`
fn check<R: Read, W: Write>(options: &Options, stdin: R, out: &mut W) -> anyhow::Result<Status> {
    let ids = input::read_window_ids(stdin)?;
    if ids.is_empty() {
        return Ok(Status::Usage);
    }
    tracing::debug!("checking {} windows", ids.len());

    let env = environment::open(options.layout.as_deref())?;
    let driver = BatchDriver::new(env.as_ref(), options);
    let outcomes = driver.run(&ids, out).context("failed to write dump output")?;

    let verdict = Verdict::from_outcomes(&outcomes);
    if verdict == Verdict::Problem {
        let problems: Vec<String> = outcomes
            .iter()
            .filter(|o| o.is_problem())
            .map(|o| o.window_id().to_string())
            .collect();
        tracing::debug!("problem windows: {}", problems.join(" "));
    }

    Ok(Status::Checked(verdict))
}

fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("error")
    }
}

/// Diagnostics go to stderr so stdout stays machine-readable
fn init_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .without_time()
                .with_target(false),
        )
        .with(log_filter(verbose))
        .init();
}
