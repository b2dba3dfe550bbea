//! `banker`: Banker's Algorithm safety and deadlock analysis from the command line.
//!
//! # Usage
//!
//! ```text
//! banker [--config FILE] [--format text|json] [--strict] <COMMAND>
//!
//! Commands:
//!   safety     Check whether a safe finishing order exists
//!   deadlock   Detect processes that can never be resolved
//!   prevent    Explain a deadlock prevention strategy for the state
//!   recover    Explain a deadlock recovery strategy for the state
//! ```
//!
//! Every command takes its numbers either from a TOML snapshot file
//! (`--input state.toml`) or directly from flags:
//!
//! ```text
//! banker safety --allocation "0,1,0;2,0,0;3,0,2;2,1,1;0,0,2" \
//!               --max        "7,5,3;3,2,2;9,0,2;2,2,2;4,3,3" \
//!               --available  "3,3,2"
//! ```
//!
//! On the command line `;` may be used instead of a newline between rows.
//!
//! # Environment variable overrides
//!
//! | Variable        | Description                                   |
//! |-----------------|-----------------------------------------------|
//! | `BANKER_CONFIG` | Config file path (same as `--config`)         |
//! | `BANKER_FORMAT` | Output format (same as `--format`)            |
//! | `RUST_LOG`      | Log filter; overrides `[logging] log_level`   |
//!
//! # Exit codes
//!
//! `0` on success, `1` on any error, and `2` with `--strict` when the state
//! is unsafe or deadlocked.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use banker_core::{PreventionStrategy, RecoveryStrategy};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

use banker_cli::application::analyze::{run_deadlock, run_safety, AnalysisContext};
use banker_cli::application::strategies::{apply_prevention, apply_recovery};
use banker_cli::domain::report::StrategyReport;
use banker_cli::infrastructure::config::{load_config, CliConfig, OutputFormat};
use banker_cli::infrastructure::input::{InputSource, RawInput, SnapshotFile, TextInput};
use banker_cli::infrastructure::render;

const EXIT_UNSAFE: u8 = 2;
const DEFAULT_LOG_LEVEL: &str = "warn";

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Banker's Algorithm safety and deadlock analysis.
#[derive(Debug, Parser)]
#[command(name = "banker", about = "Banker's Algorithm safety and deadlock analysis", version)]
struct Cli {
    /// Configuration file.  Defaults to `./banker.toml` when present.
    #[arg(long, global = true, env = "BANKER_CONFIG")]
    config: Option<PathBuf>,

    /// Output format.  Overrides `[output] format` from the config file.
    #[arg(long, global = true, value_enum, env = "BANKER_FORMAT")]
    format: Option<OutputFormat>,

    /// Exit with status 2 when the state is unsafe or deadlocked.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the Banker's safety check on Allocation, Max and Available.
    Safety {
        #[command(flatten)]
        input: InputArgs,

        /// Replay the returned sequence to confirm it is valid.
        #[arg(long)]
        verify: bool,
    },

    /// Run deadlock detection on Allocation and Available.
    Deadlock {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Explain a prevention strategy: mutual-exclusion, hold-wait,
    /// no-preemption or circular-wait.
    Prevent {
        strategy: PreventionStrategy,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Explain a recovery strategy: process-termination or resource-preemption.
    Recover {
        strategy: RecoveryStrategy,

        #[command(flatten)]
        input: InputArgs,
    },
}

/// Where the Allocation / Max / Available numbers come from.
#[derive(Debug, Args)]
struct InputArgs {
    /// TOML snapshot file with `allocation`, `max` and `available` strings.
    #[arg(long = "input", value_name = "FILE", conflicts_with_all = ["allocation", "max", "available"])]
    file: Option<PathBuf>,

    /// Allocation matrix: rows separated by newlines or `;`, values by `,`.
    #[arg(long)]
    allocation: Option<String>,

    /// Max matrix, same encoding as `--allocation`.
    #[arg(long)]
    max: Option<String>,

    /// Available vector: comma-separated values.
    #[arg(long)]
    available: Option<String>,
}

impl InputArgs {
    /// Builds the [`InputSource`] selected by the flags.
    fn into_source(self) -> Box<dyn InputSource> {
        match self.file {
            Some(path) => Box::new(SnapshotFile::new(path)),
            None => Box::new(TextInput {
                allocation: self.allocation.map(rows_from_flag),
                max: self.max.map(rows_from_flag),
                available: self.available,
            }),
        }
    }
}

/// Allows `;` as a row separator where newlines are awkward to type.
fn rows_from_flag(text: String) -> String {
    text.replace(';', "\n")
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG (or the default level) is in force while the config file is
    // read; the configured level replaces it afterwards unless RUST_LOG is set.
    let env_filter = EnvFilter::try_from_default_env().ok();
    let has_env_filter = env_filter.is_some();
    let (filter, filter_handle) =
        reload::Layer::new(env_filter.unwrap_or_else(|| level_filter(DEFAULT_LOG_LEVEL)));

    // Logs go to stderr so that stdout stays parseable with `--format json`.
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    if !has_env_filter {
        filter_handle
            .reload(level_filter(&config.logging.log_level))
            .context("failed to apply configured log level")?;
    }

    let format = cli.format.unwrap_or(config.output.format);
    debug!(?format, command = ?cli.command, "starting");

    run(cli.command, format, cli.strict, &config)
}

/// Builds the filter for a configured level, falling back to
/// [`DEFAULT_LOG_LEVEL`] when the directive does not parse.
fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Executes one subcommand and prints its report.
fn run(
    command: Command,
    format: OutputFormat,
    strict: bool,
    config: &CliConfig,
) -> anyhow::Result<ExitCode> {
    let show_details = config.output.show_details;
    let mut ctx = AnalysisContext::new();

    match command {
        Command::Safety { input, verify } => {
            let source = input.into_source();
            let report = run_safety(&mut ctx, source.as_ref(), verify)?;
            emit(format, &report, || render::render_safety_text(&report, &ctx, show_details))?;
            Ok(exit_status(strict, report.safe))
        }
        Command::Deadlock { input } => {
            let source = input.into_source();
            let report = run_deadlock(&mut ctx, source.as_ref())?;
            emit(format, &report, || render::render_deadlock_text(&report, &ctx, show_details))?;
            Ok(exit_status(strict, !report.deadlocked))
        }
        Command::Prevent { strategy, input } => {
            load_state(&mut ctx, input)?;
            let report = apply_prevention(&ctx, strategy)?;
            emit_strategy(format, &report)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Recover { strategy, input } => {
            load_state(&mut ctx, input)?;
            let report = apply_recovery(&ctx, strategy)?;
            emit_strategy(format, &report)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Loads the state the strategy commands refer to.
///
/// A full triple goes through the safety check; Allocation and Available
/// alone go through deadlock detection.
fn load_state(ctx: &mut AnalysisContext, input: InputArgs) -> anyhow::Result<()> {
    let raw: RawInput = input.into_source().read()?;
    if raw.max.is_some() {
        run_safety(ctx, &raw, false)?;
    } else {
        run_deadlock(ctx, &raw)?;
    }
    Ok(())
}

fn emit<T, F>(format: OutputFormat, report: &T, text: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    let output = match format {
        OutputFormat::Text => text(),
        OutputFormat::Json => render::render_json(report).context("failed to serialize report")?,
    };
    println!("{output}");
    Ok(())
}

fn emit_strategy(format: OutputFormat, report: &StrategyReport) -> anyhow::Result<()> {
    emit(format, report, || render::render_strategy_text(report))
}

fn exit_status(strict: bool, ok: bool) -> ExitCode {
    ExitCode::from(exit_code(strict, ok))
}

fn exit_code(strict: bool, ok: bool) -> u8 {
    if strict && !ok {
        EXIT_UNSAFE
    } else {
        0
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
