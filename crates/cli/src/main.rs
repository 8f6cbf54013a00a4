//! `bbsim` — runs a BatBridge program image under one of the three
//! simulator variants.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use batbridge_core::engine::{Memory, ProcessorState};
use batbridge_core::image;
use batbridge_core::sim::{run, RunOutcome, Variant};

/// Default cycle bound for the single-cycle driver. Pipelined and
/// predicted variants add a small drain margin on top, since the last
/// instruction retires a few cycles after the program counter reaches it.
const DEFAULT_BOUND: u32 = 100_000;
const DRAIN_MARGIN: u32 = 8;

#[derive(Parser, Debug)]
#[command(name = "bbsim", version, about = "Runs BatBridge program images")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increases log verbosity; repeat for more detail (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Runs a program image to completion or until the cycle bound is hit.
    Run {
        /// Path to a program-image JSON document.
        program_file: PathBuf,

        /// Which simulator variant to run.
        #[arg(long, value_enum, default_value_t = VariantArg::Single)]
        variant: VariantArg,

        /// External cycle bound. Defaults scale with the chosen variant.
        #[arg(long)]
        bound: Option<u32>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum VariantArg {
    Single,
    Pipelined,
    Predicted,
}

impl std::fmt::Display for VariantArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Single => "single",
            Self::Pipelined => "pipelined",
            Self::Predicted => "predicted",
        };
        f.write_str(name)
    }
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Single => Self::Single,
            VariantArg::Pipelined => Self::Pipelined,
            VariantArg::Predicted => Self::Predicted,
        }
    }
}

fn default_bound(variant: Variant) -> u32 {
    match variant {
        Variant::Single => DEFAULT_BOUND,
        Variant::Pipelined | Variant::Predicted => DEFAULT_BOUND + DRAIN_MARGIN,
    }
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Loads a program image and returns its run outcome, or the `SimError`
/// that aborted it. Kept separate from `main` so the exit-code mapping
/// below is the only place that has to know about `SimError` vs. a plain
/// `anyhow::Error` (file I/O, malformed JSON).
fn load_and_run(program_file: &PathBuf, variant: Variant, bound: u32) -> Result<RunOutcome> {
    let json = fs::read_to_string(program_file).with_context(|| format!("reading {}", program_file.display()))?;
    let entries = image::parse(&json).with_context(|| format!("parsing {}", program_file.display()))?;

    let mut memory = Memory::new();
    memory.load(entries);
    let mut state = ProcessorState::new(memory);
    if variant.needs_predictor() {
        state = state.with_predictor();
    }

    run(&mut state, variant, bound).context("simulator trapped")
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Command::Run {
        program_file,
        variant,
        bound,
    } = cli.command;
    let bound = bound.unwrap_or_else(|| default_bound(variant.into()));

    match load_and_run(&program_file, variant.into(), bound) {
        Ok(RunOutcome::Halted { cycles }) => {
            println!("halted after {cycles} cycles");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::BoundReached { cycles }) => {
            eprintln!("did not halt within {cycles} cycles");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}
