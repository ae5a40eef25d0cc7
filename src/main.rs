//! Banker CLI - evaluates resource requests against a JSON system state.
//!
//! Commands:
//! - check: is the current state safe?
//! - evaluate: would granting a request keep the state safe?
//!
//! Exit status is 0 when safe/admitted, 2 when refused, 1 on error.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use banker_core::banker::Units;
use banker_core::{Banker, BankerResult, Config, Error, Request, Result, SystemState};

#[derive(Debug, Parser)]
#[command(name = "banker", version, about = "Banker's Algorithm admission checks")]
struct Cli {
    /// JSON configuration file.
    #[arg(long, global = true, env = "BANKER_CONFIG")]
    config: Option<PathBuf>,

    /// Scoring strategy (release-weighted or uniform).
    #[arg(long, global = true)]
    scoring: Option<String>,

    /// Print the full result as JSON instead of the trace.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check whether the system state is safe.
    Check {
        /// JSON file holding a SystemState.
        #[arg(long)]
        state: PathBuf,
    },
    /// Evaluate a request for additional resources.
    Evaluate {
        /// JSON file holding a SystemState.
        #[arg(long)]
        state: PathBuf,

        /// Index of the requesting process.
        #[arg(long)]
        process: usize,

        /// Requested units per resource, comma separated (e.g. 1,0,2).
        #[arg(long, value_delimiter = ',', required = true)]
        request: Vec<Units>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(result) if result.is_safe => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(2),
        Err(err) => {
            tracing::error!(error = %err, "evaluation failed");
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<BankerResult> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    }
    .apply_env()?;
    if let Some(strategy) = &cli.scoring {
        config.scoring.strategy = strategy.parse()?;
    }

    banker_core::observability::init_tracing(&config.observability);
    let banker = Banker::new(config);

    let result = match &cli.command {
        Command::Check { state } => banker.check(&load_state(state)?)?,
        Command::Evaluate {
            state,
            process,
            request,
        } => banker.evaluate(&load_state(state)?, &Request::new(*process, request.clone()))?,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for step in &result.steps {
            println!("{step}");
        }
        println!();
        println!("{}", result.result_message);
    }
    Ok(result)
}

/// Read a state file; a missing `available` vector is derived from the resources.
fn load_state(path: &Path) -> Result<SystemState> {
    let raw = std::fs::read_to_string(path)?;
    let mut state: SystemState = serde_json::from_str(&raw)?;
    if state.available.is_empty() {
        state.available = state.resources.iter().map(|r| r.available).collect();
    }
    if state.available.len() != state.resources.len() {
        return Err(Error::validation(format!(
            "{}: available has {} entries for {} resources",
            path.display(),
            state.available.len(),
            state.resources.len()
        )));
    }
    Ok(state)
}
