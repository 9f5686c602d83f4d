mod commands;
mod runtime;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hypr_storage::TranscriptVault;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::runtime::VaultRuntime;

#[derive(Parser)]
#[command(name = "caption-edit", about = "Correct caption text without losing word timing")]
struct Cli {
    /// Directory holding `transcripts/<job>.json`. Defaults to the platform data dir.
    #[arg(long, env = "CAPTION_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List jobs that have a stored transcript
    Jobs,
    /// Print a job's cues
    Show {
        job_id: String,
        /// Mark the cue active at this playback time (seconds)
        #[arg(long)]
        at: Option<f64>,
        /// Also print per-word timing
        #[arg(long)]
        words: bool,
    },
    /// Replace a cue's text and save it
    Edit {
        job_id: String,
        #[arg(long)]
        index: usize,
        #[arg(long)]
        text: String,
    },
    /// Reflow a single cue given as JSON and print the result
    Reflow {
        #[arg(long)]
        cue: String,
        #[arg(long)]
        text: String,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_runtime(data_dir: Option<PathBuf>) -> anyhow::Result<VaultRuntime> {
    let base = hypr_storage::global::resolve_base(data_dir)?;
    tracing::debug!(base = %base.display(), "using_data_dir");
    Ok(VaultRuntime::new(TranscriptVault::new(base)))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Jobs => commands::jobs::run(&open_runtime(cli.data_dir)?).await,
        Commands::Show { job_id, at, words } => {
            let runtime = open_runtime(cli.data_dir)?;
            commands::show::run(&runtime, commands::show::Args { job_id, at, words }).await
        }
        Commands::Edit {
            job_id,
            index,
            text,
        } => {
            let runtime = open_runtime(cli.data_dir)?;
            commands::edit::run(&runtime, commands::edit::Args { job_id, index, text }).await
        }
        Commands::Reflow { cue, text } => {
            commands::reflow::run(commands::reflow::Args { cue, text })
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(error) = run(Cli::parse()).await {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
