//! `GameBridge` CLI
//!
//! Inspect and exercise the renderer bridge channel contracts.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;

use gamebridge_cli::{channels_cmd, check_cmd, replay_cmd, resolve_profile};
use gamebridge_core::Direction;
use gamebridge_core::config::load_config;
use gamebridge_core::tracing_init::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "gamebridge")]
#[command(version, about = "Renderer bridge channel authorizer", long_about = None)]
struct Cli {
    /// Explicit JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level filter (overrides config)
    #[arg(long, global = true, env = "GAMEBRIDGE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Emit JSON log lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the allow-lists of the bridges
    Channels {
        /// Only this bridge
        #[arg(long)]
        bridge: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check whether a bridge permits a channel in a direction
    Check {
        #[arg(long)]
        bridge: String,
        /// send, invoke or receive
        #[arg(long)]
        direction: Direction,
        channel: String,
    },
    /// Replay an NDJSON request file through a bridge
    Replay {
        #[arg(long)]
        bridge: String,
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    let log_json = cli.log_json || config.logging.json;
    let level = &config.logging.level;
    init_tracing(
        &format!("gamebridge={level},gamebridge_core={level}"),
        log_json,
    );

    info!(version = env!("CARGO_PKG_VERSION"), "Starting gamebridge CLI");

    let mut stdout = std::io::stdout().lock();
    let code = match cli.command {
        Commands::Channels { bridge, json } => {
            let profile = bridge.as_deref().map(resolve_profile).transpose()?;
            channels_cmd::run(profile, json, &mut stdout)?;
            ExitCode::SUCCESS
        }
        Commands::Check {
            bridge,
            direction,
            channel,
        } => {
            let profile = resolve_profile(&bridge)?;
            if check_cmd::run(profile, direction, &channel, &mut stdout)? {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Replay { bridge, file } => {
            let profile = resolve_profile(&bridge)?;
            let summary = replay_cmd::run_path(
                profile,
                &file,
                config.transport.queue_capacity,
                &mut stdout,
            )
            .await?;
            writeln!(
                stdout,
                "{} forwarded, {} denied, {} failed, {} malformed",
                summary.forwarded, summary.denied, summary.failed, summary.malformed
            )?;
            ExitCode::SUCCESS
        }
    };
    stdout.flush()?;
    Ok(code)
}
