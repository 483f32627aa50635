//! teams - read and post Teams chat messages from the shell
//!
//! Main entry point for the teams CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use teams_client::Region;

mod client;
mod commands;

use commands::{config, messages};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// teams - read and post Teams chat messages from the shell
#[derive(Parser)]
#[command(name = "teams")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: $XDG_CONFIG_HOME/teams/config.toml)
    #[arg(long, global = true, env = "TEAMS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Region override: emea, amer or apac
    #[arg(long, global = true)]
    pub region: Option<Region>,

    /// Fail on response fields the client does not know about
    #[arg(long, global = true)]
    pub strict: bool,

    /// Save raw response bodies before decoding
    #[arg(long, global = true)]
    pub debug_save: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the latest messages in a channel
    Messages(messages::FetchArgs),

    /// Post a message to a channel
    Send(messages::SendArgs),

    /// React to a message
    React(messages::ReactionArgs),

    /// Remove a reaction from a message
    Unreact(messages::ReactionArgs),

    /// Soft-delete a message
    Delete(messages::DeleteArgs),

    /// Configuration management
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "teams=debug,teams_client=debug,teams_config=debug,info"
    } else {
        "teams=info,teams_client=info,warn"
    };

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
                ),
        )
        .init();

    let config_path = cli.config.clone().or_else(teams_config::config_path);
    let mut config = teams_config::load_config_from(config_path.as_deref())?;
    if let Some(region) = cli.region {
        config.region = region;
    }
    config.strict_decode |= cli.strict;
    config.debug_save |= cli.debug_save;

    let ctx = commands::Context {
        config,
        config_path,
        json_output: cli.json,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Messages(args) => messages::fetch(args, &ctx),
        Commands::Send(args) => messages::send(args, &ctx),
        Commands::React(args) => messages::react(args, &ctx),
        Commands::Unreact(args) => messages::unreact(args, &ctx),
        Commands::Delete(args) => messages::delete(args, &ctx),
        Commands::Config(args) => config::run(args, &ctx),
    }
}
