//! Config command - configuration management.

use anyhow::{Context as _, Result, bail};
use clap::{Args, Subcommand};
use console::Style;

use super::Context;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write a config file with defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            if ctx.json_output {
                println!("{}", serde_json::to_string_pretty(&ctx.config)?);
            } else {
                print!("{}", ctx.config.to_toml()?);
            }
        }
        ConfigCommand::Path => match &ctx.config_path {
            Some(path) => println!("{}", path.display()),
            None => bail!("could not determine config directory"),
        },
        ConfigCommand::Init { force } => {
            let path = ctx
                .config_path
                .as_deref()
                .context("could not determine config directory")?;
            if path.exists() && !force {
                bail!(
                    "config file already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            teams_config::save_config_to(&teams_config::TeamsConfig::default(), path)?;
            let green = Style::new().green();
            println!("{} Wrote {}", green.apply_to("✓"), path.display());
        }
    }
    Ok(())
}
