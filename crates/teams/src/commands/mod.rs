//! CLI command handlers.

use std::path::PathBuf;

use teams_config::TeamsConfig;

pub mod config;
pub mod messages;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration with command-line overrides applied.
    pub config: TeamsConfig,
    /// Where the configuration was looked up.
    pub config_path: Option<PathBuf>,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}
