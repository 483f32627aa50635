//! Configuration for the Teams chat service client.
//!
//! A single TOML file (`$XDG_CONFIG_HOME/teams/config.toml` by default)
//! selects the region, optional endpoint overrides, decode/diagnostic flags,
//! and where the session tokens are read from. A missing file means defaults.

pub mod config;
pub mod error;
pub mod paths;

pub use config::{
    AuthConfig, ResolvedTokens, TeamsConfig, TokenSource, load_config, load_config_from,
    save_config_to,
};
pub use error::{ConfigError, Result};
pub use paths::{config_dir, config_path, expand_path};
