//! Client configuration file.
//!
//! ```toml
//! region = "emea"
//! display-name = "Ada"
//! strict-decode = false
//! debug-save = true
//! dump-dir = "~/.cache/teams/responses"
//! timeout = 30
//!
//! [auth.bearer]
//! file = "~/.config/teams/bearer.token"
//! env = "TEAMS_BEARER_TOKEN"
//!
//! [auth.skype]
//! env = "TEAMS_SKYPE_TOKEN"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use teams_client::Region;

use crate::paths::{config_path, expand_path};
use crate::{ConfigError, Result};

/// Default environment variable for the bearer token.
pub const BEARER_TOKEN_ENV: &str = "TEAMS_BEARER_TOKEN";

/// Default environment variable for the skype token.
pub const SKYPE_TOKEN_ENV: &str = "TEAMS_SKYPE_TOKEN";

// ─────────────────────────────────────────────────────────────────────────────
// Root config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TeamsConfig {
    /// Deployment region (`emea`, `amer`, `apac`).
    pub region: Region,

    /// Override for the messages endpoint base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages_url: Option<String>,

    /// `imdisplayname` sent with new messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Reject responses carrying fields the client does not model.
    pub strict_decode: bool,

    /// Save raw response bodies before decoding.
    pub debug_save: bool,

    /// Where saved response bodies go.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dump_dir: Option<PathBuf>,

    /// Request timeout in seconds; 0 disables it.
    pub timeout: u64,

    /// Token sources.
    pub auth: AuthConfig,
}

impl Default for TeamsConfig {
    fn default() -> Self {
        Self {
            region: Region::default(),
            messages_url: None,
            display_name: None,
            strict_decode: false,
            debug_save: false,
            dump_dir: None,
            timeout: 30,
            auth: AuthConfig::default(),
        }
    }
}

impl TeamsConfig {
    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Dump directory with `~` expanded.
    pub fn dump_dir(&self) -> Option<PathBuf> {
        self.dump_dir.as_deref().map(expand_path)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authentication
// ─────────────────────────────────────────────────────────────────────────────

/// Where session tokens come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AuthConfig {
    /// Bearer token for the chat service. Required.
    pub bearer: TokenSource,
    /// Skype token. Optional.
    pub skype: TokenSource,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bearer: TokenSource::env(BEARER_TOKEN_ENV),
            skype: TokenSource::env(SKYPE_TOKEN_ENV),
        }
    }
}

/// A token read from a file or an environment variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TokenSource {
    /// File containing the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Environment variable containing the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
}

impl TokenSource {
    /// Source reading an environment variable.
    pub fn env(var: impl Into<String>) -> Self {
        Self {
            file: None,
            env: Some(var.into()),
        }
    }

    /// Source reading a file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
            env: None,
        }
    }

    /// Resolve the token. The file wins over the environment variable.
    pub fn resolve(&self) -> Result<Option<String>> {
        if let Some(path) = &self.file {
            let expanded = expand_path(path);
            if expanded.exists() {
                let token = std::fs::read_to_string(&expanded)
                    .map_err(|e| ConfigError::ReadFile {
                        path: expanded.display().to_string(),
                        source: e,
                    })?
                    .trim()
                    .to_string();
                if !token.is_empty() {
                    return Ok(Some(token));
                }
            }
        }
        if let Some(var) = &self.env
            && let Ok(token) = std::env::var(var)
            && !token.is_empty()
        {
            return Ok(Some(token));
        }
        Ok(None)
    }
}

/// Tokens read from their configured sources.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedTokens {
    pub bearer: String,
    pub skype: Option<String>,
}

impl fmt::Debug for ResolvedTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedTokens")
            .field("bearer", &"<redacted>")
            .field("skype", &self.skype.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AuthConfig {
    /// Resolve both tokens. A missing bearer token is an error.
    pub fn resolve(&self) -> Result<ResolvedTokens> {
        let bearer = self
            .bearer
            .resolve()?
            .ok_or_else(|| ConfigError::TokenNotFound {
                name: "bearer".to_string(),
                env_var: self
                    .bearer
                    .env
                    .clone()
                    .unwrap_or_else(|| BEARER_TOKEN_ENV.to_string()),
            })?;
        let skype = self.skype.resolve()?;
        Ok(ResolvedTokens { bearer, skype })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading / Saving
// ─────────────────────────────────────────────────────────────────────────────

/// Load the configuration from the default location.
///
/// Returns a default config if the file doesn't exist.
pub fn load_config() -> Result<TeamsConfig> {
    load_config_from(config_path().as_deref())
}

/// Load config from a specific path.
pub fn load_config_from(path: Option<&Path>) -> Result<TeamsConfig> {
    let Some(path) = path else {
        return Ok(TeamsConfig::default());
    };

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(TeamsConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), "loaded config file");
    TeamsConfig::from_toml(&contents)
}

/// Save config to a specific path.
pub fn save_config_to(config: &TeamsConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let contents = config.to_toml()?;
    std::fs::write(path, contents).map_err(|e| ConfigError::WriteFile {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TeamsConfig::default();
        assert_eq!(config.region, Region::Emea);
        assert!(!config.strict_decode);
        assert!(!config.debug_save);
        assert_eq!(config.timeout, 30);
        assert_eq!(config.auth.bearer.env.as_deref(), Some(BEARER_TOKEN_ENV));
        assert_eq!(config.auth.skype.env.as_deref(), Some(SKYPE_TOKEN_ENV));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(TeamsConfig::from_toml("").unwrap(), TeamsConfig::default());
    }

    #[test]
    fn test_parse_full() {
        let toml = r#"
region = "amer"
messages-url = "http://127.0.0.1:9000/v1"
display-name = "Ada"
strict-decode = true
debug-save = true
dump-dir = "/tmp/teams"
timeout = 0

[auth.bearer]
file = "/run/secrets/bearer"

[auth.skype]
env = "MY_SKYPE"
"#;
        let config = TeamsConfig::from_toml(toml).unwrap();
        assert_eq!(config.region, Region::Amer);
        assert_eq!(config.messages_url.as_deref(), Some("http://127.0.0.1:9000/v1"));
        assert_eq!(config.display_name.as_deref(), Some("Ada"));
        assert!(config.strict_decode);
        assert!(config.debug_save);
        assert_eq!(config.dump_dir(), Some(PathBuf::from("/tmp/teams")));
        assert_eq!(config.timeout, 0);
        assert_eq!(config.auth.bearer, TokenSource::file("/run/secrets/bearer"));
        assert_eq!(config.auth.skype, TokenSource::env("MY_SKYPE"));
    }

    #[test]
    fn test_parse_rejects_bad_types() {
        let err = TeamsConfig::from_toml("strict-decode = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_unknown_region() {
        let err = TeamsConfig::from_toml("region = \"mars\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("mars"));
    }

    #[test]
    fn test_unknown_region_rejected_at_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "region = \"mars\"\n").unwrap();
        assert!(matches!(
            load_config_from(Some(&path)),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_token_file_wins_over_env() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("bearer");
        std::fs::write(&file, "from-file\n").unwrap();

        // SAFETY: Test-specific env var
        unsafe {
            std::env::set_var("TEST_TEAMS_FILE_WINS", "from-env");
        }
        let source = TokenSource {
            file: Some(file),
            env: Some("TEST_TEAMS_FILE_WINS".to_string()),
        };
        assert_eq!(source.resolve().unwrap().as_deref(), Some("from-file"));
        // SAFETY: Cleanup test env var
        unsafe {
            std::env::remove_var("TEST_TEAMS_FILE_WINS");
        }
    }

    #[test]
    fn test_token_env_fallback() {
        // SAFETY: Test-specific env var
        unsafe {
            std::env::set_var("TEST_TEAMS_ENV_FALLBACK", "secret123");
        }
        let source = TokenSource {
            file: Some(PathBuf::from("/nonexistent/teams/token")),
            env: Some("TEST_TEAMS_ENV_FALLBACK".to_string()),
        };
        assert_eq!(source.resolve().unwrap().as_deref(), Some("secret123"));
        // SAFETY: Cleanup test env var
        unsafe {
            std::env::remove_var("TEST_TEAMS_ENV_FALLBACK");
        }
    }

    #[test]
    fn test_missing_bearer_is_error() {
        let auth = AuthConfig {
            bearer: TokenSource::env("TEST_TEAMS_UNSET_BEARER"),
            skype: TokenSource::default(),
        };
        match auth.resolve().unwrap_err() {
            ConfigError::TokenNotFound { name, env_var } => {
                assert_eq!(name, "bearer");
                assert_eq!(env_var, "TEST_TEAMS_UNSET_BEARER");
            }
            other => panic!("expected TokenNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_without_skype() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("bearer");
        std::fs::write(&file, "abc").unwrap();

        let auth = AuthConfig {
            bearer: TokenSource::file(&file),
            skype: TokenSource::default(),
        };
        let tokens = auth.resolve().unwrap();
        assert_eq!(tokens.bearer, "abc");
        assert!(tokens.skype.is_none());
        assert!(!format!("{tokens:?}").contains("abc"));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = load_config_from(Some(&tmp.path().join("absent.toml"))).unwrap();
        assert_eq!(config, TeamsConfig::default());
        assert_eq!(load_config_from(None).unwrap(), TeamsConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.toml");

        let config = TeamsConfig {
            region: Region::Apac,
            debug_save: true,
            dump_dir: Some(PathBuf::from("/tmp/dumps")),
            ..Default::default()
        };
        save_config_to(&config, &path).unwrap();

        let loaded = load_config_from(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }
}
