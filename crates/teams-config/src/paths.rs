//! Config file locations.

use std::path::{Path, PathBuf};

/// Application directory name under the platform config dir.
const APP_NAME: &str = "teams";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "TEAMS_CONFIG_DIR";

/// Default config filename.
const CONFIG_FILE: &str = "config.toml";

/// Directory holding the config file.
///
/// `TEAMS_CONFIG_DIR` wins over the platform config dir.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Path of the default config file.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join(CONFIG_FILE))
}

/// Expand ~ to home directory in paths.
pub fn expand_path(path: &Path) -> PathBuf {
    if let Some(s) = path.to_str()
        && let Some(rest) = s.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path() {
        let path = PathBuf::from("~/tokens/bearer");
        let expanded = expand_path(&path);
        if dirs::home_dir().is_some() {
            assert!(!expanded.to_str().unwrap().starts_with("~/"));
            assert!(expanded.ends_with("tokens/bearer"));
        }

        let absolute = PathBuf::from("/absolute/path");
        assert_eq!(expand_path(&absolute), absolute);
    }

    #[test]
    fn test_config_path_file_name() {
        if let Some(path) = config_path() {
            assert_eq!(path.file_name().unwrap(), CONFIG_FILE);
        }
    }
}
