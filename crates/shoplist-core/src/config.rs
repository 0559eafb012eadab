//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/shoplist/config.toml)
//! 3. Environment variables (SHOPLIST_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
const ENV_PREFIX: &str = "SHOPLIST";

/// Slots reserved up front for a new store
pub const DEFAULT_INITIAL_CAPACITY: usize = 10;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of items a new store holds before it grows
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,

    /// File to write logs to (stderr when unset)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (SHOPLIST_INITIAL_CAPACITY, SHOPLIST_LOG_FILE)
    /// 2. Config file (~/.config/shoplist/config.toml or SHOPLIST_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring an explicit path from the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.normalize();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        config.normalize();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // SHOPLIST_INITIAL_CAPACITY
        if let Ok(val) = std::env::var(format!("{}_INITIAL_CAPACITY", ENV_PREFIX)) {
            if let Ok(capacity) = val.trim().parse() {
                self.initial_capacity = capacity;
            }
        }

        // SHOPLIST_LOG_FILE
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }
    }

    fn normalize(&mut self) {
        if self.initial_capacity == 0 {
            self.initial_capacity = 1;
        }
    }

    /// Get the config file path
    ///
    /// Can be overridden with SHOPLIST_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shoplist")
            .join("config.toml")
    }
}

fn default_initial_capacity() -> usize {
    DEFAULT_INITIAL_CAPACITY
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "SHOPLIST_INITIAL_CAPACITY",
        "SHOPLIST_LOG_FILE",
        "SHOPLIST_CONFIG",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.initial_capacity, 10);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_env_override_initial_capacity() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("SHOPLIST_INITIAL_CAPACITY", "64");
        config.apply_env_overrides();
        assert_eq!(config.initial_capacity, 64);

        // Unparsable values are ignored
        env::set_var("SHOPLIST_INITIAL_CAPACITY", "lots");
        config.apply_env_overrides();
        assert_eq!(config.initial_capacity, 64);
    }

    #[test]
    fn test_env_override_log_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("SHOPLIST_LOG_FILE", "/tmp/shoplist.log");
        config.apply_env_overrides();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/shoplist.log")));

        // Empty string clears it
        env::set_var("SHOPLIST_LOG_FILE", "");
        config.apply_env_overrides();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            initial_capacity = 32
            log_file = "/var/log/shoplist.log"
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.initial_capacity, 32);
        assert_eq!(config.log_file, Some(PathBuf::from("/var/log/shoplist.log")));
    }

    #[test]
    fn test_zero_capacity_is_coerced() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config::load_from_str("initial_capacity = 0").unwrap();
        assert_eq!(config.initial_capacity, 1);
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_path_reads_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "initial_capacity = 4\n").unwrap();

        let config = Config::load_with_cli_override(Some(&path)).unwrap();
        assert_eq!(config.initial_capacity, 4);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_load_from_path_invalid_toml() {
        let _guard = EnvGuard::new(ENV_VARS);

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "initial_capacity = [").unwrap();

        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn test_config_file_path_env_override() {
        let _guard = EnvGuard::new(ENV_VARS);

        env::set_var("SHOPLIST_CONFIG", "/etc/shoplist.toml");
        assert_eq!(Config::config_file_path(), PathBuf::from("/etc/shoplist.toml"));
    }
}
