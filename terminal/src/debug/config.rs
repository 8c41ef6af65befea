//! Debug configuration from environment variables

use std::path::PathBuf;

use crate::config::ClientConfig;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "papertrade=info,warn";

/// Log file name prefix; the appender adds the date suffix.
pub const LOG_FILE_NAME: &str = "papertrade.log";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// Log directory (for rotation)
    pub log_dir: PathBuf,
    /// Log level filter (e.g., "papertrade=debug,info")
    pub log_level: String,
    /// Mirror log output to stderr
    pub log_to_stderr: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_to_stderr: cfg!(debug_assertions),
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            log_dir: lookup("PAPERTRADE_LOG_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: lookup("RUST_LOG")
                .filter(|level| !level.trim().is_empty())
                .unwrap_or(defaults.log_level),
            log_to_stderr: lookup("PAPERTRADE_LOG_STDERR")
                .map(|v| v == "1")
                .unwrap_or(defaults.log_to_stderr),
        }
    }

    /// Environment settings with the log directory taken from the client config.
    pub fn for_client(config: &ClientConfig) -> Self {
        Self {
            log_dir: config.log_dir.clone(),
            ..Self::from_env()
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        let config = DebugConfig::from_lookup(|_| None);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(!config.is_debug_enabled());
    }

    #[test]
    fn environment_overrides() {
        let config = DebugConfig::from_lookup(|key| match key {
            "PAPERTRADE_LOG_DIR" => Some("/var/log/papertrade".to_string()),
            "RUST_LOG" => Some("papertrade=debug".to_string()),
            "PAPERTRADE_LOG_STDERR" => Some("0".to_string()),
            _ => None,
        });
        assert_eq!(config.log_file(), PathBuf::from("/var/log/papertrade/papertrade.log"));
        assert!(config.is_debug_enabled());
        assert!(!config.log_to_stderr);
    }
}
