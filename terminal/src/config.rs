//! # Client Configuration
//!
//! Runtime configuration loaded from environment variables (after `.env` is
//! read by `dotenvy` in `main`). Values are validated on startup so a bad URL
//! or a zero polling interval fails fast instead of misbehaving later.
//!
//! | Variable                          | Default                      |
//! |-----------------------------------|------------------------------|
//! | `PAPERTRADE_API_URL`              | `http://localhost:3001/api`  |
//! | `PAPERTRADE_WS_URL`               | origin of the API URL        |
//! | `PAPERTRADE_SESSION_FILE`         | `./papertrade-session.json`  |
//! | `PAPERTRADE_PRICE_POLL_SECS`      | `5`                          |
//! | `PAPERTRADE_TRADES_POLL_SECS`     | `30`                         |
//! | `PAPERTRADE_REQUEST_TIMEOUT_SECS` | `10`                         |
//! | `PAPERTRADE_LOG_DIR`              | `logs`                       |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_SESSION_FILE: &str = "./papertrade-session.json";

/// Engine.IO v4 WebSocket transport path served by Socket.IO servers.
pub const ENGINE_IO_PATH: &str = "/socket.io/?EIO=4&transport=websocket";

/// Client configuration loaded from environment variables.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Base URL every REST path is appended to
    pub api_url: String,
    /// Explicit push-channel URL; derived from `api_url` when unset
    pub ws_url: Option<String>,
    /// Where the token and user record are persisted between runs
    pub session_file: PathBuf,
    /// Live price REST poll interval
    pub price_poll_secs: u64,
    /// Trade list refresh interval
    pub trades_poll_secs: u64,
    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,
    /// Directory for rolling log files
    pub log_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            ws_url: None,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            price_poll_secs: 5,
            trades_poll_secs: 30,
            request_timeout_secs: 10,
            log_dir: PathBuf::from("logs"),
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("{} must be a valid number: {}", key, e)),
        None => Ok(default),
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("PAPERTRADE_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let ws_url = lookup("PAPERTRADE_WS_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let session_file = lookup("PAPERTRADE_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.session_file);

        let log_dir = lookup("PAPERTRADE_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_dir);

        Ok(Self {
            api_url,
            ws_url,
            session_file,
            price_poll_secs: parse_var(&lookup, "PAPERTRADE_PRICE_POLL_SECS", defaults.price_poll_secs)?,
            trades_poll_secs: parse_var(&lookup, "PAPERTRADE_TRADES_POLL_SECS", defaults.trades_poll_secs)?,
            request_timeout_secs: parse_var(
                &lookup,
                "PAPERTRADE_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            log_dir,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(format!("PAPERTRADE_API_URL must be an http(s) URL, got '{}'", self.api_url));
        }

        if let Some(ws) = &self.ws_url {
            if !(ws.starts_with("ws://") || ws.starts_with("wss://")) {
                return Err(format!("PAPERTRADE_WS_URL must be a ws(s) URL, got '{}'", ws));
            }
        }

        if self.price_poll_secs == 0 {
            return Err("PAPERTRADE_PRICE_POLL_SECS must be greater than 0".to_string());
        }
        if self.trades_poll_secs == 0 {
            return Err("PAPERTRADE_TRADES_POLL_SECS must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("PAPERTRADE_REQUEST_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// `from_env` followed by `validate`.
    pub fn load() -> Result<Self, String> {
        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Socket.IO WebSocket endpoint of the push channel.
    ///
    /// The server is the origin of `api_url` (any path is dropped) unless
    /// `ws_url` names one explicitly.
    pub fn price_stream_url(&self) -> String {
        let base = self.ws_url.as_deref().unwrap_or(&self.api_url);
        if base.contains("/socket.io") {
            return base.to_string();
        }
        let (scheme, rest) = if let Some(rest) = base.strip_prefix("https://") {
            ("wss", rest)
        } else if let Some(rest) = base.strip_prefix("http://") {
            ("ws", rest)
        } else if let Some(rest) = base.strip_prefix("wss://") {
            ("wss", rest)
        } else if let Some(rest) = base.strip_prefix("ws://") {
            ("ws", rest)
        } else {
            ("ws", base)
        };
        let host = rest.split('/').next().unwrap_or(rest);
        format!("{}://{}{}", scheme, host, ENGINE_IO_PATH)
    }

    pub fn price_poll_interval(&self) -> Duration {
        Duration::from_secs(self.price_poll_secs)
    }

    pub fn trades_poll_interval(&self) -> Duration {
        Duration::from_secs(self.trades_poll_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.price_poll_interval(), Duration::from_secs(5));
        assert_eq!(config.trades_poll_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("PAPERTRADE_API_URL", "https://paper.example.com/api/"),
            ("PAPERTRADE_PRICE_POLL_SECS", "2"),
            ("PAPERTRADE_SESSION_FILE", "/tmp/session.json"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "https://paper.example.com/api");
        assert_eq!(config.price_poll_secs, 2);
        assert_eq!(config.session_file, PathBuf::from("/tmp/session.json"));
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let err = ClientConfig::from_lookup(lookup_from(&[("PAPERTRADE_TRADES_POLL_SECS", "soon")]))
            .unwrap_err();
        assert!(err.contains("PAPERTRADE_TRADES_POLL_SECS"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ClientConfig::default();
        config.api_url = "localhost:3001".to_string();
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.price_poll_secs = 0;
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.ws_url = Some("http://wrong".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_price_stream_url_derivation() {
        let config = ClientConfig::default();
        assert_eq!(
            config.price_stream_url(),
            "ws://localhost:3001/socket.io/?EIO=4&transport=websocket"
        );

        let mut config = ClientConfig::default();
        config.api_url = "https://paper.example.com/api".to_string();
        assert_eq!(
            config.price_stream_url(),
            "wss://paper.example.com/socket.io/?EIO=4&transport=websocket"
        );

        config.ws_url = Some("wss://push.example.com".to_string());
        assert_eq!(
            config.price_stream_url(),
            "wss://push.example.com/socket.io/?EIO=4&transport=websocket"
        );

        config.ws_url = Some("ws://push.example.com/socket.io/?EIO=4&transport=websocket".to_string());
        assert_eq!(
            config.price_stream_url(),
            "ws://push.example.com/socket.io/?EIO=4&transport=websocket"
        );
    }
}
