//! SHAREBLOOM - Configuration
//! Filter sizing and bit store location, loadable from a JSON file.
//!
//! ```json
//! {
//!   "store": { "addr": "127.0.0.1:6379", "key": "bloom_filter", "password": null, "db": 0 },
//!   "bloom": { "expected_items": 100000, "false_positive_rate": 0.01 }
//! }
//! ```
//! Every field is optional and falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BloomError, Result};
use crate::filter::sizing::FilterParams;

/// Where the shared bit array lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Redis server address, `host:port`.
    pub addr: String,
    /// Key of the bit array.
    pub key: String,
    pub password: Option<String>,
    pub db: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:6379".to_string(),
            key: "bloom_filter".to_string(),
            password: None,
            db: 0,
        }
    }
}

/// Filter sizing inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomConfig {
    pub expected_items: u64,
    pub false_positive_rate: f64,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            expected_items: 100_000,
            false_positive_rate: 0.01,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub bloom: BloomConfig,
}

impl Config {
    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data)
            .map_err(|e| BloomError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Use a different bit array key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.store.key = key.into();
        self
    }

    /// Set the filter sizing.
    pub fn with_capacity(mut self, expected_items: u64, false_positive_rate: f64) -> Self {
        self.bloom.expected_items = expected_items;
        self.bloom.false_positive_rate = false_positive_rate;
        self
    }

    /// Split `store.addr` into host and port (default 6379).
    /// IPv6 hosts may be bracketed: `[::1]:6379`.
    pub fn host_port(&self) -> Result<(String, u16)> {
        let addr = self.store.addr.trim();
        let (host, port) = match addr.rsplit_once(':') {
            Some((host, port)) if !host.contains(':') || host.ends_with(']') => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| BloomError::Config(format!("invalid port in '{}'", addr)))?;
                (host, port)
            }
            _ => (addr, 6379),
        };
        let host = host.trim_start_matches('[').trim_end_matches(']');
        if host.is_empty() {
            return Err(BloomError::Config(format!("invalid store address '{}'", addr)));
        }
        Ok((host.to_string(), port))
    }

    /// Connection parameters for the Redis bit store.
    ///
    /// Built field by field rather than as a URL, so passwords are passed
    /// through verbatim whatever characters they contain.
    #[cfg(feature = "redis")]
    pub fn connection_info(&self) -> Result<redis::ConnectionInfo> {
        let (host, port) = self.host_port()?;
        Ok(redis::ConnectionInfo {
            addr: redis::ConnectionAddr::Tcp(host, port),
            redis: redis::RedisConnectionInfo {
                db: self.store.db,
                password: self.store.password.clone().filter(|p| !p.is_empty()),
                ..Default::default()
            },
        })
    }

    /// Check the sizing inputs and return the parameters they produce.
    pub fn validate(&self) -> Result<FilterParams> {
        if self.store.key.is_empty() {
            return Err(BloomError::Config("store key must not be empty".to_string()));
        }
        if self.store.db < 0 {
            return Err(BloomError::Config(format!(
                "store db must not be negative, got {}",
                self.store.db
            )));
        }
        self.host_port()?;
        FilterParams::new(self.bloom.expected_items, self.bloom.false_positive_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.store.key, "bloom_filter");
        assert_eq!(config.host_port().unwrap(), ("127.0.0.1".to_string(), 6379));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "store": {{ "addr": "cache:6380", "key": "seen_urls", "password": "hunter2", "db": 3 }},
                "bloom": {{ "expected_items": 1000, "false_positive_rate": 0.01 }}
            }}"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.store.key, "seen_urls");
        assert_eq!(config.store.password.as_deref(), Some("hunter2"));
        assert_eq!(config.store.db, 3);
        assert_eq!(config.host_port().unwrap(), ("cache".to_string(), 6380));

        let params = config.validate().unwrap();
        assert_eq!(params.num_bits, 9586);
        assert_eq!(params.num_hashes, 7);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "bloom": {{ "expected_items": 50 }} }}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.bloom.expected_items, 50);
        assert_eq!(config.bloom.false_positive_rate, 0.01);
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "bloom": {{ "expected_items": -5 }} }}"#).unwrap();

        match Config::from_file(file.path()) {
            Err(BloomError::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        match Config::from_file(dir.path().join("absent.json")) {
            Err(BloomError::Io(_)) => {}
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_bad_sizing() {
        let config = Config::default().with_capacity(1000, 1.0);
        assert!(matches!(
            config.validate(),
            Err(BloomError::InvalidParameter(_))
        ));

        let config = Config::default().with_key("");
        assert!(matches!(config.validate(), Err(BloomError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_negative_db() {
        let mut config = Config::default();
        config.store.db = -1;
        assert!(matches!(config.validate(), Err(BloomError::Config(_))));

        config.store.db = 15;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_host_port_forms() {
        let mut config = Config::default();

        config.store.addr = "redis.internal".to_string();
        assert_eq!(config.host_port().unwrap(), ("redis.internal".to_string(), 6379));

        config.store.addr = "[::1]:7000".to_string();
        assert_eq!(config.host_port().unwrap(), ("::1".to_string(), 7000));

        config.store.addr = "cache:notaport".to_string();
        assert!(matches!(config.validate(), Err(BloomError::Config(_))));
    }

    #[cfg(feature = "redis")]
    #[test]
    fn test_connection_info_keeps_reserved_password_chars() {
        let mut config = Config::default();
        config.store.addr = "cache:6380".to_string();
        config.store.db = 2;
        config.store.password = Some("p@ss/word:50%".to_string());

        let info = config.connection_info().unwrap();
        assert_eq!(info.redis.password.as_deref(), Some("p@ss/word:50%"));
        assert_eq!(info.redis.db, 2);
        match info.addr {
            redis::ConnectionAddr::Tcp(ref host, port) => {
                assert_eq!(host, "cache");
                assert_eq!(port, 6380);
            }
            other => panic!("unexpected address {:?}", other),
        }

        // Opening a client only parses the info; no server is contacted
        assert!(redis::Client::open(info).is_ok());
    }

    #[cfg(feature = "redis")]
    #[test]
    fn test_connection_info_empty_password_is_none() {
        let mut config = Config::default();
        config.store.password = Some(String::new());
        assert_eq!(config.connection_info().unwrap().redis.password, None);
    }
}
