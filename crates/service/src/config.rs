use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};

use common::object_store::ObjectStoreConfig;
use common::pin::{PinLimits, DEFAULT_MAX_ITEM_SIZE};

/// Maximum request body size in bytes (500 MB)
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 500 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Port for the HTTP server
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Largest single item (file or JSON document) we'll pin
    #[serde(default = "default_max_item_size")]
    pub max_item_size: usize,
    /// Largest request body we'll accept
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,

    /// Primary object store; every pin is written here
    #[serde(default)]
    pub store: ObjectStoreConfig,
    /// Optional cache store, mirrored on a best-effort basis
    #[serde(default)]
    pub cache: Option<ObjectStoreConfig>,

    /// log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_listen_port() -> u16 {
    3000
}

fn default_max_item_size() -> usize {
    DEFAULT_MAX_ITEM_SIZE
}

fn default_max_upload_size() -> usize {
    DEFAULT_MAX_UPLOAD_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_port: default_listen_port(),
            max_item_size: default_max_item_size(),
            max_upload_size: default_max_upload_size(),
            store: ObjectStoreConfig::default(),
            cache: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, or fall back to defaults
    ///  when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let config_toml = fs::read_to_string(path)?;
                Self::from_toml(&config_toml)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(config_toml: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(config_toml)?;
        if config.max_item_size > config.max_upload_size {
            return Err(ConfigError::Invalid(format!(
                "max_item_size ({}) exceeds max_upload_size ({})",
                config.max_item_size, config.max_upload_size
            )));
        }
        Ok(config)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), self.listen_port)
    }

    pub fn pin_limits(&self) -> PinLimits {
        PinLimits {
            max_item_size: self.max_item_size,
        }
    }

    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.listen_addr().port(), 3000);
        assert_eq!(config.store, ObjectStoreConfig::Memory);
        assert!(config.cache.is_none());
        assert_eq!(config.tracing_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            listen_port = 8080
            max_item_size = 1024
            max_upload_size = 4096
            log_level = "debug"

            [store]
            type = "s3"
            endpoint = "http://localhost:9000"
            access_key = "minio"
            secret_key = "minio123"
            bucket = "pins"

            [cache]
            type = "local"
            path = "/var/cache/ipos"
            "#,
        )
        .unwrap();

        assert_eq!(config.listen_port, 8080);
        assert_eq!(config.pin_limits().max_item_size, 1024);
        assert_eq!(config.tracing_level(), tracing::Level::DEBUG);
        assert_eq!(
            config.store,
            ObjectStoreConfig::S3 {
                endpoint: "http://localhost:9000".to_string(),
                access_key: "minio".to_string(),
                secret_key: "minio123".to_string(),
                bucket: "pins".to_string(),
                region: None,
            }
        );
        assert_eq!(
            config.cache,
            Some(ObjectStoreConfig::Local {
                path: PathBuf::from("/var/cache/ipos")
            })
        );
    }

    #[test]
    fn test_item_limit_must_fit_upload_limit() {
        let result = Config::from_toml("max_item_size = 10\nmax_upload_size = 5");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "listen_port = 9999\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.listen_port, 9999);

        let missing = Config::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
