use serde::{Deserialize, Serialize};

use super::access::AccessConfig;
use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;
use super::zone::ZoneConfig;

/// Main configuration structure for Zonegate
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream resolver used for names outside the local zone
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Static zone source
    #[serde(default)]
    pub zone: ZoneConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    /// Allow-list and per-client rate limit
    #[serde(default)]
    pub access: AccessConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. zonegate.toml in current directory
    /// 3. /etc/zonegate/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("zonegate.toml").exists() {
            Self::from_file("zonegate.toml")?
        } else if std::path::Path::new("/etc/zonegate/config.toml").exists() {
            Self::from_file("/etc/zonegate/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(upstream) = overrides.upstream {
            self.upstream.address = upstream;
        }
        if let Some(zone_file) = overrides.zone_file {
            self.zone.file = Some(zone_file);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        self.upstream
            .upstream_addr()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeout must be at least 1 second".to_string(),
            ));
        }

        if self.access.rate_limit == 0 {
            return Err(ConfigError::Validation(
                "Rate limit must be greater than 0".to_string(),
            ));
        }

        if self.access.window_secs == 0 {
            return Err(ConfigError::Validation(
                "Rate limit window must be greater than 0".to_string(),
            ));
        }

        self.access
            .allowed_networks()
            .map_err(ConfigError::Validation)?;

        if self.cache.enabled && self.cache.sweep_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Cache sweep interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub upstream: Option<String>,
    pub zone_file: Option<String>,
    pub log_level: Option<String>,
}
