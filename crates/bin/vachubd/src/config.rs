//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `vachub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::collections::HashSet;

use serde::Deserialize;

use vachub_domain::device::DeviceInfo;
use vachub_domain::error::VacHubError;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Simulated bots.
    pub devices: DevicesConfig,
    /// Virtual adapter behaviour.
    #[serde(rename = "virtual")]
    pub virtual_bots: VirtualConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// One `[[devices]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    pub serial: String,
    pub name: Option<String>,
    pub model: Option<String>,
    /// Mowers (GOAT) expose the mower catalog.
    #[serde(default)]
    pub is_goat: bool,
}

/// The `[[devices]]` array, defaulting to one vacuum and one mower.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct DevicesConfig(pub Vec<DeviceConfig>);

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VirtualConfig {
    /// Publish a plausible initial state once the integration is set up.
    pub seed_state: bool,
}

impl Config {
    /// Load configuration from `vachub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// device list is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("vachub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("VACHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("VACHUB_SEED_STATE")
            && let Ok(seed) = val.parse()
        {
            self.virtual_bots.seed_state = seed;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for device in &self.devices.0 {
            if device.serial.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "device serial must not be empty".to_string(),
                ));
            }
            if !seen.insert(device.serial.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "device serial {} is listed twice",
                    device.serial
                )));
            }
        }
        Ok(())
    }

    /// Device descriptions of every configured bot.
    ///
    /// # Errors
    ///
    /// Returns the first validation error raised by the domain builder.
    pub fn device_infos(&self) -> Result<Vec<DeviceInfo>, VacHubError> {
        self.devices.0.iter().map(DeviceConfig::to_info).collect()
    }
}

impl DeviceConfig {
    fn to_info(&self) -> Result<DeviceInfo, VacHubError> {
        let mut builder = DeviceInfo::builder()
            .serial(&self.serial)
            .is_goat(self.is_goat);
        if let Some(name) = &self.name {
            builder = builder.name(name);
        }
        if let Some(model) = &self.model {
            builder = builder.model(model);
        }
        builder.build()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "vachubd=info,vachub_adapter_deebot=info,vachub_app=info".to_string(),
        }
    }
}

impl Default for DevicesConfig {
    fn default() -> Self {
        Self(vec![
            DeviceConfig {
                serial: "E0000000000000001".to_string(),
                name: Some("Living room".to_string()),
                model: Some("DEEBOT T8".to_string()),
                is_goat: false,
            },
            DeviceConfig {
                serial: "G0000000000000001".to_string(),
                name: Some("Garden".to_string()),
                model: Some("GOAT G1".to_string()),
                is_goat: true,
            },
        ])
    }
}

impl Default for VirtualConfig {
    fn default() -> Self {
        Self { seed_state: true }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
