//! Configuration file handling for foscam-cli

use anyhow::{Context, Result};
use foscam_actuator::{Credentials, DeviceCredentials, FoscamConfig, Protocol};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Model assumed when neither the flags nor the file name one
pub const DEFAULT_MODEL: &str = "FI9821WA";

/// Configuration for the CLI tool
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Default camera address (`host` or `host:port`)
    pub address: Option<String>,
    /// Default camera model
    pub model: Option<String>,
    /// Default output format
    pub output: Option<OutputFormat>,
    /// Disable colored output
    pub no_color: Option<bool>,
    /// Connection settings
    #[serde(default)]
    pub camera: FoscamConfig,
    /// Credentials used for any camera without a `[[devices]]` entry
    pub credentials: Option<Credentials>,
    /// Per-address credential overrides
    #[serde(default)]
    pub devices: Vec<DeviceEntry>,
}

/// A `[[devices]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceEntry {
    pub address: String,
    pub user: String,
    pub password: String,
}

/// Values given on the command line, which win over the file
#[derive(Debug, Clone, Default)]
pub struct ArgOverrides {
    pub address: Option<String>,
    pub model: Option<String>,
    pub https: bool,
    pub user: Option<String>,
    pub password: Option<String>,
    pub output: Option<OutputFormat>,
    pub no_color: bool,
}

impl Config {
    /// Load configuration from the default config file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("foscam-cli");

        Ok(config_dir.join("config.toml"))
    }

    /// Merge CLI arguments over config file values
    pub fn merge_with_args(&self, args: &ArgOverrides) -> Result<MergedConfig> {
        let address = args
            .address
            .clone()
            .or_else(|| self.address.clone())
            .context("No camera address: pass --address or set `address` in the config file")?;

        let mut camera = self.camera.clone();
        if args.https {
            camera.protocol = Some(Protocol::Https);
        }

        let file_credentials = self.credentials.clone();
        let fallback = Credentials::new(
            args.user
                .clone()
                .or_else(|| file_credentials.as_ref().map(|c| c.user.clone()))
                .unwrap_or_else(|| "admin".to_string()),
            args.password
                .clone()
                .or_else(|| file_credentials.map(|c| c.password))
                .unwrap_or_default(),
        );

        // Explicit flags apply to the addressed camera even if the file has an entry for it
        let mut credentials = DeviceCredentials::new(fallback.clone());
        for device in &self.devices {
            credentials.insert(
                device.address.clone(),
                Credentials::new(device.user.clone(), device.password.clone()),
            );
        }
        if args.user.is_some() || args.password.is_some() {
            credentials.insert(address.clone(), fallback);
        }

        Ok(MergedConfig {
            address,
            model: args
                .model
                .clone()
                .or_else(|| self.model.clone())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            output: args.output.or(self.output).unwrap_or_default(),
            no_color: args.no_color || self.no_color.unwrap_or(false),
            camera,
            credentials,
        })
    }
}

/// Fully resolved configuration after merging CLI args
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub address: String,
    pub model: String,
    pub output: OutputFormat,
    pub no_color: bool,
    pub camera: FoscamConfig,
    pub credentials: DeviceCredentials,
}
