//! Camera connection configuration
//!
//! An explicit, immutable value handed to each actuator at construction.
//! Shared read-only (`Arc<FoscamConfig>`) by every in-flight command.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// URL scheme used to reach the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Http,
    Https,
}

impl Protocol {
    pub fn scheme(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            _ => Err(format!("Unknown protocol: '{}'", s)),
        }
    }
}

/// Connection settings for Foscam cameras
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoscamConfig {
    /// Scheme for every request. `None` leaves the transport unconfigured.
    #[serde(default = "default_protocol")]
    pub protocol: Option<Protocol>,
    /// CGI endpoint path, relative to the device root
    #[serde(default = "default_cgi_path")]
    pub cgi_path: String,
    /// Default whole-request deadline, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// TCP connect deadline, in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_protocol() -> Option<Protocol> {
    Some(Protocol::Http)
}

fn default_cgi_path() -> String {
    "cgi-bin/CGIProxy.fcgi".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for FoscamConfig {
    fn default() -> Self {
        Self {
            protocol: default_protocol(),
            cgi_path: default_cgi_path(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl FoscamConfig {
    pub fn with_protocol(mut self, protocol: Option<Protocol>) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
