//! Credential providers
//!
//! The CGI protocol authenticates every request with `usr`/`pwd` query
//! parameters. Actuators ask a provider for the pair per call.

use std::collections::HashMap;
use std::fmt;

use actuator_core::DeviceDescriptor;
use serde::{Deserialize, Serialize};

/// Username/password pair for one device
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Source of credentials for a device
pub trait CredentialProvider: Send + Sync {
    fn credentials(&self, device: &DeviceDescriptor) -> Credentials;
}

/// The same pair for every device
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl CredentialProvider for StaticCredentials {
    fn credentials(&self, _device: &DeviceDescriptor) -> Credentials {
        self.credentials.clone()
    }
}

/// Per-address overrides over a fallback pair
#[derive(Debug, Clone)]
pub struct DeviceCredentials {
    fallback: Credentials,
    by_address: HashMap<String, Credentials>,
}

impl DeviceCredentials {
    pub fn new(fallback: Credentials) -> Self {
        Self {
            fallback,
            by_address: HashMap::new(),
        }
    }

    /// Register credentials for one device address
    pub fn with_device(mut self, address: impl Into<String>, credentials: Credentials) -> Self {
        self.by_address.insert(address.into(), credentials);
        self
    }

    pub fn insert(&mut self, address: impl Into<String>, credentials: Credentials) {
        self.by_address.insert(address.into(), credentials);
    }
}

impl CredentialProvider for DeviceCredentials {
    fn credentials(&self, device: &DeviceDescriptor) -> Credentials {
        self.by_address
            .get(device.address())
            .unwrap_or(&self.fallback)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("admin", "hunter2");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("admin"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_device_override_and_fallback() {
        let provider = DeviceCredentials::new(Credentials::new("admin", "default"))
            .with_device("10.0.0.7", Credentials::new("ops", "other"));

        let seventh = DeviceDescriptor::new("FI9821WA", "10.0.0.7");
        let fifth = DeviceDescriptor::new("FI9821WA", "10.0.0.5");

        assert_eq!(provider.credentials(&seventh).user, "ops");
        assert_eq!(provider.credentials(&fifth).password, "default");
    }
}
