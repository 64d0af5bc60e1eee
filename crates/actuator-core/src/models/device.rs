//! Device descriptor models

use serde::{Deserialize, Serialize};

/// Descriptor a host framework hands to an actuator at construction.
///
/// Mirrors the `{model, device: {address}}` shape used for registration.
/// Immutable for the lifetime of the actuator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// Device model (e.g., "FI9821WA")
    pub model: String,
    /// Network location of the device
    pub device: DeviceInfo,
}

/// Network location of a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Host name or IP address, optionally with a port (e.g., "10.0.0.5:88")
    pub address: String,
}

impl DeviceDescriptor {
    pub fn new(model: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            device: DeviceInfo {
                address: address.into(),
            },
        }
    }

    /// Shortcut for `self.device.address`
    pub fn address(&self) -> &str {
        &self.device.address
    }
}

/// Opaque options bag forwarded unmodified from the host framework
pub type ActuatorOptions = serde_json::Map<String, serde_json::Value>;
