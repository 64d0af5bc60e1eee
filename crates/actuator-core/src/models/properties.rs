//! Static actuator metadata read by the host framework for discovery

use serde::Serialize;

use super::DeviceDescriptor;

/// Discovery metadata an actuator type publishes.
///
/// The host framework reads this without constructing an instance, so
/// implementers expose it as a `static`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActuatorProperties {
    /// Network types this actuator can be reached over
    pub supported_networks: &'static [&'static str],
    /// Data type tags (e.g., "camera")
    pub data_types: &'static [&'static str],
    /// Whether devices can be found by network discovery
    pub discoverable: bool,
    /// Whether devices are addressed explicitly by network address
    pub addressable: bool,
    /// Upper bound on concurrently registered instances
    pub max_instances: usize,
    /// Identifier template; `{model}` and `{address}` are substituted
    pub id_template: &'static str,
    /// Supported device models
    pub models: &'static [&'static str],
    /// Command names accepted by [`crate::Actuator::invoke`]
    pub commands: &'static [&'static str],
    /// Framework category (e.g., "actuator")
    pub category: &'static str,
}

impl ActuatorProperties {
    /// Expand `id_template` for a concrete device
    pub fn render_id(&self, descriptor: &DeviceDescriptor) -> String {
        self.id_template
            .replace("{model}", &descriptor.model)
            .replace("{address}", descriptor.address())
    }

    pub fn supports_command(&self, command: &str) -> bool {
        self.commands.contains(&command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROPS: ActuatorProperties = ActuatorProperties {
        supported_networks: &["test"],
        data_types: &["camera"],
        discoverable: false,
        addressable: true,
        max_instances: 2,
        id_template: "{model}-{address}",
        models: &["M1"],
        commands: &["ping"],
        category: "actuator",
    };

    #[test]
    fn test_render_id() {
        let descriptor = DeviceDescriptor::new("M1", "192.168.1.20");
        assert_eq!(PROPS.render_id(&descriptor), "M1-192.168.1.20");
    }

    #[test]
    fn test_serializes_with_framework_keys() {
        let value = serde_json::to_value(&PROPS).unwrap();
        assert_eq!(value["idTemplate"], "{model}-{address}");
        assert_eq!(value["maxInstances"], 2);
        assert_eq!(value["supportedNetworks"][0], "test");
    }

    #[test]
    fn test_supports_command() {
        assert!(PROPS.supports_command("ping"));
        assert!(!PROPS.supports_command("reboot"));
    }
}
