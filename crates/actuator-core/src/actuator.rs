//! Actuator trait - the capability interface a host framework drives

use async_trait::async_trait;

use crate::error::CommandResult;
use crate::models::{
    ActuatorOptions, ActuatorProperties, CommandOptions, DeviceDescriptor, NormalizedResult,
};

/// The core trait that all actuators implement.
///
/// A host framework constructs one instance per registered device and only
/// talks to it through this trait, so device families (cameras, relays, ...)
/// can be swapped without touching the caller. Each `invoke` is an
/// independent request; implementations keep no per-call state on `self`.
#[async_trait]
pub trait Actuator: Send + Sync {
    // =========================================================================
    // Identity
    // =========================================================================

    /// Descriptor this actuator was constructed with
    fn descriptor(&self) -> &DeviceDescriptor;

    /// Options bag forwarded unmodified at construction
    fn options(&self) -> &ActuatorOptions;

    /// Static discovery metadata for this actuator type
    fn properties(&self) -> &'static ActuatorProperties;

    /// Instance identifier derived from the property id template
    fn id(&self) -> String {
        self.properties().render_id(self.descriptor())
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Run a command by name.
    ///
    /// Names not listed in [`ActuatorProperties::commands`] resolve to
    /// [`crate::CommandError::Unsupported`].
    async fn invoke(&self, command: &str, options: &CommandOptions)
        -> CommandResult<NormalizedResult>;

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Release resources before the framework drops this instance
    fn clear(&self) {}
}
