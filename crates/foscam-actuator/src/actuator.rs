//! FoscamActuator - Actuator implementation over the Foscam CGI protocol

use std::sync::Arc;

use actuator_core::{
    Actuator, ActuatorOptions, ActuatorProperties, CommandOptions, CommandResult,
    DeviceDescriptor, NormalizedResult, TransportError,
};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::command::Command;
use crate::config::FoscamConfig;
use crate::credentials::CredentialProvider;
use crate::error::Result;
use crate::normalize::normalize;
use crate::request::build_request;
use crate::transport::{HttpTransport, Transport};

/// Discovery metadata for Foscam cameras
pub static FOSCAM_PROPERTIES: ActuatorProperties = ActuatorProperties {
    supported_networks: &["foscam"],
    data_types: &["camera"],
    discoverable: false,
    addressable: true,
    max_instances: 5,
    id_template: "{model}-{address}",
    models: &["FI9821WA"],
    commands: &["snapPicture", "gotoPresetDefault", "resetPosition", "reboot"],
    category: "actuator",
};

/// An `Actuator` for one Foscam camera.
///
/// Every command builds a fresh request, executes it once and normalizes
/// the reply. Nothing is retained between calls, so one instance can serve
/// any number of concurrent commands.
pub struct FoscamActuator {
    descriptor: DeviceDescriptor,
    options: ActuatorOptions,
    config: Arc<FoscamConfig>,
    credentials: Arc<dyn CredentialProvider>,
    transport: Arc<dyn Transport>,
}

impl FoscamActuator {
    /// Create an actuator talking HTTP(S) to `descriptor.device.address`.
    ///
    /// `options` is stored untouched and returned by [`Actuator::options`].
    pub fn new(
        descriptor: DeviceDescriptor,
        options: ActuatorOptions,
        config: Arc<FoscamConfig>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        let transport = Arc::new(HttpTransport::from_config(&config)?);
        Ok(Self::with_transport(
            descriptor,
            options,
            config,
            credentials,
            transport,
        ))
    }

    /// Create an actuator over a caller-supplied transport
    pub fn with_transport(
        descriptor: DeviceDescriptor,
        options: ActuatorOptions,
        config: Arc<FoscamConfig>,
        credentials: Arc<dyn CredentialProvider>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            descriptor,
            options,
            config,
            credentials,
            transport,
        }
    }

    pub fn model(&self) -> &str {
        &self.descriptor.model
    }

    pub fn config(&self) -> &FoscamConfig {
        &self.config
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Capture a JPEG snapshot
    pub async fn snap_picture(&self, options: &CommandOptions) -> CommandResult<NormalizedResult> {
        self.execute(Command::SnapPicture, options).await
    }

    /// Move to the preset point named `default`
    pub async fn goto_preset_default(
        &self,
        options: &CommandOptions,
    ) -> CommandResult<NormalizedResult> {
        self.execute(Command::GotoPresetDefault, options).await
    }

    /// Return pan/tilt to the home position
    pub async fn reset_position(&self, options: &CommandOptions) -> CommandResult<NormalizedResult> {
        self.execute(Command::ResetPosition, options).await
    }

    pub async fn reboot(&self, options: &CommandOptions) -> CommandResult<NormalizedResult> {
        self.execute(Command::Reboot, options).await
    }

    /// Run one command: resolve, build, execute, normalize
    #[instrument(skip(self, options), fields(device = %self.descriptor.address()))]
    pub async fn execute(
        &self,
        command: Command,
        options: &CommandOptions,
    ) -> CommandResult<NormalizedResult> {
        let protocol = self.transport.protocol().ok_or_else(|| {
            TransportError::NotReady(format!(
                "no HTTP or HTTPS client configured for {}",
                self.descriptor.address()
            ))
        })?;

        let credentials = self.credentials.credentials(&self.descriptor);
        let request = build_request(
            protocol,
            &self.config.cgi_path,
            self.descriptor.address(),
            &credentials,
            command,
        );

        let response = self.transport.execute(&request, options.timeout).await;
        match &response {
            Ok(raw) => info!(status = raw.status, "CGI command completed"),
            // The cause's message may embed the request URL, password included
            Err(TransportError::Request(_)) => {
                info!(url = %request.redacted_url(), "CGI command failed in transport")
            }
            Err(e) => info!(error = %e, "CGI command failed in transport"),
        }

        let outcome = normalize(command.response_kind(), response?.body);
        if let Err(e) = &outcome {
            debug!(error = %e, "CGI command failed");
        }
        outcome
    }
}

#[async_trait]
impl Actuator for FoscamActuator {
    fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    fn options(&self) -> &ActuatorOptions {
        &self.options
    }

    fn properties(&self) -> &'static ActuatorProperties {
        &FOSCAM_PROPERTIES
    }

    async fn invoke(
        &self,
        command: &str,
        options: &CommandOptions,
    ) -> CommandResult<NormalizedResult> {
        let command: Command = command.parse()?;
        self.execute(command, options).await
    }
}
