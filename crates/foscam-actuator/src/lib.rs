//! Foscam CGI actuator
//!
//! Bridges the abstract camera commands (`snapPicture`, `gotoPresetDefault`,
//! `resetPosition`, `reboot`) to the Foscam `CGIProxy.fcgi` HTTP protocol and
//! normalizes the two kinds of replies (raw JPEG bytes, `CGI_Result` status
//! documents) into one result shape.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use actuator_core::{ActuatorOptions, CommandOptions, DeviceDescriptor};
//! use foscam_actuator::{Credentials, FoscamActuator, FoscamConfig, StaticCredentials};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let camera = FoscamActuator::new(
//!         DeviceDescriptor::new("FI9821WA", "10.0.0.5"),
//!         ActuatorOptions::new(),
//!         Arc::new(FoscamConfig::default()),
//!         Arc::new(StaticCredentials::new(Credentials::new("admin", "secret"))),
//!     )?;
//!
//!     let picture = camera.snap_picture(&CommandOptions::default()).await?;
//!     println!("{} bytes of {}", picture.content.len(), picture.content_type);
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module provides a fake camera serving the CGI endpoint:
//!
//! ```rust,ignore
//! use foscam_actuator::testing::FakeCamera;
//!
//! let camera = FakeCamera::start().await?;
//! let actuator = FoscamActuator::new(camera.descriptor(), ...)?;
//! ```

mod actuator;
mod command;
mod config;
mod credentials;
mod error;
mod normalize;
mod request;
mod result_code;
pub mod testing;
pub mod transport;

pub use actuator::{FoscamActuator, FOSCAM_PROPERTIES};
pub use command::{Command, ResponseKind};
pub use config::{FoscamConfig, Protocol};
pub use credentials::{CredentialProvider, Credentials, DeviceCredentials, StaticCredentials};
pub use error::{FoscamError, Result};
pub use normalize::{normalize, NO_CGI_RESULT, PARSE_ERROR};
pub use request::{build_request, Encoding, RequestDescriptor};
pub use result_code::{ResultCode, UNKNOWN_ERROR};
pub use transport::{HttpTransport, MockTransport, RawResponse, Transport};

// Re-export core types for convenience
pub use actuator_core::{
    Actuator, CommandError, CommandOptions, CommandResponse, CommandResult, DeviceDescriptor,
    NormalizedResult, TransportError,
};
