//! actuator-core - Core traits and types for device actuators
//!
//! This crate provides the abstractions a host framework uses to drive
//! heterogeneous devices (cameras, switches, ...) through one call path:
//! the [`Actuator`] capability trait, the normalized result/error shape
//! every command resolves to, and the static property metadata used for
//! discovery.

pub mod actuator;
pub mod error;
pub mod models;

pub use actuator::Actuator;
pub use error::{CommandError, CommandResult, TransportError};
pub use models::*;
