//! Shared data models for actuators

mod device;
mod properties;
mod result;

pub use device::*;
pub use properties::*;
pub use result::*;
