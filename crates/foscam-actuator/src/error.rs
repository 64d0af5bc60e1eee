//! Error types for constructing Foscam actuators

use thiserror::Error;

/// Result type alias for Foscam setup operations
pub type Result<T> = std::result::Result<T, FoscamError>;

/// Errors raised while building an actuator or its test fixtures.
///
/// Command failures use [`actuator_core::CommandError`] instead.
#[derive(Error, Debug)]
pub enum FoscamError {
    /// HTTP client could not be built
    #[error("HTTP client setup failed: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
