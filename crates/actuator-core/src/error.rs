//! Error taxonomy for actuator commands

use std::time::Duration;

use thiserror::Error;

use crate::models::{RpcError, RPC_ERROR_CODE};

/// Result type for actuator commands
pub type CommandResult<T> = Result<T, CommandError>;

/// Boxed cause carried by [`TransportError::Request`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Network-level failures.
///
/// These are never folded into the `-32000` error shape; the caller sees
/// the underlying cause.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No client is configured for the requested protocol. No I/O was attempted.
    #[error("Transport not ready: {0}")]
    NotReady(String),

    /// The per-call deadline expired before the response body was complete
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection-level failure (DNS, refused, reset, ...)
    #[error("Request failed: {0}")]
    Request(#[source] BoxError),
}

impl TransportError {
    /// Wrap any transport cause
    pub fn request(cause: impl Into<BoxError>) -> Self {
        Self::Request(cause.into())
    }
}

/// Errors returned from an actuator command
#[derive(Debug, Error)]
pub enum CommandError {
    /// The request never produced a response body
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The device answered with a document missing the expected structure
    #[error("Protocol error: {message}")]
    Protocol { message: String },

    /// The device reported a non-zero result code.
    ///
    /// `code` is `None` when the document carried no usable code at all.
    #[error("Device error: {message}")]
    Vendor { code: Option<i32>, message: String },

    /// The actuator does not implement the requested command
    #[error("Command not supported: {0}")]
    Unsupported(String),
}

impl CommandError {
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    pub fn vendor(code: Option<i32>, message: impl Into<String>) -> Self {
        Self::Vendor {
            code,
            message: message.into(),
        }
    }

    /// The normalized `{code, message}` pair for this error.
    ///
    /// Returns `None` for transport failures, which are surfaced raw.
    pub fn rpc_error(&self) -> Option<RpcError> {
        match self {
            CommandError::Transport(_) => None,
            CommandError::Protocol { message } | CommandError::Vendor { message, .. } => {
                Some(RpcError::new(message.clone()))
            }
            CommandError::Unsupported(name) => Some(RpcError {
                code: RPC_ERROR_CODE,
                message: format!("unsupported command: {}", name),
            }),
        }
    }

    /// Whether this error came from the network rather than the device
    pub fn is_transport(&self) -> bool {
        matches!(self, CommandError::Transport(_))
    }
}
