//! Normalized command results

use std::time::Duration;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{CommandError, TransportError};

/// JSON-RPC 2.0 server-error code used for every normalized failure
pub const RPC_ERROR_CODE: i32 = -32000;

/// Content type of image payloads
pub const CONTENT_TYPE_JPEG: &str = "image/jpeg";
/// Content type of status payloads
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

/// Payload of a successful command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    /// Short status string
    Text(String),
    /// Opaque bytes, never inspected
    Binary(Bytes),
}

impl Content {
    pub fn len(&self) -> usize {
        match self {
            Content::Text(s) => s.len(),
            Content::Binary(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Content::Text(s) => s.as_bytes(),
            Content::Binary(b) => b,
        }
    }
}

/// Successful outcome of a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResult {
    pub content_type: String,
    pub content: Content,
}

impl NormalizedResult {
    /// An image payload, passed through untouched
    pub fn image_jpeg(body: Bytes) -> Self {
        Self {
            content_type: CONTENT_TYPE_JPEG.to_string(),
            content: Content::Binary(body),
        }
    }

    /// A plain-text status payload
    pub fn text_plain(message: impl Into<String>) -> Self {
        Self {
            content_type: CONTENT_TYPE_TEXT.to_string(),
            content: Content::Text(message.into()),
        }
    }
}

/// Normalized `{code, message}` error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl RpcError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: RPC_ERROR_CODE,
            message: message.into(),
        }
    }
}

/// Per-invocation options
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Deadline for the whole request, overriding the transport default
    pub timeout: Option<Duration>,
}

impl CommandOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// The `(error, result)` completion pair.
///
/// Exactly one side is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<NormalizedResult>,
}

impl CommandResponse {
    pub fn success(result: NormalizedResult) -> Self {
        Self {
            error: None,
            result: Some(result),
        }
    }

    pub fn failure(error: RpcError) -> Self {
        Self {
            error: Some(error),
            result: None,
        }
    }

    /// Fold a command outcome into the completion pair.
    ///
    /// Transport failures are handed back unmodified instead of being
    /// normalized.
    pub fn from_outcome(
        outcome: Result<NormalizedResult, CommandError>,
    ) -> Result<Self, TransportError> {
        match outcome {
            Ok(result) => Ok(Self::success(result)),
            Err(CommandError::Transport(e)) => Err(e),
            Err(e) => {
                // rpc_error() is Some for every non-transport variant
                let error = e
                    .rpc_error()
                    .unwrap_or_else(|| RpcError::new(e.to_string()));
                Ok(Self::failure(error))
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
