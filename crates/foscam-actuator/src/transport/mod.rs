//! Transport layer for CGI requests
//!
//! - HTTP/HTTPS transport backed by reqwest
//! - Mock transport for testing
//!
//! A transport executes exactly one request per call, buffers the whole
//! body, and reports only network-level failures. It never retries.

mod http;
mod mock;

pub use http::{without_url, HttpTransport};
pub use mock::{MockReply, MockTransport};

use std::time::Duration;

use actuator_core::TransportError;
use async_trait::async_trait;
use bytes::Bytes;

use crate::config::Protocol;
use crate::request::RequestDescriptor;

/// A complete response, body fully buffered
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// `Content-Type` header as received
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Executes CGI requests against a device
#[async_trait]
pub trait Transport: Send + Sync {
    /// Protocol this transport has a client for, if any
    fn protocol(&self) -> Option<Protocol>;

    /// Send `request` and wait for the complete body.
    ///
    /// # Arguments
    /// * `request` - The CGI request
    /// * `timeout` - Deadline for the whole exchange; `None` uses the
    ///   transport default
    async fn execute(
        &self,
        request: &RequestDescriptor,
        timeout: Option<Duration>,
    ) -> Result<RawResponse, TransportError>;
}
