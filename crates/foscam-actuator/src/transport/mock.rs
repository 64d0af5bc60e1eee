//! Mock transport for testing

use std::collections::HashMap;
use std::io;
use std::time::Duration;

use actuator_core::TransportError;
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;

use super::{RawResponse, Transport};
use crate::config::Protocol;
use crate::request::RequestDescriptor;

/// Scripted reply for one vendor token
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this body with status 200
    Body(Bytes),
    /// Fail as if the connection was refused
    Refused,
    /// Wait, then return the body. Subject to the call deadline.
    Delayed(Duration, Bytes),
}

impl MockReply {
    /// A `CGI_Result` document carrying `code`
    pub fn status(code: i32) -> Self {
        MockReply::Body(Bytes::from(format!(
            "<CGI_Result>\n    <result>{}</result>\n</CGI_Result>\n",
            code
        )))
    }
}

/// In-memory transport that records every request
pub struct MockTransport {
    protocol: Option<Protocol>,
    /// Replies keyed by the `cmd` query value
    replies: RwLock<HashMap<String, MockReply>>,
    requests: RwLock<Vec<RequestDescriptor>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            protocol: Some(Protocol::Http),
            replies: RwLock::new(HashMap::new()),
            requests: RwLock::new(Vec::new()),
        }
    }

    /// A transport with no protocol configured
    pub fn not_ready() -> Self {
        Self {
            protocol: None,
            ..Self::new()
        }
    }

    /// Script the reply for a vendor token
    pub fn reply(&self, vendor_token: &str, reply: MockReply) {
        self.replies.write().insert(vendor_token.to_string(), reply);
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.read().clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn protocol(&self) -> Option<Protocol> {
        self.protocol
    }

    async fn execute(
        &self,
        request: &RequestDescriptor,
        timeout: Option<Duration>,
    ) -> Result<RawResponse, TransportError> {
        if self.protocol.is_none() {
            return Err(TransportError::NotReady("mock transport has no protocol".into()));
        }

        self.requests.write().push(request.clone());

        let token = request.query_param("cmd").unwrap_or_default();
        let reply = self.replies.read().get(token).cloned();

        let body = match reply {
            Some(MockReply::Body(body)) => body,
            Some(MockReply::Refused) => {
                return Err(TransportError::request(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )))
            }
            Some(MockReply::Delayed(delay, body)) => {
                if let Some(deadline) = timeout.filter(|t| *t < delay) {
                    tokio::time::sleep(deadline).await;
                    return Err(TransportError::Timeout(deadline));
                }
                tokio::time::sleep(delay).await;
                body
            }
            None => {
                return Err(TransportError::request(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no mock reply for cmd '{}'", token),
                )))
            }
        };

        Ok(RawResponse {
            status: 200,
            content_type: None,
            body,
        })
    }
}
