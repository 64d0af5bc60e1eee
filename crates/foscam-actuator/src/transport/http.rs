//! reqwest-backed transport

use std::time::Duration;

use actuator_core::TransportError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use super::{RawResponse, Transport};
use crate::config::{FoscamConfig, Protocol};
use crate::error::Result;
use crate::request::RequestDescriptor;

/// HTTP or HTTPS transport, chosen once from configuration
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// `None` when no protocol is configured
    client: Option<(Protocol, Client)>,
    default_timeout: Duration,
}

impl HttpTransport {
    /// Build the client for `config.protocol`.
    ///
    /// With no protocol configured this succeeds, and every request then
    /// fails with [`TransportError::NotReady`].
    pub fn from_config(config: &FoscamConfig) -> Result<Self> {
        let client = match config.protocol {
            Some(protocol) => Some((protocol, build_client(protocol, config)?)),
            None => None,
        };

        Ok(Self {
            client,
            default_timeout: config.timeout(),
        })
    }
}

fn build_client(protocol: Protocol, config: &FoscamConfig) -> reqwest::Result<Client> {
    let builder = Client::builder().connect_timeout(config.connect_timeout());
    let builder = match protocol {
        Protocol::Http => builder,
        Protocol::Https => builder.https_only(true),
    };
    builder.build()
}

/// Category of a reqwest failure. The error's `Display` carries the full URL,
/// password included, so only this goes into logs.
fn failure_kind(e: &reqwest::Error) -> &'static str {
    if e.is_connect() {
        "connect"
    } else if e.is_builder() {
        "builder"
    } else if e.is_redirect() {
        "redirect"
    } else if e.is_body() {
        "body"
    } else if e.is_decode() {
        "decode"
    } else if e.is_request() {
        "request"
    } else {
        "other"
    }
}

/// Drop the request URL from a reqwest cause so the error can be shown to a
/// user. Other causes and variants are returned unchanged.
pub fn without_url(err: TransportError) -> TransportError {
    match err {
        TransportError::Request(cause) => match cause.downcast::<reqwest::Error>() {
            Ok(e) => TransportError::request((*e).without_url()),
            Err(cause) => TransportError::Request(cause),
        },
        other => other,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn protocol(&self) -> Option<Protocol> {
        self.client.as_ref().map(|(protocol, _)| *protocol)
    }

    #[instrument(skip_all, fields(encoding = ?request.encoding))]
    async fn execute(
        &self,
        request: &RequestDescriptor,
        timeout: Option<Duration>,
    ) -> std::result::Result<RawResponse, TransportError> {
        let Some((_, client)) = &self.client else {
            return Err(TransportError::NotReady(
                "no HTTP or HTTPS client configured".to_string(),
            ));
        };

        let deadline = timeout.unwrap_or(self.default_timeout);
        debug!(url = %request.redacted_url(), ?deadline, "Sending CGI request");

        let exchange = async {
            let response = client
                .request(request.method.clone(), request.url.as_str())
                .send()
                .await?;
            let status = response.status();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            let body = response.bytes().await?;

            Ok::<_, reqwest::Error>(RawResponse {
                status: status.as_u16(),
                content_type,
                body,
            })
        };

        let raw = match tokio::time::timeout(deadline, exchange).await {
            Err(_) => return Err(TransportError::Timeout(deadline)),
            Ok(Err(e)) if e.is_timeout() => return Err(TransportError::Timeout(deadline)),
            Ok(Err(e)) => {
                debug!(
                    url = %request.redacted_url(),
                    kind = failure_kind(&e),
                    "CGI request failed"
                );
                return Err(TransportError::request(e));
            }
            Ok(Ok(raw)) => raw,
        };

        debug!(
            status = raw.status,
            content_type = raw.content_type.as_deref().unwrap_or("-"),
            bytes = raw.body.len(),
            "Received CGI response"
        );
        if !(200..300).contains(&raw.status) {
            warn!(status = raw.status, "Camera answered with a non-success status");
        }

        Ok(raw)
    }
}
