//! Test utilities for foscam-actuator
//!
//! Provides a fake camera that serves the CGI endpoint over real HTTP, so
//! the whole request/transport/normalize path can be exercised.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use actuator_core::DeviceDescriptor;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use bytes::Bytes;
use parking_lot::RwLock;
use tokio::net::TcpListener;

use crate::error::Result;

/// Smallest byte sequence that starts and ends like a JPEG
pub const FAKE_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0xFF, 0xD9];

/// How the fake camera answers one vendor token
#[derive(Debug, Clone)]
pub enum FakeReply {
    /// `image/jpeg` body
    Image(Bytes),
    /// `CGI_Result` document with this code
    Status(i32),
    /// Arbitrary body
    Raw {
        content_type: &'static str,
        body: Bytes,
    },
    /// Sleep before answering
    Delayed(Duration, Box<FakeReply>),
}

#[derive(Default)]
struct CameraState {
    replies: RwLock<HashMap<String, FakeReply>>,
    /// When set, requests with other credentials get result -2
    credentials: RwLock<Option<(String, String)>>,
    requests: RwLock<Vec<HashMap<String, String>>>,
}

/// A fake Foscam camera that shuts down when dropped
pub struct FakeCamera {
    pub addr: SocketAddr,
    state: Arc<CameraState>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl FakeCamera {
    /// Start a camera on an ephemeral port.
    ///
    /// Defaults: `snapPicture2` returns [`FAKE_JPEG`], every other token
    /// returns result `0`, and any unknown token returns result `-1`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use foscam_actuator::testing::{FakeCamera, FakeReply};
    ///
    /// let camera = FakeCamera::start().await?;
    /// camera.reply("ptzReset", FakeReply::Status(-2));
    /// ```
    pub async fn start() -> Result<Self> {
        let state = Arc::new(CameraState::default());
        {
            let mut replies = state.replies.write();
            replies.insert(
                "snapPicture2".to_string(),
                FakeReply::Image(Bytes::from_static(FAKE_JPEG)),
            );
            for token in ["ptzGotoPresetPoint", "ptzReset", "rebootSystem"] {
                replies.insert(token.to_string(), FakeReply::Status(0));
            }
        }

        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let router = Router::new()
            .route("/cgi-bin/CGIProxy.fcgi", get(cgi_proxy))
            .with_state(state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        Ok(Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Address to put in a [`DeviceDescriptor`] (`127.0.0.1:<port>`)
    pub fn address(&self) -> String {
        self.addr.to_string()
    }

    pub fn descriptor(&self) -> DeviceDescriptor {
        DeviceDescriptor::new("FI9821WA", self.address())
    }

    /// Override the reply for a vendor token
    pub fn reply(&self, vendor_token: &str, reply: FakeReply) {
        self.state
            .replies
            .write()
            .insert(vendor_token.to_string(), reply);
    }

    /// Reject requests whose `usr`/`pwd` differ from these
    pub fn require_credentials(&self, user: &str, password: &str) {
        *self.state.credentials.write() = Some((user.to_string(), password.to_string()));
    }

    /// Decoded query parameters of every request received, in order
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.state.requests.read().clone()
    }

    /// Shutdown the camera gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for FakeCamera {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn cgi_proxy(
    State(state): State<Arc<CameraState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.requests.write().push(params.clone());

    let authorized = match state.credentials.read().as_ref() {
        Some((user, password)) => {
            params.get("usr") == Some(user) && params.get("pwd") == Some(password)
        }
        None => true,
    };

    let mut reply = if authorized {
        params
            .get("cmd")
            .and_then(|cmd| state.replies.read().get(cmd).cloned())
            .unwrap_or(FakeReply::Status(-1))
    } else {
        FakeReply::Status(-2)
    };

    while let FakeReply::Delayed(delay, inner) = reply {
        tokio::time::sleep(delay).await;
        reply = *inner;
    }

    match reply {
        FakeReply::Image(body) => ([(header::CONTENT_TYPE, "image/jpeg")], body).into_response(),
        FakeReply::Status(code) => (
            [(header::CONTENT_TYPE, "text/plain")],
            format!(
                "<CGI_Result>\n    <result>{}</result>\n</CGI_Result>\n",
                code
            ),
        )
            .into_response(),
        FakeReply::Raw { content_type, body } => {
            ([(header::CONTENT_TYPE, content_type)], body).into_response()
        }
        FakeReply::Delayed(..) => unreachable!("delays are unwrapped above"),
    }
}
