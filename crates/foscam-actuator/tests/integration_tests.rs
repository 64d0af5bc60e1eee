//! Integration tests for foscam-actuator
//!
//! These tests start a fake camera on a local port and drive it through the
//! real reqwest transport, so URL composition, buffering and normalization
//! are all exercised together.

use std::sync::Arc;
use std::time::Duration;

use actuator_core::{ActuatorOptions, Content, RpcError};
use bytes::Bytes;
use foscam_actuator::testing::{FakeCamera, FakeReply, FAKE_JPEG};
use foscam_actuator::{
    Actuator, CommandError, CommandOptions, CommandResponse, Credentials, DeviceCredentials,
    DeviceDescriptor, FoscamActuator, FoscamConfig, NormalizedResult, StaticCredentials,
    TransportError, NO_CGI_RESULT, PARSE_ERROR,
};
use pretty_assertions::assert_eq;

// =============================================================================
// Test Helpers
// =============================================================================

fn config() -> Arc<FoscamConfig> {
    Arc::new(FoscamConfig::default())
}

fn credentials() -> Arc<StaticCredentials> {
    Arc::new(StaticCredentials::new(Credentials::new("foscam", "foscam8910")))
}

fn actuator_for(descriptor: DeviceDescriptor) -> FoscamActuator {
    FoscamActuator::new(descriptor, ActuatorOptions::new(), config(), credentials())
        .expect("Failed to create actuator")
}

async fn start_camera() -> (FakeCamera, FoscamActuator) {
    let camera = FakeCamera::start().await.expect("Failed to start fake camera");
    let actuator = actuator_for(camera.descriptor());
    (camera, actuator)
}

// =============================================================================
// Status Commands
// =============================================================================

#[tokio::test]
async fn test_reboot_success() {
    let (camera, actuator) = start_camera().await;

    let outcome = actuator.reboot(&CommandOptions::default()).await;
    let response = CommandResponse::from_outcome(outcome).unwrap();
    assert_eq!(
        response,
        CommandResponse::success(NormalizedResult::text_plain("Success"))
    );

    let requests = camera.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["cmd"], "rebootSystem");
    assert_eq!(requests[0]["usr"], "foscam");
    assert_eq!(requests[0]["pwd"], "foscam8910");
}

#[tokio::test]
async fn test_reset_position_auth_error() {
    let (camera, actuator) = start_camera().await;
    camera.reply("ptzReset", FakeReply::Status(-2));

    let outcome = actuator.reset_position(&CommandOptions::default()).await;
    let response = CommandResponse::from_outcome(outcome).unwrap();
    assert_eq!(
        response,
        CommandResponse::failure(RpcError {
            code: -32000,
            message: "Username or password error".to_string()
        })
    );
}

#[tokio::test]
async fn test_goto_preset_sends_preset_name() {
    let (camera, actuator) = start_camera().await;

    actuator
        .goto_preset_default(&CommandOptions::default())
        .await
        .unwrap();

    let requests = camera.requests();
    assert_eq!(requests[0]["cmd"], "ptzGotoPresetPoint");
    assert_eq!(requests[0]["name"], "default");
}

#[tokio::test]
async fn test_unknown_vendor_code() {
    let (camera, actuator) = start_camera().await;
    camera.reply("rebootSystem", FakeReply::Status(-17));

    let err = actuator.reboot(&CommandOptions::default()).await.unwrap_err();
    assert!(matches!(err, CommandError::Vendor { code: Some(-17), .. }));
    assert_eq!(err.rpc_error().unwrap().message, "unknown error");
}

#[tokio::test]
async fn test_malformed_status_document() {
    let (camera, actuator) = start_camera().await;
    camera.reply(
        "ptzReset",
        FakeReply::Raw {
            content_type: "text/plain",
            body: Bytes::from_static(b"<CGI_Result><result>0</res"),
        },
    );

    let err = actuator
        .reset_position(&CommandOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.rpc_error().unwrap().message, PARSE_ERROR);
}

#[tokio::test]
async fn test_status_document_without_root() {
    let (camera, actuator) = start_camera().await;
    camera.reply(
        "ptzReset",
        FakeReply::Raw {
            content_type: "text/html",
            body: Bytes::from_static(b"<html><body>Not here</body></html>"),
        },
    );

    let err = actuator
        .reset_position(&CommandOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.rpc_error().unwrap().message, NO_CGI_RESULT);
}

// =============================================================================
// Image Command
// =============================================================================

#[tokio::test]
async fn test_snap_picture_default_image() {
    let (camera, actuator) = start_camera().await;

    let result = actuator
        .snap_picture(&CommandOptions::default())
        .await
        .unwrap();
    assert_eq!(result.content_type, "image/jpeg");
    assert_eq!(result.content, Content::Binary(Bytes::from_static(FAKE_JPEG)));
    assert_eq!(camera.requests()[0]["cmd"], "snapPicture2");
}

#[tokio::test]
async fn test_snap_picture_arbitrary_bytes() {
    let (camera, actuator) = start_camera().await;
    let payload: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    camera.reply("snapPicture2", FakeReply::Image(Bytes::from(payload.clone())));

    let result = actuator
        .snap_picture(&CommandOptions::default())
        .await
        .unwrap();
    assert_eq!(result.content.as_bytes(), &payload[..]);
}

#[tokio::test]
async fn test_snap_picture_status_body_is_not_inspected() {
    let (camera, actuator) = start_camera().await;
    camera.reply("snapPicture2", FakeReply::Status(-2));

    let result = actuator
        .snap_picture(&CommandOptions::default())
        .await
        .unwrap();
    assert_eq!(result.content_type, "image/jpeg");
    assert!(std::str::from_utf8(result.content.as_bytes())
        .unwrap()
        .contains("<result>-2</result>"));
}

#[tokio::test]
async fn test_snap_picture_empty_body() {
    let (camera, actuator) = start_camera().await;
    camera.reply("snapPicture2", FakeReply::Image(Bytes::new()));

    let result = actuator
        .snap_picture(&CommandOptions::default())
        .await
        .unwrap();
    assert!(result.content.is_empty());
}

// =============================================================================
// Transport Failures
// =============================================================================

#[tokio::test]
async fn test_connection_refused_is_not_normalized() {
    // Reserve a port, then release it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let actuator = actuator_for(DeviceDescriptor::new("FI9821WA", addr.to_string()));
    let outcome = actuator.reboot(&CommandOptions::default()).await;

    let err = CommandResponse::from_outcome(outcome).unwrap_err();
    assert!(matches!(err, TransportError::Request(_)));
}

#[tokio::test]
async fn test_deadline_expiry_is_timeout() {
    let (camera, actuator) = start_camera().await;
    camera.reply(
        "rebootSystem",
        FakeReply::Delayed(Duration::from_secs(5), Box::new(FakeReply::Status(0))),
    );

    let timeout = Duration::from_millis(100);
    let err = actuator
        .reboot(&CommandOptions::with_timeout(timeout))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CommandError::Transport(TransportError::Timeout(d)) if d == timeout
    ));
}

#[tokio::test]
async fn test_no_protocol_never_contacts_camera() {
    let camera = FakeCamera::start().await.unwrap();
    let actuator = FoscamActuator::new(
        camera.descriptor(),
        ActuatorOptions::new(),
        Arc::new(FoscamConfig::default().with_protocol(None)),
        credentials(),
    )
    .unwrap();

    let err = actuator.reboot(&CommandOptions::default()).await.unwrap_err();
    assert!(matches!(
        err,
        CommandError::Transport(TransportError::NotReady(_))
    ));
    assert!(camera.requests().is_empty());
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn test_concurrent_commands_are_independent() {
    let (camera, actuator) = start_camera().await;
    camera.reply(
        "snapPicture2",
        FakeReply::Delayed(
            Duration::from_millis(50),
            Box::new(FakeReply::Image(Bytes::from_static(b"slow image"))),
        ),
    );
    camera.reply("ptzReset", FakeReply::Status(-4));

    let options = CommandOptions::default();
    let (snap, reset) = tokio::join!(
        actuator.snap_picture(&options),
        actuator.reset_position(&options)
    );

    assert_eq!(
        snap.unwrap().content,
        Content::Binary(Bytes::from_static(b"slow image"))
    );
    assert_eq!(
        reset.unwrap_err().rpc_error().unwrap().message,
        "CGI execute fail"
    );
    assert_eq!(camera.requests().len(), 2);
}

#[tokio::test]
async fn test_shared_actuator_across_tasks() {
    let (camera, actuator) = start_camera().await;
    let actuator: Arc<dyn Actuator> = Arc::new(actuator);

    let mut handles = Vec::new();
    for name in ["reboot", "resetPosition", "gotoPresetDefault", "snapPicture"] {
        let actuator = actuator.clone();
        handles.push(tokio::spawn(async move {
            actuator.invoke(name, &CommandOptions::default()).await
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
    assert_eq!(camera.requests().len(), 4);
}

// =============================================================================
// Credentials
// =============================================================================

#[tokio::test]
async fn test_per_device_credentials() {
    let camera = FakeCamera::start().await.unwrap();
    camera.require_credentials("admin", "s3cr&t");

    let provider = DeviceCredentials::new(Credentials::new("foscam", "foscam8910"))
        .with_device(camera.address(), Credentials::new("admin", "s3cr&t"));
    let actuator = FoscamActuator::new(
        camera.descriptor(),
        ActuatorOptions::new(),
        config(),
        Arc::new(provider),
    )
    .unwrap();

    let result = actuator.reboot(&CommandOptions::default()).await.unwrap();
    assert_eq!(result, NormalizedResult::text_plain("Success"));
    assert_eq!(camera.requests()[0]["pwd"], "s3cr&t");
}

#[tokio::test]
async fn test_wrong_credentials_rejected_by_camera() {
    let (camera, actuator) = start_camera().await;
    camera.require_credentials("admin", "other");

    let err = actuator.reboot(&CommandOptions::default()).await.unwrap_err();
    assert_eq!(
        err.rpc_error().unwrap().message,
        "Username or password error"
    );
}

// =============================================================================
// Generic Dispatch
// =============================================================================

#[tokio::test]
async fn test_invoke_unsupported_command() {
    let (camera, actuator) = start_camera().await;

    let err = actuator
        .invoke("panLeft", &CommandOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CommandError::Unsupported(_)));
    assert!(camera.requests().is_empty());
}

#[tokio::test]
async fn test_options_forwarded_unmodified() {
    let camera = FakeCamera::start().await.unwrap();
    let mut options = ActuatorOptions::new();
    options.insert("label".to_string(), serde_json::json!("front door"));

    let actuator =
        FoscamActuator::new(camera.descriptor(), options.clone(), config(), credentials()).unwrap();
    assert_eq!(actuator.options(), &options);
    assert_eq!(actuator.id(), format!("FI9821WA-{}", camera.address()));
}
