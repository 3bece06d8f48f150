//! End-to-end test: load a YAML provider configuration from disk, then send
//! an alert event through the dispatcher against a mock homeserver.

use alertrix::config::MatrixProviderConfig;
use alertrix::core::{AlertEvent, ConditionResult};
use alertrix::notification::{DeliveryError, MatrixNotifier};
use alertrix::transport::HttpTransport;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config_file(homeserver_url: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp config");
    writeln!(
        file,
        r#"
homeserver-url: {homeserver_url}
access-token: integration-token
internal-room-id: "!int:example.org"
overrides:
  - group: infra
    access-token: infra-token
    internal-room-id: "!infra:example.org"
"#
    )
    .expect("failed to write temp config");
    file
}

fn sample_event(group: &str) -> AlertEvent {
    AlertEvent {
        display_name: "api".to_string(),
        group: group.to_string(),
        success_threshold: 2,
        failure_threshold: 4,
        description: Some("API healthcheck".to_string()),
        condition_results: vec![
            ConditionResult {
                condition: "[STATUS] == 200".to_string(),
                success: false,
            },
            ConditionResult {
                condition: "[RESPONSE_TIME] < 300".to_string(),
                success: true,
            },
        ],
    }
}

#[tokio::test]
async fn sends_alert_loaded_from_yaml_config() {
    let server = MockServer::start().await;
    let config_file = write_config_file(&server.uri());

    Mock::given(method("PUT"))
        .and(path_regex(
            r"^/_matrix/client/r0/rooms/!int:example\.org/send/m\.room\.message/[A-Za-z0-9]{24}$",
        ))
        .and(query_param("access_token", "integration-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = MatrixProviderConfig::load(config_file.path()).expect("config should load");
    assert!(config.is_valid());

    let notifier = MatrixNotifier::new(config, Arc::new(HttpTransport::new(reqwest::Client::new())));
    let result = notifier.send(&sample_event(""), false).await;
    assert!(result.is_ok());

    // Both rendered bodies travel in the same JSON payload.
    let requests = server.received_requests().await.expect("requests recorded");
    let payload: serde_json::Value =
        serde_json::from_slice(&requests[0].body).expect("payload should be JSON");
    assert_eq!(payload["msgtype"], "m.text");
    assert_eq!(payload["format"], "org.matrix.custom.html");
    let body = payload["body"].as_str().expect("plaintext body present");
    let formatted = payload["formatted_body"]
        .as_str()
        .expect("formatted body present");
    assert!(body.contains("has been triggered due to having failed 4 time(s) in a row"));
    assert!(body.contains("\\nAPI healthcheck"));
    assert!(formatted.contains("<blockquote>API healthcheck</blockquote>"));
    assert!(formatted.contains("<li>❌ - <code>[STATUS] == 200</code></li>"));
    assert!(formatted.contains("<li>✅ - <code>[RESPONSE_TIME] < 300</code></li>"));
}

#[tokio::test]
async fn routes_grouped_event_through_override() {
    let server = MockServer::start().await;
    let config_file = write_config_file(&server.uri());

    // The infra override in the file has no homeserver of its own and would
    // resolve to the public default. Point it at the mock server instead.
    let mut config = MatrixProviderConfig::load(config_file.path()).expect("config should load");
    config.overrides[0].homeserver_url = server.uri();

    Mock::given(method("PUT"))
        .and(path_regex(r"^/_matrix/client/r0/rooms/!infra:example\.org/.+$"))
        .and(query_param("access_token", "infra-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = MatrixNotifier::new(config, Arc::new(HttpTransport::new(reqwest::Client::new())));
    let result = notifier.send(&sample_event("infra"), true).await;
    assert!(result.is_ok());

    let requests = server.received_requests().await.expect("requests recorded");
    let payload: serde_json::Value =
        serde_json::from_slice(&requests[0].body).expect("payload should be JSON");
    assert!(payload["body"]
        .as_str()
        .unwrap()
        .contains("has been resolved after passing successfully 2 time(s) in a row"));
}

#[tokio::test]
async fn surfaces_rejection_with_status_and_body() {
    let server = MockServer::start().await;
    let config_file = write_config_file(&server.uri());

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(403).set_body_string("M_FORBIDDEN"))
        .mount(&server)
        .await;

    let config = MatrixProviderConfig::load(config_file.path()).expect("config should load");
    let notifier = MatrixNotifier::new(config, Arc::new(HttpTransport::new(reqwest::Client::new())));

    let result = notifier.send(&sample_event(""), false).await;
    match result {
        Err(DeliveryError::Rejected { status, body }) => {
            assert_eq!(status, 403);
            assert_eq!(body, "M_FORBIDDEN");
        }
        other => panic!("expected Rejected error, got {other:?}"),
    }
}

#[test]
fn rejects_config_with_duplicate_override_groups() {
    let mut file = NamedTempFile::new().expect("failed to create temp config");
    writeln!(
        file,
        r#"
access-token: integration-token
internal-room-id: "!int:example.org"
overrides:
  - group: infra
    access-token: a
    internal-room-id: "!a:example.org"
  - group: infra
    access-token: b
    internal-room-id: "!b:example.org"
"#
    )
    .expect("failed to write temp config");

    let config = MatrixProviderConfig::load(file.path()).expect("config should load");
    assert!(!config.is_valid());
}
