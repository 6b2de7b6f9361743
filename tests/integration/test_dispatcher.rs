use article_relay::core::config::WebhookConfig;
use article_relay::core::pipeline::{aggregate, normalize, validate, WorkflowDispatcher};
use article_relay::core::{CanonicalPayload, DispatchOutcome};
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn webhook(url: String, timeout_ms: u64) -> WebhookConfig {
    WebhookConfig {
        url: Some(url),
        timeout_ms,
        headers: BTreeMap::new(),
        auth_token: None,
    }
}

fn payload() -> CanonicalPayload {
    let submission = validate(&json!({
        "companyDomain": "https://www.Example.com/blog",
        "articleTitle": "AI Trends",
        "article": "Artificial intelligence is rapidly transforming industries across the globe.",
    }))
    .unwrap();
    normalize(submission)
}

#[tokio::test]
async fn test_delivered_on_success_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "domain": "example.com",
            "articleTitle": "AI Trends",
            "wordCount": 9,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dispatcher =
        WorkflowDispatcher::from_config(&webhook(format!("{}/hook", mock_server.uri()), 5_000))
            .unwrap();
    let outcome = dispatcher.dispatch(&payload()).await;

    assert_eq!(
        outcome,
        DispatchOutcome::Delivered {
            status_code: 200,
            body: json!({"ok": true}),
        }
    );
}

#[tokio::test]
async fn test_rejected_keeps_status_and_text_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("workflow exploded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dispatcher =
        WorkflowDispatcher::from_config(&webhook(mock_server.uri(), 5_000)).unwrap();
    let outcome = dispatcher.dispatch(&payload()).await;

    assert_eq!(
        outcome,
        DispatchOutcome::Rejected {
            status_code: 500,
            body: json!("workflow exploded"),
        }
    );

    let result = aggregate(outcome, payload());
    assert!(!result.success);
    assert_eq!(result.message, "Workflow rejected submission (status 500)");
}

#[tokio::test]
async fn test_empty_body_becomes_null() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dispatcher =
        WorkflowDispatcher::from_config(&webhook(mock_server.uri(), 5_000)).unwrap();
    let outcome = dispatcher.dispatch(&payload()).await;

    assert_eq!(
        outcome,
        DispatchOutcome::Delivered {
            status_code: 204,
            body: serde_json::Value::Null,
        }
    );
}

#[tokio::test]
async fn test_slow_endpoint_times_out_without_retry() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true}))
                .set_delay(Duration::from_millis(1_500)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let dispatcher = WorkflowDispatcher::from_config(&webhook(mock_server.uri(), 200)).unwrap();
    let outcome = dispatcher.dispatch(&payload()).await;

    assert_eq!(outcome, DispatchOutcome::TimedOut);
    assert_eq!(
        aggregate(outcome, payload()).message,
        "Workflow endpoint timed out"
    );
}

#[tokio::test]
async fn test_refused_connection_is_unreachable() {
    let dispatcher =
        WorkflowDispatcher::from_config(&webhook("http://127.0.0.1:1/hook".to_string(), 2_000))
            .unwrap();
    let outcome = dispatcher.dispatch(&payload()).await;

    match outcome {
        DispatchOutcome::Unreachable { ref cause } => assert!(!cause.is_empty()),
        other => panic!("expected Unreachable, got {:?}", other),
    }

    let result = aggregate(outcome, payload());
    assert!(!result.success);
    assert!(result.message.starts_with("Workflow endpoint unreachable: "));
    assert!(result.downstream_response.is_none());
    assert_eq!(result.processed_data.domain, "example.com");
}

#[tokio::test]
async fn test_configured_headers_and_bearer_token_are_sent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer s3cret"))
        .and(header("x-relay-source", "article-relay"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"queued": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = webhook(mock_server.uri(), 5_000);
    config
        .headers
        .insert("X-Relay-Source".to_string(), "article-relay".to_string());
    config.auth_token = Some("s3cret".to_string());

    let dispatcher = WorkflowDispatcher::from_config(&config).unwrap();
    let outcome = dispatcher.dispatch(&payload()).await;

    assert!(outcome.is_delivered());
}

#[test]
fn test_non_http_scheme_is_rejected() {
    let err = WorkflowDispatcher::from_config(&webhook("ftp://example.com/hook".to_string(), 1_000))
        .unwrap_err();
    assert!(err.message.contains("http or https"));
}

#[tokio::test]
async fn test_redirect_is_rejected_without_following() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", "/elsewhere")
                .set_body_string("moved"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dispatcher =
        WorkflowDispatcher::from_config(&webhook(format!("{}/hook", mock_server.uri()), 5_000))
            .unwrap();
    let outcome = dispatcher.dispatch(&payload()).await;

    assert_eq!(
        outcome,
        DispatchOutcome::Rejected {
            status_code: 302,
            body: json!("moved"),
        }
    );
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/hook");
}
