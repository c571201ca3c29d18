use chrono::NaiveDate;
use srsforge_client::{BackendRenderClient, HttpRenderClient, RemotePayload, TransportError};
use srsforge_document::{RawInput, expand_on};
use srsforge_traits::CancellationToken;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn payload() -> RemotePayload {
    let raw = RawInput::new("Demo", "Tracks things.", vec!["Ann".into()]).unwrap();
    RemotePayload::from_document(&expand_on(&raw, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()))
}

#[tokio::test]
async fn success_returns_the_body_verbatim() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;
    let pdf = b"%PDF-1.7 fake".to_vec();
    Mock::given(method("POST"))
        .and(path("/api/generate-srs"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(pdf.clone(), "application/pdf"))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpRenderClient::new(&server.uri(), None).unwrap();
    let bytes = client.render(&payload(), &CancellationToken::new()).await.unwrap();
    assert_eq!(bytes, pdf);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["cover"].as_str().unwrap().lines().nth(1), Some("Project: Demo"));
    assert!(body["generalDescription"].is_string());
}

#[tokio::test]
async fn non_success_status_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-srs"))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend down"))
        .mount(&server)
        .await;

    let client = HttpRenderClient::new(&server.uri(), None).unwrap();
    let err = client.render(&payload(), &CancellationToken::new()).await.unwrap_err();
    match err {
        TransportError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "backend down");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn cancellation_abandons_the_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&server)
        .await;

    let client = HttpRenderClient::new(&server.uri(), None).unwrap();
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let err = client.render(&payload(), &token).await.unwrap_err();
    assert!(matches!(err, TransportError::Cancelled));
}

#[tokio::test]
async fn timeout_surfaces_as_a_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let client = HttpRenderClient::new(&server.uri(), Some(Duration::from_millis(100))).unwrap();
    let err = client.render(&payload(), &CancellationToken::new()).await.unwrap_err();
    match err {
        TransportError::Request(source) => assert!(source.is_timeout()),
        other => panic!("expected Request, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_is_a_request_error() {
    // Port 9 (discard) is almost never listening.
    let client = HttpRenderClient::new("http://127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();
    let err = client.render(&payload(), &CancellationToken::new()).await.unwrap_err();
    assert!(matches!(err, TransportError::Request(_)));
}
