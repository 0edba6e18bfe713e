//! Integration tests for the liveness probe endpoint

use std::sync::atomic::Ordering;

use ftensure_client::{FiletrackerClient, FiletrackerStore};
use ftensure_core::ports::IFileStore;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn test_version_reports_protocols() {
    let (server, _store) = common::setup_filetracker_mock().await;
    let client = FiletrackerClient::new(common::endpoint_of(&server));

    let info = client.get_version().await.expect("version query failed");

    assert_eq!(info.protocol_versions, vec![2]);
}

#[tokio::test]
async fn test_ping_succeeds_against_live_server() {
    let (_server, store) = common::setup_filetracker_mock().await;

    store.ping().await.expect("ping failed");
}

#[tokio::test]
async fn test_ping_tolerates_unexpected_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;
    let store = FiletrackerStore::new(common::endpoint_of(&server));

    store.ping().await.expect("ping should only need a success status");
}

#[tokio::test]
async fn test_ping_error_status_is_not_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let store = FiletrackerStore::new(common::endpoint_of(&server));

    let err = store.ping().await.unwrap_err();

    assert!(!err.is_unreachable());
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_ping_closed_port_is_unreachable() {
    let store = FiletrackerStore::new(common::closed_endpoint());

    let err = store.ping().await.unwrap_err();

    assert!(err.is_unreachable(), "unexpected classification: {err:?}");
    assert!(err.to_string().contains("/version"));
    assert!(
        err.to_string().to_lowercase().contains("refused"),
        "root cause missing from message: {err}"
    );
}

#[tokio::test]
async fn test_ping_dropped_connection_is_unreachable() {
    let (endpoint, accepted) = common::dropping_endpoint().await;
    let store = FiletrackerStore::new(endpoint);

    let err = store.ping().await.unwrap_err();

    assert!(err.is_unreachable(), "unexpected classification: {err:?}");
    assert_eq!(err.status(), None);
    assert_eq!(accepted.load(Ordering::SeqCst), 1);
}
