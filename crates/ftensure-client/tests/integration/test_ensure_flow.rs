//! Integration tests for a complete sync run over HTTP
//!
//! Each test drives `run_ensure` against a mock filetracker server and
//! checks which requests were made.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use ftensure_client::FiletrackerStore;
use ftensure_core::config::{EnsureConfig, EnsureConfigBuilder};
use ftensure_core::domain::{DigestOrigin, SyncError, SyncOutcome, UploadReason};
use ftensure_core::usecases::{run_ensure, EnsureRequest};
use wiremock::matchers::{body_bytes, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{self, MemorySource};

const LOCAL: &str = "/work/build/out.bin";
const REMOTE: &str = "/builds/out.bin";

fn fast_config() -> EnsureConfig {
    EnsureConfigBuilder::new()
        .probe_attempts(2)
        .probe_retry_delay_ms(10)
        .build()
}

fn request(server_uri: &str) -> EnsureRequest {
    EnsureRequest::parse(server_uri, REMOTE, LOCAL).unwrap()
}

#[tokio::test]
async fn test_missing_remote_is_uploaded() {
    let (server, store) = common::setup_filetracker_mock().await;
    let data = b"fresh build output";
    common::mount_head_missing(&server, REMOTE).await;
    Mock::given(method("PUT"))
        .and(path(format!("/files{REMOTE}")))
        .and(body_bytes(data.to_vec()))
        .respond_with(ResponseTemplate::new(200).insert_header("Last-Modified", common::LAST_MODIFIED))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run_ensure(
        Arc::new(store),
        Arc::new(MemorySource::with_file(LOCAL, data)),
        &fast_config(),
        &request(&server.uri()),
    )
    .await
    .expect("run failed");

    match outcome {
        SyncOutcome::Uploaded {
            digest,
            previous,
            reason,
            version,
        } => {
            assert_eq!(digest.as_str(), common::sha256_hex(data));
            assert!(previous.is_none());
            assert_eq!(reason, UploadReason::Missing);
            assert!(version.is_some());
        }
        other => panic!("expected upload, got {other:?}"),
    }
}

#[tokio::test]
async fn test_matching_remote_is_left_alone() {
    let (server, store) = common::setup_filetracker_mock().await;
    let data = b"unchanged";
    common::mount_head_existing(&server, REMOTE, data).await;
    common::mount_put(&server, REMOTE, 0).await;

    let outcome = run_ensure(
        Arc::new(store),
        Arc::new(MemorySource::with_file(LOCAL, data)),
        &fast_config(),
        &request(&server.uri()),
    )
    .await
    .expect("run failed");

    assert_eq!(
        outcome,
        SyncOutcome::UpToDate {
            digest: common::sha256_hex(data).parse().unwrap()
        }
    );
}

#[tokio::test]
async fn test_changed_remote_is_replaced() {
    let (server, store) = common::setup_filetracker_mock().await;
    common::mount_head_existing(&server, REMOTE, b"old contents").await;
    common::mount_put(&server, REMOTE, 1).await;

    let outcome = run_ensure(
        Arc::new(store),
        Arc::new(MemorySource::with_file(LOCAL, b"new contents")),
        &fast_config(),
        &request(&server.uri()),
    )
    .await
    .expect("run failed");

    match outcome {
        SyncOutcome::Uploaded {
            previous, reason, ..
        } => {
            assert_eq!(reason, UploadReason::DigestMismatch);
            assert_eq!(
                previous.map(|d| d.to_string()),
                Some(common::sha256_hex(b"old contents"))
            );
        }
        other => panic!("expected upload, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_remote_digest_aborts() {
    let (server, store) = common::setup_filetracker_mock().await;
    common::mount_head_with_checksum(&server, REMOTE, "not-a-digest", 3).await;
    common::mount_put(&server, REMOTE, 0).await;

    let err = run_ensure(
        Arc::new(store),
        Arc::new(MemorySource::with_file(LOCAL, b"abc")),
        &fast_config(),
        &request(&server.uri()),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        SyncError::Integrity {
            origin: DigestOrigin::Remote,
            ..
        }
    ));
}

#[tokio::test]
async fn test_unreachable_server_exhausts_attempts() {
    let endpoint = common::closed_endpoint();
    let store = FiletrackerStore::new(endpoint.clone());

    let err = run_ensure(
        Arc::new(store),
        Arc::new(MemorySource::with_file(LOCAL, b"abc")),
        &fast_config(),
        &request(&endpoint.to_string()),
    )
    .await
    .unwrap_err();

    match err {
        SyncError::ConnectivityExhausted { attempts, source } => {
            assert_eq!(attempts, 2);
            assert!(source.is_unreachable());
        }
        other => panic!("expected connectivity failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_dropped_connections_are_retried_until_exhausted() {
    let (endpoint, accepted) = common::dropping_endpoint().await;
    let store = FiletrackerStore::new(endpoint.clone());
    let config = EnsureConfigBuilder::new()
        .probe_attempts(3)
        .probe_retry_delay_ms(10)
        .build();

    let err = run_ensure(
        Arc::new(store),
        Arc::new(MemorySource::with_file(LOCAL, b"abc")),
        &config,
        &request(&endpoint.to_string()),
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), "connectivity");
    assert_eq!(err.exit_code(), 3);
    match err {
        SyncError::ConnectivityExhausted { attempts, source } => {
            assert_eq!(attempts, 3);
            assert!(source.is_unreachable());
        }
        other => panic!("expected connectivity failure, got {other:?}"),
    }
    assert_eq!(accepted.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_version_error_status_stops_before_file_ops() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&server)
        .await;
    let store = FiletrackerStore::new(common::endpoint_of(&server));

    let err = run_ensure(
        Arc::new(store),
        Arc::new(MemorySource::with_file(LOCAL, b"abc")),
        &fast_config(),
        &request(&server.uri()),
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), "protocol");
}

#[tokio::test]
async fn test_second_run_is_idempotent() {
    let (server, store) = common::setup_filetracker_mock().await;
    let data = b"stable artifact";
    common::mount_head_existing(&server, REMOTE, data).await;
    common::mount_put(&server, REMOTE, 0).await;
    let store = Arc::new(store);
    let source = Arc::new(MemorySource::with_file(LOCAL, data));

    for _ in 0..2 {
        let outcome = run_ensure(
            store.clone(),
            source.clone(),
            &fast_config(),
            &request(&server.uri()),
        )
        .await
        .expect("run failed");
        assert!(!outcome.uploaded());
    }
}

#[tokio::test]
async fn test_verified_upload_rechecks_remote() {
    let server = MockServer::start().await;
    common::mount_version(&server).await;
    let data = b"verified";
    Mock::given(method("HEAD"))
        .and(path(format!("/files{REMOTE}")))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    common::mount_put(&server, REMOTE, 1).await;
    common::mount_head_existing(&server, REMOTE, data).await;
    let config = EnsureConfigBuilder::new()
        .probe_retry_delay_ms(10)
        .verify_upload(true)
        .build();

    let outcome = run_ensure(
        Arc::new(FiletrackerStore::new(common::endpoint_of(&server))),
        Arc::new(MemorySource::with_file(LOCAL, data)),
        &config,
        &request(&server.uri()),
    )
    .await
    .expect("verified run failed");

    assert!(outcome.uploaded());
}
