//! Shared test helpers for filetracker integration tests
//!
//! Provides wiremock-based mock server setup for the filetracker endpoints
//! and an in-memory local file source.

use std::collections::HashMap;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ftensure_client::FiletrackerStore;
use ftensure_core::domain::{ContentDigest, RemoteEndpoint};
use ftensure_core::ports::{ILocalFileSource, LocalContent};
use sha2::{Digest, Sha256};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LAST_MODIFIED: &str = "Thu, 15 Jan 2026 10:00:00 +0000";

/// Lowercase hex SHA-256 of `data`
pub fn sha256_hex(data: &[u8]) -> String {
    ContentDigest::from_sha256(Sha256::digest(data).into()).to_string()
}

/// Starts a mock server answering `GET /version` and returns a store for it
pub async fn setup_filetracker_mock() -> (MockServer, FiletrackerStore) {
    let server = MockServer::start().await;
    mount_version(&server).await;
    let store = FiletrackerStore::new(endpoint_of(&server));
    (server, store)
}

pub fn endpoint_of(server: &MockServer) -> RemoteEndpoint {
    RemoteEndpoint::new(&server.uri()).expect("wiremock uri is a valid endpoint")
}

/// Endpoint on a local port nothing listens on
pub fn closed_endpoint() -> RemoteEndpoint {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    RemoteEndpoint::new(&format!("http://127.0.0.1:{port}")).expect("valid endpoint")
}

/// Endpoint that accepts connections and closes them without answering
///
/// Returns the number of connections accepted so far.
pub async fn dropping_endpoint() -> (RemoteEndpoint, Arc<AtomicUsize>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&accepted);
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            drop(stream);
        }
    });
    let endpoint =
        RemoteEndpoint::new(&format!("http://127.0.0.1:{port}")).expect("valid endpoint");
    (endpoint, accepted)
}

pub async fn mount_version(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "protocol_versions": [2] })),
        )
        .mount(server)
        .await;
}

/// Mounts `HEAD /files{remote}` describing a stored copy of `data`
pub async fn mount_head_existing(server: &MockServer, remote: &str, data: &[u8]) {
    mount_head_with_checksum(server, remote, &sha256_hex(data), data.len()).await;
}

pub async fn mount_head_with_checksum(
    server: &MockServer,
    remote: &str,
    checksum: &str,
    size: usize,
) {
    Mock::given(method("HEAD"))
        .and(path(format!("/files{remote}")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("SHA256-Checksum", checksum)
                .insert_header("Logical-Size", size.to_string().as_str())
                .insert_header("Last-Modified", LAST_MODIFIED)
                .insert_header("Content-Encoding", "gzip"),
        )
        .mount(server)
        .await;
}

pub async fn mount_head_missing(server: &MockServer, remote: &str) {
    Mock::given(method("HEAD"))
        .and(path(format!("/files{remote}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

/// Mounts `PUT /files{remote}` accepting any body
pub async fn mount_put(server: &MockServer, remote: &str, expected_calls: u64) {
    Mock::given(method("PUT"))
        .and(path(format!("/files{remote}")))
        .respond_with(ResponseTemplate::new(200).insert_header("Last-Modified", LAST_MODIFIED))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Local file source backed by a map of paths to contents
#[derive(Default)]
pub struct MemorySource {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MemorySource {
    pub fn with_file(path: &str, data: &[u8]) -> Self {
        let source = Self::default();
        source
            .files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), data.to_vec());
        source
    }

    fn read(&self, path: &Path) -> anyhow::Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No such file: {}", path.display()))
    }
}

#[async_trait::async_trait]
impl ILocalFileSource for MemorySource {
    async fn digest(&self, path: &Path) -> anyhow::Result<ContentDigest> {
        Ok(ContentDigest::from_sha256(Sha256::digest(self.read(path)?).into()))
    }

    async fn open(&self, path: &Path) -> anyhow::Result<LocalContent> {
        Ok(LocalContent::from_bytes(self.read(path)?))
    }
}
