//! FiletrackerStore - IFileStore implementation for a filetracker service
//!
//! Wraps the [`FiletrackerClient`] to fulfil the [`IFileStore`] port contract.
//!
//! ## Design Notes
//!
//! - The adapter adds no retries of its own. Retrying an unreachable service
//!   is the availability prober's job and happens only before the first
//!   file operation.
//! - Errors are passed through as classified by the client.

use async_trait::async_trait;
use ftensure_core::domain::{RemoteEndpoint, RemotePath, StoreError};
use ftensure_core::ports::{IFileStore, LocalContent, RemoteFileInfo, UploadReceipt};
use tracing::trace;

use crate::client::FiletrackerClient;

/// Remote file store backed by the filetracker HTTP API
#[derive(Debug, Clone)]
pub struct FiletrackerStore {
    client: FiletrackerClient,
}

impl FiletrackerStore {
    /// Creates a store for the given service root
    pub fn new(endpoint: RemoteEndpoint) -> Self {
        Self::from_client(FiletrackerClient::new(endpoint))
    }

    /// Creates a store around an existing client
    pub fn from_client(client: FiletrackerClient) -> Self {
        Self { client }
    }

    /// Returns the underlying client
    pub fn client(&self) -> &FiletrackerClient {
        &self.client
    }
}

#[async_trait]
impl IFileStore for FiletrackerStore {
    async fn ping(&self) -> Result<(), StoreError> {
        let version = self.client.get_version().await?;
        trace!(versions = ?version.protocol_versions, "ping ok");
        Ok(())
    }

    async fn head(&self, path: &RemotePath) -> Result<Option<RemoteFileInfo>, StoreError> {
        self.client.head_file(path).await
    }

    async fn put(
        &self,
        path: &RemotePath,
        content: LocalContent,
    ) -> Result<UploadReceipt, StoreError> {
        self.client.put_file(path, content).await
    }
}
