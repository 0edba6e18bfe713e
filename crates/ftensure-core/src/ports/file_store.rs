//! Remote file store port (driven/secondary port)
//!
//! This module defines the interface for the remote file storage service.
//! The primary implementation targets the filetracker HTTP protocol, but the
//! use cases only rely on three logical verbs: liveness, metadata, upload.
//!
//! ## Design Notes
//!
//! - Errors are typed [`StoreError`]s rather than `anyhow::Error` because the
//!   use cases branch on them (retry only on unreachable, fatal otherwise).
//! - A missing file is not an error: [`IFileStore::head`] returns `Ok(None)`.
//! - Header values are passed through unvalidated; digest validation is a
//!   use-case concern so that malformed digests are classified uniformly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::local_source::LocalContent;
use crate::domain::errors::StoreError;
use crate::domain::newtypes::RemotePath;

/// Metadata reported by the service for an existing remote file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFileInfo {
    /// Raw `SHA256-Checksum` header value (None if the header was absent)
    pub checksum: Option<String>,
    /// Uncompressed size in bytes (`Logical-Size`)
    pub logical_size: Option<u64>,
    /// Version timestamp of the stored copy (`Last-Modified`)
    pub last_modified: Option<DateTime<Utc>>,
    /// Storage encoding of the remote copy (`Content-Encoding`)
    pub content_encoding: Option<String>,
}

/// Acknowledgement of a completed upload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Version timestamp assigned by the service (`Last-Modified`)
    pub version: Option<DateTime<Utc>>,
}

/// Port trait for the remote file storage service
///
/// ## Implementation Notes
///
/// - Implementations must not retry on their own; retry policy lives in
///   the availability prober.
/// - Connection-level failures must map to [`StoreError::Unreachable`] so
///   the prober can tell them apart from server-side rejections.
#[async_trait::async_trait]
pub trait IFileStore: Send + Sync {
    /// Issues a lightweight liveness request
    ///
    /// # Returns
    /// `Ok(())` if the service answered with a success status
    async fn ping(&self) -> Result<(), StoreError>;

    /// Queries existence and metadata of a remote file
    ///
    /// # Arguments
    /// * `path` - The remote file path
    ///
    /// # Returns
    /// `Some(info)` on success, `None` if the service reports not found
    async fn head(&self, path: &RemotePath) -> Result<Option<RemoteFileInfo>, StoreError>;

    /// Replaces the remote file with the given content
    ///
    /// # Arguments
    /// * `path` - The remote file path
    /// * `content` - Full local content; consumed and released by the call
    async fn put(
        &self,
        path: &RemotePath,
        content: LocalContent,
    ) -> Result<UploadReceipt, StoreError>;
}
