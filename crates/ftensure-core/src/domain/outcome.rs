//! Successful run outcomes
//!
//! A run either leaves the remote copy untouched because it already matches
//! the local file, or replaces it exactly once. Failures are [`SyncError`]s.
//!
//! [`SyncError`]: super::errors::SyncError

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::newtypes::ContentDigest;

/// Why an upload was performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadReason {
    /// The remote service reported no file at the remote path
    Missing,
    /// The remote digest differs from the local digest
    DigestMismatch,
}

/// Result of a successful sync decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Remote copy already matches; no mutation happened
    UpToDate {
        /// Digest shared by both copies
        digest: ContentDigest,
    },
    /// The local file was uploaded to the remote path
    Uploaded {
        /// Digest of the uploaded content
        digest: ContentDigest,
        /// Remote digest before the upload (None if the file was missing)
        previous: Option<ContentDigest>,
        /// What triggered the upload
        reason: UploadReason,
        /// Version timestamp assigned by the service, if reported
        version: Option<DateTime<Utc>>,
    },
}

impl SyncOutcome {
    /// Returns true if this run wrote to the remote namespace
    pub fn uploaded(&self) -> bool {
        matches!(self, Self::Uploaded { .. })
    }

    /// Digest of the content now held remotely
    pub fn digest(&self) -> &ContentDigest {
        match self {
            Self::UpToDate { digest } | Self::Uploaded { digest, .. } => digest,
        }
    }
}
