//! Domain error types
//!
//! This module defines the error types used across the sync guard:
//! - [`DomainError`] for validation failures of domain values
//! - [`StoreError`] for the classified outcome of a remote service call
//! - [`SyncError`] for the run-level failure taxonomy surfaced to the caller

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use super::newtypes::ContentDigest;

/// Errors that can occur while constructing domain values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid remote path format
    #[error("Invalid remote path: {0}")]
    InvalidRemotePath(String),

    /// Invalid service endpoint address
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Invalid content digest format (expected 64 chars of [0-9a-z])
    #[error("Invalid digest format: {0}")]
    InvalidDigest(String),

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

/// Classified failure of a single call against the remote file store
///
/// Only [`StoreError::Unreachable`] is ever retried, and only by the
/// availability prober.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No response arrived: refused, DNS, connect timeout, or dropped connection
    #[error("{operation} {url}: service unreachable: {message}")]
    Unreachable {
        /// HTTP verb of the failed call
        operation: &'static str,
        /// Full request URL
        url: String,
        /// Transport-level description
        message: String,
    },

    /// The service answered with a non-success status
    #[error("{operation} {url} returned HTTP {status}")]
    Status {
        /// HTTP verb of the failed call
        operation: &'static str,
        /// Full request URL
        url: String,
        /// Response status code
        status: u16,
    },

    /// Any other request or response failure
    #[error("{operation} {url} failed: {message}")]
    Transport {
        /// HTTP verb of the failed call
        operation: &'static str,
        /// Full request URL
        url: String,
        /// Transport-level description
        message: String,
    },
}

impl StoreError {
    /// Returns true for connection-level failures
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }

    /// Returns the HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Which side of the comparison a digest came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestOrigin {
    /// Computed from the local file
    Local,
    /// Reported by the remote service
    Remote,
}

impl Display for DigestOrigin {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Run-level failure taxonomy
///
/// Every variant is fatal: the run stops at the first error and no partial
/// state is kept. A digest *mismatch* is not an error, it is an input to
/// the upload decision.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An input value was rejected before any network activity
    #[error("Validation failed: {0}")]
    Validation(#[from] DomainError),

    /// The liveness probe never reached the service
    #[error("Service unreachable after {attempts} attempt(s): {source}")]
    ConnectivityExhausted {
        /// Number of probe attempts made
        attempts: u32,
        /// Error of the last attempt
        source: StoreError,
    },

    /// The service answered in a way that is not retried
    #[error("Protocol error: {0}")]
    Protocol(#[source] StoreError),

    /// A digest failed the well-formedness check
    #[error("Integrity error: {origin} digest {value:?} is malformed: {reason}")]
    Integrity {
        /// Where the digest came from
        origin: DigestOrigin,
        /// The rejected value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// The local file could not be read
    #[error("Local file error: {path}: {message}")]
    LocalFile {
        /// Local path as given by the caller
        path: String,
        /// Underlying failure, with context chain
        message: String,
    },

    /// The remote copy does not match after a verified upload
    #[error("Upload verification failed: expected {expected}, remote reports {actual}")]
    VerificationFailed {
        /// Digest of the uploaded local content
        expected: ContentDigest,
        /// What the service reported afterwards
        actual: String,
    },
}

impl SyncError {
    /// Short, stable name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::ConnectivityExhausted { .. } => "connectivity",
            Self::Protocol(_) => "protocol",
            Self::Integrity { .. } => "integrity",
            Self::LocalFile { .. } => "local_file",
            Self::VerificationFailed { .. } => "verification",
        }
    }

    /// Process exit code for this failure class (success is 0)
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::ConnectivityExhausted { .. } => 3,
            Self::Protocol(_) => 4,
            Self::Integrity { .. } => 5,
            Self::LocalFile { .. } => 6,
            Self::VerificationFailed { .. } => 7,
        }
    }

    /// Builds an integrity error from a rejected digest
    pub(crate) fn integrity(origin: DigestOrigin, value: impl Into<String>, err: DomainError) -> Self {
        Self::Integrity {
            origin,
            value: value.into(),
            reason: err.to_string(),
        }
    }
}
