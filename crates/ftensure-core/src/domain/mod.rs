//! Domain entities and business logic
//!
//! This module contains the core domain types for filetracker-ensure:
//! - Newtypes for validated endpoints, remote paths and content digests
//! - The run outcome returned by a successful sync
//! - Domain and run-level error types

pub mod errors;
pub mod newtypes;
pub mod outcome;

// Re-export commonly used types
pub use errors::{DigestOrigin, DomainError, StoreError, SyncError};
pub use newtypes::*;
pub use outcome::{SyncOutcome, UploadReason};
