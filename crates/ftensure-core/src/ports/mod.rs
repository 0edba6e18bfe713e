//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the use cases depend
//! on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IFileStore`] - Remote file storage service (liveness, metadata, upload)
//! - [`ILocalFileSource`] - Read-only access to the local file being synced

pub mod file_store;
pub mod local_source;

pub use file_store::{IFileStore, RemoteFileInfo, UploadReceipt};
pub use local_source::{ILocalFileSource, LocalContent};
