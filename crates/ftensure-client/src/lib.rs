//! filetracker-ensure client - Filetracker HTTP API client
//!
//! Provides an async client for the three filetracker calls a sync run needs:
//! - `GET /version` liveness probe
//! - `HEAD /files/{path}` existence and digest query
//! - `PUT /files/{path}` streamed upload
//!
//! ## Modules
//!
//! - [`client`] - Filetracker HTTP client and transport error classification
//! - [`headers`] - Parsing of filetracker metadata headers
//! - [`provider`] - [`IFileStore`] port implementation over the client
//!
//! [`IFileStore`]: ftensure_core::ports::IFileStore

pub mod client;
pub mod headers;
pub mod provider;

pub use client::FiletrackerClient;
pub use provider::FiletrackerStore;
