//! filetracker-ensure fs - Local file access
//!
//! Provides:
//! - Streamed SHA-256 digests of local files
//! - Scoped read handles for streaming uploads
//!
//! ## Modules
//!
//! - [`filesystem`] - Local filesystem adapter implementing [`ILocalFileSource`]
//!
//! [`ILocalFileSource`]: ftensure_core::ports::ILocalFileSource

pub mod filesystem;

pub use filesystem::LocalFileSource;
