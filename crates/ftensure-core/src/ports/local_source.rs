//! Local file source port (driven/secondary port)
//!
//! This module defines read-only access to the local file being synced.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because filesystem errors are adapter-specific;
//!   the use case reports them as a local file failure with context.
//! - File handles are scoped: [`ILocalFileSource::digest`] closes the file
//!   before returning, and [`LocalContent`] owns its handle so dropping it
//!   releases the descriptor on every exit path.

use std::fmt;
use std::path::Path;
use std::pin::Pin;

use tokio::io::AsyncRead;

use crate::domain::newtypes::ContentDigest;

/// Boxed reader type carried by [`LocalContent`]
pub type ContentReader = Pin<Box<dyn AsyncRead + Send + Sync>>;

/// Full content of a local file, ready to be streamed
pub struct LocalContent {
    reader: ContentReader,
    len: u64,
}

impl LocalContent {
    /// Wraps a reader that yields exactly `len` bytes
    pub fn new(reader: impl AsyncRead + Send + Sync + 'static, len: u64) -> Self {
        Self {
            reader: Box::pin(reader),
            len,
        }
    }

    /// Wraps an in-memory buffer
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let len = data.len() as u64;
        Self::new(std::io::Cursor::new(data), len)
    }

    /// Number of bytes the reader yields
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns true for empty content
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Consumes the content, returning the underlying reader
    pub fn into_reader(self) -> ContentReader {
        self.reader
    }
}

impl fmt::Debug for LocalContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalContent")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

/// Port trait for reading the local file
#[async_trait::async_trait]
pub trait ILocalFileSource: Send + Sync {
    /// Computes the SHA-256 digest of the full file content
    ///
    /// # Arguments
    /// * `path` - Local filesystem path
    async fn digest(&self, path: &Path) -> anyhow::Result<ContentDigest>;

    /// Opens the file for a single streaming read
    ///
    /// # Arguments
    /// * `path` - Local filesystem path
    async fn open(&self, path: &Path) -> anyhow::Result<LocalContent>;
}
