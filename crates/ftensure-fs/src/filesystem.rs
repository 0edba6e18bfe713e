//! Local filesystem adapter (secondary/driven adapter)
//!
//! Implements [`ILocalFileSource`] using `tokio::fs` for async file access.
//!
//! ## Design Decisions
//!
//! - **Streamed hashing**: The file is read in fixed-size chunks so memory
//!   use does not grow with file size.
//! - **Scoped handles**: The hashing handle is closed before `digest`
//!   returns; the upload handle is owned by the returned [`LocalContent`].
//! - **Regular files only**: Directories and other special files are
//!   rejected up front instead of failing halfway through a read.

use std::path::Path;

use anyhow::{bail, Context};
use ftensure_core::{
    domain::newtypes::ContentDigest,
    ports::local_source::{ILocalFileSource, LocalContent},
};
use sha2::{Digest, Sha256};
use tokio::{fs::File, io::AsyncReadExt};
use tracing::{debug, instrument};

/// Read buffer size used while hashing
const HASH_CHUNK_SIZE: usize = 64 * 1024;

/// Adapter that bridges the [`ILocalFileSource`] port to the real filesystem.
///
/// This is a zero-sized struct because all operations take their context
/// from the path argument.
#[derive(Debug, Clone, Default)]
pub struct LocalFileSource;

impl LocalFileSource {
    /// Create a new `LocalFileSource`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Opens `path` for reading and returns the handle with its length
async fn open_regular(path: &Path) -> anyhow::Result<(File, u64)> {
    let file = File::open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let metadata = file
        .metadata()
        .await
        .with_context(|| format!("Failed to stat {}", path.display()))?;

    if !metadata.is_file() {
        bail!("{} is not a regular file", path.display());
    }

    Ok((file, metadata.len()))
}

#[async_trait::async_trait]
impl ILocalFileSource for LocalFileSource {
    #[instrument(skip(self), fields(path = %path.display()))]
    async fn digest(&self, path: &Path) -> anyhow::Result<ContentDigest> {
        let (mut file, len) = open_regular(path).await?;
        debug!(bytes = len, "hashing file");

        let mut hasher = Sha256::new();
        let mut buf = vec![0u8; HASH_CHUNK_SIZE];
        let mut total = 0u64;
        loop {
            let n = file
                .read(&mut buf)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
            total += n as u64;
        }

        let digest = ContentDigest::from_sha256(hasher.finalize().into());
        debug!(bytes = total, digest = %digest, "hash computed");
        Ok(digest)
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    async fn open(&self, path: &Path) -> anyhow::Result<LocalContent> {
        let (file, len) = open_regular(path).await?;
        debug!(bytes = len, "opened file for upload");
        Ok(LocalContent::new(file, len))
    }
}
