//! Conditional upload use case
//!
//! Decides whether the remote copy of a file must be replaced by the local
//! file and performs the replacement. The decision is content-addressed:
//! the remote digest reported by a metadata query is compared with the
//! SHA-256 of the local bytes. A run performs at most one upload and never
//! retries it.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::{
    ContentDigest, DigestOrigin, RemotePath, SyncError, SyncOutcome, UploadReason,
};
use crate::ports::{IFileStore, ILocalFileSource, RemoteFileInfo};

/// Use case for making the remote file byte-identical to a local file
pub struct EnsureFileUseCase {
    store: Arc<dyn IFileStore + Send + Sync>,
    local: Arc<dyn ILocalFileSource + Send + Sync>,
    verify_upload: bool,
}

impl EnsureFileUseCase {
    /// Creates a new EnsureFileUseCase with the required dependencies
    ///
    /// # Arguments
    ///
    /// * `store` - Remote file store holding the synced copy
    /// * `local` - Read access to the local file
    pub fn new(
        store: Arc<dyn IFileStore + Send + Sync>,
        local: Arc<dyn ILocalFileSource + Send + Sync>,
    ) -> Self {
        Self {
            store,
            local,
            verify_upload: false,
        }
    }

    /// Enables re-querying the remote digest after an upload
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify_upload = verify;
        self
    }

    /// Brings the remote file at `remote_path` in line with `local_path`
    ///
    /// This method:
    /// 1. Queries remote existence and digest
    /// 2. Compares the remote digest with the local digest (skipped if missing)
    /// 3. Uploads the local file if it is missing remotely or the digests differ
    ///
    /// # Returns
    ///
    /// [`SyncOutcome::UpToDate`] when nothing was written, otherwise
    /// [`SyncOutcome::Uploaded`]
    ///
    /// # Errors
    ///
    /// - [`SyncError::Protocol`] for any non-404 metadata failure or failed upload
    /// - [`SyncError::Integrity`] for a missing or malformed remote digest
    /// - [`SyncError::LocalFile`] if the local file cannot be read
    /// - [`SyncError::VerificationFailed`] if verification is on and the
    ///   remote digest does not match after upload
    #[instrument(skip_all, fields(remote_path = %remote_path, local_path = %local_path.display()))]
    pub async fn ensure(
        &self,
        remote_path: &RemotePath,
        local_path: &Path,
    ) -> Result<SyncOutcome, SyncError> {
        // Step 1: existence check
        let remote = self
            .store
            .head(remote_path)
            .await
            .map_err(SyncError::Protocol)?;

        // Step 2: digest comparison
        let (reason, previous, digest) = match remote {
            None => {
                info!("Remote file not found");
                let digest = self.local_digest(local_path).await?;
                (UploadReason::Missing, None, digest)
            }
            Some(info) => {
                debug!(
                    size_bytes = ?info.logical_size,
                    last_modified = ?info.last_modified,
                    content_encoding = ?info.content_encoding,
                    "Remote file metadata"
                );
                let remote_digest = remote_digest(&info)?;
                let local_digest = self.local_digest(local_path).await?;

                info!(remote_hash = %remote_digest, "remote hash");
                info!(local_hash = %local_digest, "local hash");

                if remote_digest == local_digest {
                    info!("Skipping file upload");
                    return Ok(SyncOutcome::UpToDate {
                        digest: local_digest,
                    });
                }

                (UploadReason::DigestMismatch, Some(remote_digest), local_digest)
            }
        };

        // Step 3: conditional transfer
        let content = self
            .local
            .open(local_path)
            .await
            .map_err(|e| local_file_error(local_path, e))?;

        info!(size_bytes = content.len(), reason = ?reason, "Uploading file to file store");
        let receipt = self
            .store
            .put(remote_path, content)
            .await
            .map_err(SyncError::Protocol)?;
        debug!(version = ?receipt.version, "Upload accepted");

        if self.verify_upload {
            self.verify(remote_path, &digest).await?;
        }

        Ok(SyncOutcome::Uploaded {
            digest,
            previous,
            reason,
            version: receipt.version,
        })
    }

    async fn local_digest(&self, local_path: &Path) -> Result<ContentDigest, SyncError> {
        self.local
            .digest(local_path)
            .await
            .map_err(|e| local_file_error(local_path, e))
    }

    /// Re-reads remote metadata and requires the uploaded digest
    async fn verify(
        &self,
        remote_path: &RemotePath,
        expected: &ContentDigest,
    ) -> Result<(), SyncError> {
        let info = self
            .store
            .head(remote_path)
            .await
            .map_err(SyncError::Protocol)?;

        let Some(info) = info else {
            return Err(SyncError::VerificationFailed {
                expected: expected.clone(),
                actual: "<not found>".to_string(),
            });
        };

        let actual = remote_digest(&info)?;
        if actual == *expected {
            debug!("Upload verified");
            return Ok(());
        }

        Err(SyncError::VerificationFailed {
            expected: expected.clone(),
            actual: actual.to_string(),
        })
    }
}

/// Validates the digest reported in remote metadata
fn remote_digest(info: &RemoteFileInfo) -> Result<ContentDigest, SyncError> {
    let raw = info.checksum.as_deref().ok_or_else(|| SyncError::Integrity {
        origin: DigestOrigin::Remote,
        value: String::new(),
        reason: "SHA256-Checksum header missing from metadata response".to_string(),
    })?;

    ContentDigest::new(raw.to_string())
        .map_err(|e| SyncError::integrity(DigestOrigin::Remote, raw, e))
}

fn local_file_error(path: &Path, err: anyhow::Error) -> SyncError {
    SyncError::LocalFile {
        path: path.display().to_string(),
        message: format!("{err:#}"),
    }
}
