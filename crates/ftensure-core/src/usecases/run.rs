//! One complete sync run
//!
//! Inputs are validated before any port is touched; the prober then gates
//! the decider, which runs exactly once. There is no state shared between
//! runs, so repeating a run with an unchanged local file is a no-op.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use super::{AvailabilityProber, EnsureFileUseCase};
use crate::config::EnsureConfig;
use crate::domain::{DomainError, RemoteEndpoint, RemotePath, SyncError, SyncOutcome};
use crate::ports::{IFileStore, ILocalFileSource};

/// Validated inputs of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsureRequest {
    pub endpoint: RemoteEndpoint,
    pub remote_path: RemotePath,
    pub local_path: PathBuf,
}

impl EnsureRequest {
    /// Validates raw caller inputs
    ///
    /// # Errors
    /// Returns [`SyncError::Validation`] for a malformed endpoint or remote path
    pub fn parse(
        endpoint: &str,
        remote_path: &str,
        local_path: impl Into<PathBuf>,
    ) -> Result<Self, SyncError> {
        let remote_path = RemotePath::new(remote_path.to_string())?;
        let endpoint = RemoteEndpoint::new(endpoint)?;
        let local_path = local_path.into();

        if local_path.as_os_str().is_empty() {
            return Err(DomainError::ValidationFailed("Local path must not be empty".to_string()).into());
        }

        Ok(Self {
            endpoint,
            remote_path,
            local_path,
        })
    }
}

/// Runs the availability gate followed by the sync decision
///
/// # Arguments
///
/// * `store` - Remote file store for the request's endpoint
/// * `local` - Read access to local files
/// * `config` - Probe policy and verification switch
/// * `request` - Validated run inputs
///
/// # Errors
///
/// The first fatal [`SyncError`] of either stage
pub async fn run_ensure(
    store: Arc<dyn IFileStore + Send + Sync>,
    local: Arc<dyn ILocalFileSource + Send + Sync>,
    config: &EnsureConfig,
    request: &EnsureRequest,
) -> Result<SyncOutcome, SyncError> {
    info!(endpoint = %request.endpoint, "Waiting for file store");
    AvailabilityProber::new(store.clone(), config.probe.clone())
        .wait_until_available()
        .await?;

    EnsureFileUseCase::new(store, local)
        .with_verification(config.verify_upload)
        .ensure(&request.remote_path, &request.local_path)
        .await
}
