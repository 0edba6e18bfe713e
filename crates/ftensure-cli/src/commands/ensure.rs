//! Ensure command - Make the remote copy match the local file
//!
//! 1. Validates the endpoint, remote path and probe options
//! 2. Creates the filetracker and local filesystem adapters
//! 3. Runs the availability probe followed by the sync decision

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use ftensure_client::FiletrackerStore;
use ftensure_core::config::{EnsureConfig, EnsureConfigBuilder};
use ftensure_core::domain::{DomainError, SyncError, SyncOutcome};
use ftensure_core::usecases::{run_ensure, EnsureRequest};
use ftensure_fs::LocalFileSource;
use tracing::info;

/// Arguments of a single sync run
#[derive(Debug, Args)]
pub struct EnsureCommand {
    /// Filetracker service root, e.g. http://127.0.0.1:9999
    pub endpoint: String,

    /// Absolute path of the file in the remote namespace, e.g. /builds/out.bin
    pub remote_path: String,

    /// Local file whose content should be stored remotely
    pub local_path: PathBuf,

    /// Number of liveness probes before giving up [default: 3]
    #[arg(long)]
    pub attempts: Option<u32>,

    /// Delay between liveness probes in milliseconds [default: 3000]
    #[arg(long)]
    pub retry_delay_ms: Option<u64>,

    /// Re-read the remote digest after uploading and compare it
    #[arg(long)]
    pub verify: bool,
}

impl EnsureCommand {
    /// Runs the command
    ///
    /// All inputs are validated before the first request is sent.
    pub async fn execute(&self) -> Result<SyncOutcome, SyncError> {
        let request =
            EnsureRequest::parse(&self.endpoint, &self.remote_path, self.local_path.clone())?;
        let config = self.config()?;

        info!(
            remote_path = %request.remote_path,
            local_path = %request.local_path.display(),
            attempts = config.probe.attempts,
            "Ensuring remote copy"
        );

        let store = Arc::new(FiletrackerStore::new(request.endpoint.clone()));
        let local = Arc::new(LocalFileSource::new());

        run_ensure(store, local, &config, &request).await
    }

    /// Builds the run configuration from defaults and flags
    fn config(&self) -> Result<EnsureConfig, SyncError> {
        let mut builder = EnsureConfigBuilder::new().verify_upload(self.verify);
        if let Some(attempts) = self.attempts {
            builder = builder.probe_attempts(attempts);
        }
        if let Some(delay_ms) = self.retry_delay_ms {
            builder = builder.probe_retry_delay_ms(delay_ms);
        }

        builder.build_validated().map_err(|errors| {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            SyncError::Validation(DomainError::ValidationFailed(message))
        })
    }
}
