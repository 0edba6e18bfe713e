//! Service availability use case
//!
//! Gates a run on the remote service being reachable. The service may still
//! be starting when a run begins, so connection-level failures are retried
//! a bounded number of times with a fixed delay. Any other failure is a
//! deterministic server-side answer and ends the run immediately.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::ProbeConfig;
use crate::domain::SyncError;
use crate::ports::IFileStore;

/// Use case for waiting until the remote service answers its liveness check
pub struct AvailabilityProber {
    store: Arc<dyn IFileStore + Send + Sync>,
    config: ProbeConfig,
}

impl AvailabilityProber {
    /// Creates a new AvailabilityProber
    ///
    /// # Arguments
    ///
    /// * `store` - Remote file store to probe
    /// * `config` - Attempt count and inter-attempt delay
    pub fn new(store: Arc<dyn IFileStore + Send + Sync>, config: ProbeConfig) -> Self {
        Self { store, config }
    }

    /// Probes the service until it answers or the attempt budget is spent
    ///
    /// # Returns
    ///
    /// The number of attempts that were made (1 when the first one succeeds)
    ///
    /// # Errors
    ///
    /// - [`SyncError::ConnectivityExhausted`] if every attempt failed to connect
    /// - [`SyncError::Protocol`] on the first non-connection failure, without retry
    pub async fn wait_until_available(&self) -> Result<u32, SyncError> {
        let max_attempts = self.config.attempts.max(1);
        let delay = self.config.retry_delay();
        let mut attempt = 1;

        loop {
            match self.store.ping().await {
                Ok(()) => {
                    if attempt > 1 {
                        info!(attempt, "File store became available after retry");
                    } else {
                        debug!("File store is available");
                    }
                    return Ok(attempt);
                }
                Err(err) if err.is_unreachable() => {
                    warn!(attempt, max_attempts, error = %err, "Failed to connect to file store");

                    if attempt >= max_attempts {
                        return Err(SyncError::ConnectivityExhausted {
                            attempts: attempt,
                            source: err,
                        });
                    }

                    info!(delay_ms = delay.as_millis() as u64, "Retrying liveness probe");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(
                        attempt,
                        status = ?err.status(),
                        error = %err,
                        "File store rejected liveness probe"
                    );
                    return Err(SyncError::Protocol(err));
                }
            }
        }
    }
}
