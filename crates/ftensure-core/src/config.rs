//! Configuration module for filetracker-ensure.
//!
//! The tool has no configuration file: a run is configured from built-in
//! defaults plus optional command-line overrides, assembled through
//! [`EnsureConfigBuilder`] and checked by [`EnsureConfig::validate`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EnsureConfig with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for a sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnsureConfig {
    pub probe: ProbeConfig,
    /// Re-query the remote digest after an upload and require a match.
    pub verify_upload: bool,
}

/// Availability probe settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Total number of liveness attempts, including the first.
    pub attempts: u32,
    /// Fixed delay between attempts, in milliseconds.
    pub retry_delay_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            attempts: 3,
            retry_delay_ms: 3000,
        }
    }
}

impl ProbeConfig {
    /// Delay between attempts as a [`Duration`].
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

// ---------------------------------------------------------------------------
// EnsureConfig::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"probe.attempts"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Upper bound on the inter-attempt delay (one hour).
const MAX_RETRY_DELAY_MS: u64 = 60 * 60 * 1000;

impl EnsureConfig {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.probe.attempts == 0 {
            errors.push(ValidationError {
                field: "probe.attempts".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.probe.retry_delay_ms > MAX_RETRY_DELAY_MS {
            errors.push(ValidationError {
                field: "probe.retry_delay_ms".into(),
                message: format!("must not exceed {MAX_RETRY_DELAY_MS}"),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// EnsureConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing an [`EnsureConfig`] programmatically.
///
/// Starts from [`EnsureConfig::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust
/// use ftensure_core::config::EnsureConfigBuilder;
///
/// let config = EnsureConfigBuilder::new()
///     .probe_attempts(5)
///     .probe_retry_delay_ms(500)
///     .verify_upload(true)
///     .build();
/// assert_eq!(config.probe.attempts, 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnsureConfigBuilder {
    config: EnsureConfig,
}

impl EnsureConfigBuilder {
    /// Create a new builder initialised with [`EnsureConfig::default`] values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe_attempts(mut self, attempts: u32) -> Self {
        self.config.probe.attempts = attempts;
        self
    }

    pub fn probe_retry_delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.probe.retry_delay_ms = delay_ms;
        self
    }

    pub fn verify_upload(mut self, verify: bool) -> Self {
        self.config.verify_upload = verify;
        self
    }

    pub fn build(self) -> EnsureConfig {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<EnsureConfig, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}
