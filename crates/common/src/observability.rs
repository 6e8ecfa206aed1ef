//! Logging setup and log-safe field handling.
//!
//! # Privacy by Default
//!
//! SDK instrumentation uses `#[instrument(skip_all)]` plus an explicit allow-list
//! of fields. Fields fall into three buckets:
//! - **SAFE**: may be logged as-is (token type, role, error kind)
//! - **HASHED**: logged only through [`hash_for_correlation`] (project id, session id)
//! - **NEVER**: must never appear in logs (project secret, token strings, connection data)

use crate::config::ObservabilityConfig;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Errors raised while installing the global tracing subscriber.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObservabilityError {
    /// The configured filter directive could not be parsed.
    #[error("Invalid log filter '{0}'")]
    InvalidFilter(String),

    /// A global subscriber was installed earlier in this process.
    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,
}

/// Hash a field value for correlation in logs (SHA-256, first 8 hex chars)
///
/// Used for project and session identifiers: they correlate log lines for a
/// single session without writing the identifier itself.
///
/// This is a one-way hash for correlation only, not a protection for secrets.
#[must_use]
pub fn hash_for_correlation(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    hex::encode(digest.iter().take(4).copied().collect::<Vec<u8>>())
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when it is set; otherwise `config.log_level` is used as the
/// filter directive.
///
/// # Errors
///
/// - `InvalidFilter` if `RUST_LOG` is unset and `config.log_level` does not parse
/// - `AlreadyInitialized` if another global subscriber is already installed
pub fn init_tracing(config: &ObservabilityConfig) -> Result<(), ObservabilityError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|_| ObservabilityError::InvalidFilter(config.log_level.clone()))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|_| ObservabilityError::AlreadyInitialized)
}
