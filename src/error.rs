// Error taxonomy for the refresh cycles

use thiserror::Error;

/// Failures while collecting one tick's inputs.
///
/// Both kinds are recoverable at the cycle boundary: the tick's publish is
/// skipped, previous values stay in place, and the next tick retries.
#[derive(Debug, Error)]
pub enum CollectError {
    /// The container runtime could not be reached or returned an API error.
    #[error("container runtime unavailable: {0}")]
    SourceUnavailable(String),

    /// The host identity lookup failed.
    #[error("hostname unavailable")]
    HostnameUnavailable,
}
