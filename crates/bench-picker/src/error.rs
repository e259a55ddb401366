//! Errors raised while picking positions.

use std::io;

use thiserror::Error;

/// Errors that can occur while reading candidates or selecting from them.
///
/// Malformed positions are not errors: they are dropped at the validation
/// boundary and only show up in [`CandidatePool::rejected`](crate::CandidatePool::rejected).
/// Configuration failures have their own [`ConfigError`](crate::ConfigError).
#[derive(Debug, Error)]
pub enum PickError {
    /// No input line was a valid position, so there is nothing to sample.
    #[error("No valid FENs parsed.")]
    NoValidPositions,

    /// Failed to read the input lines.
    #[error("failed to read {input}: {source}")]
    Io { input: String, source: io::Error },
}
