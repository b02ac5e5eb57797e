//! Error types for the user search client.
//!
//! # Design
//! Each variant is one kind in the fixed taxonomy callers branch on. Variants
//! keep the context needed for diagnostics: the response status and body text
//! for unexpected responses, the underlying transport error for network
//! failures.

use std::error::Error as StdError;
use std::time::Duration;

/// Errors returned by `SearchClient`.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Request parameters were rejected, locally or by the service.
    #[error("bad request params: {0}")]
    BadRequestParams(String),

    /// The service refused to sort on the requested field.
    #[error("invalid order field: {0}")]
    InvalidOrderField(String),

    /// The access token was missing or wrong.
    #[error("bad access token")]
    Unauthorized,

    /// No response arrived within the configured timeout.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The request never completed at the transport level.
    #[error("network failure: {0}")]
    NetworkFailure(#[source] Box<dyn StdError + Send + Sync>),

    /// The response status or body did not match the wire contract.
    #[error("unexpected server response (HTTP {status}): {message}")]
    UnexpectedServerResponse { status: u16, message: String },

    /// The service reported an internal failure.
    #[error("internal server failure: {0}")]
    InternalServerFailure(String),
}

/// Errors building a `ClientConfig` from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
