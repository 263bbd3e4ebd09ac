//! Request processing error types.

use crate::domain::DomainError;
use crate::persist::PersistError;
use crate::router::BuildError;

/// Errors that abort a `make_base` or `process_requests` run.
///
/// Lookups that miss are not errors; they are answered with an
/// `error_message` in the response document.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The input is not a valid request document
    #[error("invalid request document: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The base requests describe an inconsistent network
    #[error("invalid network: {0}")]
    Domain(#[from] DomainError),

    /// The router could not be built
    #[error("router build failed: {0}")]
    Build(#[from] BuildError),

    /// Saving or loading the base failed
    #[error(transparent)]
    Persist(#[from] PersistError),
}
