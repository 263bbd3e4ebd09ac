//! Domain error types.
//!
//! These errors represent inconsistencies in the network description
//! handed to the catalogue. They are distinct from build and I/O errors.

/// Errors raised while assembling a catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A bus or distance refers to a stop that was never added
    #[error("unknown stop: {0}")]
    UnknownStop(String),

    /// A stop name was registered twice
    #[error("duplicate stop: {0}")]
    DuplicateStop(String),

    /// A bus name was registered twice
    #[error("duplicate bus: {0}")]
    DuplicateBus(String),

    /// No road distance is registered for two consecutive stops, in either direction
    #[error("no road distance between {from} and {to}")]
    MissingDistance { from: String, to: String },
}
