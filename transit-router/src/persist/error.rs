//! Persistence error types.

use crate::domain::DomainError;

/// Errors saving or loading a transit base.
///
/// Every load failure is final: a base is either restored completely or
/// not at all.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// Reading or writing the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file does not start with the base magic bytes
    #[error("not a transit base file")]
    BadMagic,

    /// The file was written by a newer format version
    #[error("base format version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The payload is shorter or longer than the header claims
    #[error("payload length mismatch: header says {expected} bytes, found {actual}")]
    LengthMismatch { expected: u64, actual: u64 },

    /// The payload checksum does not match the header
    #[error("checksum mismatch (expected {expected:#010x}, computed {computed:#010x})")]
    ChecksumMismatch { expected: u32, computed: u32 },

    /// The payload could not be decoded
    #[error("decode error: {0}")]
    Decode(String),

    /// The payload decoded but describes an inconsistent base
    #[error("corrupt base: {0}")]
    Corrupt(String),

    /// An id is too large for the encoded form
    #[error("{what} id {value} does not fit in 32 bits")]
    IdOverflow { what: &'static str, value: usize },

    /// The stored catalogue could not be rebuilt
    #[error("corrupt catalogue: {0}")]
    Catalogue(#[from] DomainError),
}

impl From<bitcode::Error> for PersistError {
    fn from(e: bitcode::Error) -> Self {
        PersistError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PersistError::BadMagic;
        assert_eq!(err.to_string(), "not a transit base file");

        let err = PersistError::UnsupportedVersion {
            found: 9,
            supported: 1,
        };
        assert_eq!(
            err.to_string(),
            "base format version 9 is newer than supported version 1"
        );

        let err = PersistError::ChecksumMismatch {
            expected: 0xdead_beef,
            computed: 0x1,
        };
        assert_eq!(
            err.to_string(),
            "checksum mismatch (expected 0xdeadbeef, computed 0x00000001)"
        );

        let err = PersistError::IdOverflow {
            what: "edge",
            value: u32::MAX as usize,
        };
        assert_eq!(err.to_string(), "edge id 4294967295 does not fit in 32 bits");

        let err = PersistError::Corrupt("table size".into());
        assert_eq!(err.to_string(), "corrupt base: table size");
    }

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PersistError = io.into();
        assert!(matches!(err, PersistError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn from_domain_error() {
        let err: PersistError = DomainError::UnknownStop("X".into()).into();
        assert_eq!(err.to_string(), "corrupt catalogue: unknown stop: X");
    }
}
