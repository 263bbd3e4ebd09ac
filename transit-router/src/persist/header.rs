//! Fixed-size header framing the encoded base.
//!
//! Layout (20 bytes, little-endian):
//!   [0..4]   magic "TRRT"
//!   [4..8]   format version (u32)
//!   [8..16]  payload length (u64)
//!   [16..20] xxHash32 of the payload (u32)

use xxhash_rust::xxh32::xxh32;

use super::PersistError;

/// Magic bytes identifying a transit base file.
pub const MAGIC: [u8; 4] = *b"TRRT";

/// Size of the header in bytes.
pub const HEADER_SIZE: usize = 20;

/// Current format version.
pub const FORMAT_VERSION: u32 = 1;

const XXHASH_SEED: u32 = 0;

/// Prefix `payload` with a header.
pub fn wrap_payload(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    out.extend_from_slice(&xxh32(payload, XXHASH_SEED).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

/// Validate the header and return the payload it frames.
pub fn unwrap_payload(bytes: &[u8]) -> Result<&[u8], PersistError> {
    if bytes.len() < HEADER_SIZE || bytes[..4] != MAGIC {
        return Err(PersistError::BadMagic);
    }

    let version = u32::from_le_bytes(field(bytes, 4));
    if version > FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found: version,
            supported: FORMAT_VERSION,
        });
    }

    let expected_len = u64::from_le_bytes(field(bytes, 8));
    let checksum = u32::from_le_bytes(field(bytes, 16));
    let payload = &bytes[HEADER_SIZE..];

    if payload.len() as u64 != expected_len {
        return Err(PersistError::LengthMismatch {
            expected: expected_len,
            actual: payload.len() as u64,
        });
    }

    let computed = xxh32(payload, XXHASH_SEED);
    if computed != checksum {
        return Err(PersistError::ChecksumMismatch {
            expected: checksum,
            computed,
        });
    }

    Ok(payload)
}

/// Copy `N` bytes starting at `offset`. The caller has checked the length.
fn field<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    out
}
