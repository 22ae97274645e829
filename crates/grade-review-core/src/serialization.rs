//! Canonical encoding for ledger state
//!
//! DAG-CBOR gives a deterministic byte encoding, so every replica that holds
//! the same state computes the same commitment. Only string map keys are
//! representable; callers encode keyed tables as ordered sequences.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Errors from canonical encoding
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// DAG-CBOR decoding error
    #[error("DAG-CBOR error: {0}")]
    DagCbor(String),

    /// Value could not be encoded
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Result type for canonical encoding
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serialize any serde-compatible type to DAG-CBOR bytes
pub fn to_vec<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_ipld_dagcbor::to_vec(value).map_err(|e| {
        SerializationError::InvalidFormat(format!("Failed to serialize to DAG-CBOR: {e}"))
    })
}

/// Deserialize DAG-CBOR bytes to any serde-compatible type
pub fn from_slice<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<T> {
    serde_ipld_dagcbor::from_slice(bytes).map_err(|e| SerializationError::DagCbor(e.to_string()))
}

/// Serialize to DAG-CBOR and return the SHA-256 digest
pub fn hash_canonical<T: Serialize>(value: &T) -> Result<Hash32> {
    let bytes = to_vec(value)?;
    Ok(Hash32::digest(&bytes))
}

/// 32-byte content hash
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hash32(pub [u8; 32]);

impl Hash32 {
    /// Hash raw bytes with SHA-256
    pub fn digest(data: &[u8]) -> Self {
        let mut out = [0u8; 32];
        out.copy_from_slice(&Sha256::digest(data));
        Self(out)
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex encoding
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: u64,
        label: String,
        grade: Option<u64>,
    }

    #[test]
    fn test_encoding_is_stable() {
        let sample = Sample {
            id: 1,
            label: "Grade calculation error".to_string(),
            grade: Some(90),
        };
        let first = hash_canonical(&sample).unwrap();
        let second = hash_canonical(&sample).unwrap();
        assert_eq!(first, second);

        let decoded: Sample = from_slice(&to_vec(&sample).unwrap()).unwrap();
        assert_eq!(decoded, sample);
    }

    #[test]
    fn test_distinct_values_hash_differently() {
        let a = Sample {
            id: 1,
            label: "a".to_string(),
            grade: None,
        };
        let b = Sample {
            id: 2,
            label: "a".to_string(),
            grade: None,
        };
        assert_ne!(hash_canonical(&a).unwrap(), hash_canonical(&b).unwrap());
    }

    #[test]
    fn test_hex_rendering() {
        let empty = Hash32::digest(b"");
        assert_eq!(
            empty.to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        let result: Result<Sample> = from_slice(&[0xff, 0x00, 0x13]);
        assert!(matches!(result, Err(SerializationError::DagCbor(_))));
    }
}
