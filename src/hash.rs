// src/hash.rs

//! Content hashing for feed snapshots and individual CVE records
//!
//! Both hashes are SHA-256, hex encoded. The snapshot hash covers the raw
//! decompressed payload and is uppercase, matching the checksums NVD
//! publishes alongside its feeds. Record hashes cover a canonical JSON
//! serialization of one record and are lowercase.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Hash of a raw snapshot payload (uppercase hex).
///
/// Computed over the decompressed bytes exactly as fetched, so the same
/// payload hashes identically across runs and across machines.
pub fn snapshot_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:X}", hasher.finalize())
}

/// Canonical content hash of a single record (lowercase hex).
///
/// The record is serialized through `serde_json::Value`, whose object
/// representation orders keys lexicographically. Two semantically identical
/// records therefore hash identically regardless of the field order they
/// were constructed or parsed from, and any edit to any field changes the
/// hash.
pub fn record_hash<T: Serialize>(record: &T) -> Result<String> {
    let value = serde_json::to_value(record)
        .map_err(|e| Error::Decode(format!("cannot serialize record for hashing: {e}")))?;
    let mut hasher = Sha256::new();
    hasher.update(value.to_string().as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[test]
    fn test_snapshot_hash_known_value() {
        let hash = snapshot_hash(b"Hello, World!");
        assert_eq!(
            hash,
            "DFFD6021BB2BD5B0AF676290809EC3A53191DD81C7F70A4B28688A362182986F"
        );
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_snapshot_hash_stable() {
        assert_eq!(snapshot_hash(b"payload"), snapshot_hash(b"payload"));
        assert_ne!(snapshot_hash(b"payload"), snapshot_hash(b"payloae"));
    }

    #[derive(Serialize)]
    struct Sample {
        id: String,
        description: String,
        score: f64,
    }

    #[test]
    fn test_record_hash_deterministic() {
        let a = Sample {
            id: "CVE-2023-0001".to_string(),
            description: "buffer overflow".to_string(),
            score: 7.5,
        };
        let b = Sample {
            id: "CVE-2023-0001".to_string(),
            description: "buffer overflow".to_string(),
            score: 7.5,
        };
        assert_eq!(record_hash(&a).unwrap(), record_hash(&b).unwrap());
    }

    #[test]
    fn test_record_hash_sensitive_to_content() {
        let a = Sample {
            id: "CVE-2023-0001".to_string(),
            description: "buffer overflow".to_string(),
            score: 7.5,
        };
        let b = Sample {
            id: "CVE-2023-0001".to_string(),
            description: "heap overflow".to_string(),
            score: 7.5,
        };
        assert_ne!(record_hash(&a).unwrap(), record_hash(&b).unwrap());
    }

    #[test]
    fn test_record_hash_independent_of_field_order() {
        // Same object, keys in different order in the source text
        let a: serde_json::Value =
            serde_json::from_str(r#"{"id":"CVE-2023-0001","score":7.5}"#).unwrap();
        let b: serde_json::Value =
            serde_json::from_str(r#"{"score":7.5,"id":"CVE-2023-0001"}"#).unwrap();
        assert_eq!(record_hash(&a).unwrap(), record_hash(&b).unwrap());
    }

    #[test]
    fn test_record_hash_lowercase() {
        let hash = record_hash(&serde_json::json!({"k": "v"})).unwrap();
        assert_eq!(hash, hash.to_lowercase());
        assert_eq!(hash.len(), 64);
    }
}
