// src/feed/decode.rs

//! Decoding raw feed payloads into the structured model
//!
//! All-or-nothing: a malformed payload yields a decode error, never a
//! partially populated snapshot.

use crate::error::{Error, Result};

use super::model::FeedSnapshot;

/// Parse decompressed feed bytes into a snapshot
pub fn decode_snapshot(bytes: &[u8]) -> Result<FeedSnapshot> {
    serde_json::from_slice(bytes).map_err(|e| Error::Decode(format!("malformed CVE feed: {e}")))
}
