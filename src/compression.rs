// src/compression.rs

//! Gzip decompression for feed payloads
//!
//! The NVD feeds are served gzip-compressed. Payloads are validated by magic
//! bytes before decoding so a truncated or mislabeled response fails with a
//! decompression error rather than a confusing decode error downstream.

use flate2::read::GzDecoder;
use std::io::Read;

use crate::error::{Error, Result};

/// Gzip magic bytes: 1f 8b
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Check whether a payload starts with the gzip magic bytes
pub fn is_gzip(data: &[u8]) -> bool {
    data.len() >= 2 && data[0..2] == GZIP_MAGIC
}

/// Decompress a gzip payload to a Vec
pub fn gunzip(data: &[u8]) -> Result<Vec<u8>> {
    if !is_gzip(data) {
        return Err(Error::Decompress(
            "payload is missing gzip magic bytes".to_string(),
        ));
    }

    let mut decoder = GzDecoder::new(data);
    let mut output = Vec::new();
    decoder
        .read_to_end(&mut output)
        .map_err(|e| Error::Decompress(format!("invalid gzip stream: {e}")))?;

    Ok(output)
}
