// src/error.rs

//! Error taxonomy for cvewatch
//!
//! Every failure kind is terminal for the current check cycle. Retry policy
//! belongs to whatever schedules the checks; the library never retries past
//! the bounded attempts inside the HTTP client, and no failure path leaves a
//! partially written checkpoint behind.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP failure while retrieving a feed
    #[error("feed fetch failed: {0}")]
    Fetch(String),

    /// Payload was not a valid gzip stream
    #[error("feed decompression failed: {0}")]
    Decompress(String),

    /// Decompressed payload did not match the CVE feed schema
    #[error("feed decode failed: {0}")]
    Decode(String),

    /// Checkpoint store read or write failure
    #[error("checkpoint store unavailable: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to construct a component (HTTP client, database)
    #[error("initialization failed: {0}")]
    Init(String),
}
