// src/lib.rs

//! cvewatch - CVE feed change detection
//!
//! Periodically retrieves the NVD CVE feeds, determines which records are new
//! or changed since the previous check, and surfaces only those records.
//!
//! # Architecture
//!
//! - Content-addressed: snapshots and individual records are SHA-256 hashed
//! - Checkpointed: last observed state persists in SQLite across invocations
//! - Fast path: an unchanged snapshot hash skips decoding entirely
//! - Per-record diffing: only records whose content hash moved are reported

pub mod compression;
pub mod db;
pub mod detector;
mod error;
pub mod feed;
pub mod hash;

pub use detector::{ChangeResult, run_check};
pub use error::{Error, Result};
pub use feed::{CveItem, FeedPayload, FeedSnapshot, FeedSource, FeedVariant, HttpFeedSource};
