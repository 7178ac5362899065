// src/feed/mod.rs

//! Feed retrieval and decoding
//!
//! A `FeedSource` produces the decompressed payload and whole-snapshot hash
//! for a feed variant; `HttpFeedSource` is the production implementation over
//! the NVD endpoints. Decoding the payload into the structured model is a
//! separate step so the change detector can skip it entirely on the fast
//! path.

pub mod client;
pub mod decode;
pub mod model;

pub use client::HttpFeedSource;
pub use model::{CveItem, FeedSnapshot};

use std::fmt;
use std::str::FromStr;

use crate::error::Result;

/// The NVD feed variants tracked by cvewatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedVariant {
    /// Latest recently published CVEs
    Recent,
    /// Recently updated CVEs
    Modified,
}

impl FeedVariant {
    pub const ALL: [FeedVariant; 2] = [FeedVariant::Recent, FeedVariant::Modified];

    /// Stable feed identifier, used as the checkpoint key
    pub fn name(&self) -> &'static str {
        match self {
            FeedVariant::Recent => "recent",
            FeedVariant::Modified => "modified",
        }
    }

    /// Upstream endpoint for this variant
    pub fn url(&self) -> &'static str {
        match self {
            FeedVariant::Recent => {
                "https://nvd.nist.gov/feeds/json/cve/1.0/nvdcve-1.0-recent.json.gz"
            }
            FeedVariant::Modified => {
                "https://nvd.nist.gov/feeds/json/cve/1.0/nvdcve-1.0-modified.json.gz"
            }
        }
    }
}

impl fmt::Display for FeedVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FeedVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recent" => Ok(FeedVariant::Recent),
            "modified" => Ok(FeedVariant::Modified),
            _ => Err(format!("unknown feed variant: {s}")),
        }
    }
}

/// One fetch result: decompressed bytes plus their content hash.
///
/// The hash is computed over `bytes` exactly, uppercase hex (see
/// `hash::snapshot_hash`), so equal payloads always carry equal hashes.
#[derive(Debug, Clone)]
pub struct FeedPayload {
    pub bytes: Vec<u8>,
    pub hash: String,
}

/// Source of feed payloads.
///
/// The seam between the change detector and the transport: the production
/// implementation fetches over HTTP, tests supply payloads directly.
pub trait FeedSource {
    /// Retrieve the decompressed payload for a feed variant
    fn fetch(&self, feed: FeedVariant) -> Result<FeedPayload>;
}
