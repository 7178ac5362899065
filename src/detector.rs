// src/detector.rs

//! Change detection pipeline
//!
//! One check cycle per feed: fetch the snapshot, compare its hash against the
//! stored checkpoint, and on a mismatch decode, hash every record, and diff
//! against the persisted per-record hashes. Only records that are new or
//! whose content hash moved are reported. The updated checkpoint and hash map
//! commit in one transaction after all records are hashed, so an abandoned or
//! failed cycle never corrupts the stored state and a rerun from the same
//! state re-detects the same changes.

use rusqlite::Connection;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

use crate::db::checkpoint::{self, Checkpoint, current_timestamp};
use crate::error::Result;
use crate::feed::{CveItem, FeedSource, FeedVariant, decode};
use crate::hash;

/// The changed subset of one feed after a check cycle
#[derive(Debug, Clone, Serialize)]
pub struct ChangeResult {
    /// Feed identifier ("recent" or "modified")
    pub feed: String,
    /// Whole-snapshot hash of the payload that was checked
    pub snapshot_hash: String,
    /// When this check ran (RFC 3339)
    pub checked_at: String,
    /// Records that are new or modified since the last checkpoint
    pub changed: Vec<CveItem>,
}

impl ChangeResult {
    fn unchanged(feed: FeedVariant, snapshot_hash: String) -> Self {
        Self {
            feed: feed.name().to_string(),
            snapshot_hash,
            checked_at: current_timestamp(),
            changed: Vec::new(),
        }
    }
}

/// Run one check cycle for a feed.
///
/// Fast path: if the snapshot hash matches the checkpoint, the feed is
/// unchanged; nothing is decoded and the checkpoint is left untouched. Slow
/// path: decode, hash each record, report those whose identifier is new or
/// whose hash differs from the stored one, then commit the new checkpoint.
///
/// Running twice with no upstream change yields an empty changed set on the
/// second call.
pub fn run_check(
    conn: &mut Connection,
    source: &dyn FeedSource,
    feed: FeedVariant,
) -> Result<ChangeResult> {
    info!("Checking feed '{}'", feed);

    let payload = source.fetch(feed)?;
    let prior = Checkpoint::load(conn, feed.name())?;

    if let Some(prior) = &prior {
        if prior.snapshot_hash == payload.hash {
            debug!(
                "Feed '{}' unchanged since {} (snapshot {})",
                feed, prior.checked_at, payload.hash
            );
            return Ok(ChangeResult::unchanged(feed, payload.hash));
        }
    }

    let snapshot = decode::decode_snapshot(&payload.bytes)?;

    // Hash every record up front; a hashing failure aborts the cycle before
    // anything is persisted.
    let mut record_hashes: BTreeMap<String, String> = BTreeMap::new();
    for item in &snapshot.items {
        record_hashes.insert(item.id().to_string(), hash::record_hash(item)?);
    }

    let prior_hashes = match &prior {
        Some(_) => checkpoint::load_record_hashes(conn, feed.name())?,
        None => HashMap::new(),
    };

    let changed: Vec<CveItem> = snapshot
        .items
        .iter()
        .filter(|item| {
            prior_hashes
                .get(item.id())
                .is_none_or(|prior_hash| prior_hash != &record_hashes[item.id()])
        })
        .cloned()
        .collect();

    let updated = Checkpoint::new(feed.name().to_string(), payload.hash.clone());
    checkpoint::commit_checkpoint(conn, &updated, &record_hashes)?;

    info!(
        "Feed '{}': {} of {} records new or changed",
        feed,
        changed.len(),
        snapshot.items.len()
    );

    Ok(ChangeResult {
        feed: feed.name().to_string(),
        snapshot_hash: payload.hash,
        checked_at: updated.checked_at,
        changed,
    })
}
