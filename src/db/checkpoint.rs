// src/db/checkpoint.rs

//! Checkpoint model - the last observed state per feed
//!
//! A checkpoint records the whole-snapshot hash and timestamp of the last
//! successful check, and the per-record hash map lives in `record_hashes`
//! keyed by the same feed name. Loading a checkpoint for a feed never checked
//! before returns `None`; callers treat a first run as "everything is new".

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::{BTreeMap, HashMap};

use crate::error::Result;

/// Get current timestamp as an RFC 3339 string
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339()
}

/// Checkpoint represents the last successfully processed state of one feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    pub feed: String,
    pub snapshot_hash: String,
    pub checked_at: String,
}

impl Checkpoint {
    /// Create a new Checkpoint stamped with the current time
    pub fn new(feed: String, snapshot_hash: String) -> Self {
        Self {
            feed,
            snapshot_hash,
            checked_at: current_timestamp(),
        }
    }

    /// Load the checkpoint for a feed, or None if the feed was never checked
    pub fn load(conn: &Connection, feed: &str) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT feed, snapshot_hash, checked_at FROM checkpoints WHERE feed = ?1",
        )?;

        let checkpoint = stmt.query_row([feed], Self::from_row).optional()?;

        Ok(checkpoint)
    }

    /// List all stored checkpoints
    pub fn list_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT feed, snapshot_hash, checked_at FROM checkpoints ORDER BY feed",
        )?;

        let checkpoints = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(checkpoints)
    }

    /// Delete the checkpoint (and its record hashes) for a feed
    pub fn delete(conn: &Connection, feed: &str) -> Result<()> {
        conn.execute("DELETE FROM checkpoints WHERE feed = ?1", [feed])?;
        Ok(())
    }

    /// Convert a database row to a Checkpoint
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            feed: row.get(0)?,
            snapshot_hash: row.get(1)?,
            checked_at: row.get(2)?,
        })
    }
}

/// Load the per-record hash map for a feed (record identifier -> content hash)
pub fn load_record_hashes(conn: &Connection, feed: &str) -> Result<HashMap<String, String>> {
    let mut stmt = conn.prepare("SELECT cve_id, hash FROM record_hashes WHERE feed = ?1")?;

    let rows = stmt.query_map([feed], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut hashes = HashMap::new();
    for row in rows {
        let (id, hash) = row?;
        hashes.insert(id, hash);
    }

    Ok(hashes)
}

/// Count the record hashes stored for a feed
pub fn record_count(conn: &Connection, feed: &str) -> Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM record_hashes WHERE feed = ?1",
        [feed],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Commit a checkpoint and its full per-record hash map in one transaction.
///
/// The previous map is replaced wholesale, so record identifiers that aged
/// out of the feed drop out of the store. Either the entire new state lands
/// or the prior state remains visible.
pub fn commit_checkpoint(
    conn: &mut Connection,
    checkpoint: &Checkpoint,
    record_hashes: &BTreeMap<String, String>,
) -> Result<()> {
    super::transaction(conn, |tx| {
        tx.execute(
            "INSERT INTO checkpoints (feed, snapshot_hash, checked_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(feed) DO UPDATE SET
                snapshot_hash = excluded.snapshot_hash,
                checked_at = excluded.checked_at",
            params![
                &checkpoint.feed,
                &checkpoint.snapshot_hash,
                &checkpoint.checked_at,
            ],
        )?;

        tx.execute(
            "DELETE FROM record_hashes WHERE feed = ?1",
            [&checkpoint.feed],
        )?;

        let mut stmt =
            tx.prepare("INSERT INTO record_hashes (feed, cve_id, hash) VALUES (?1, ?2, ?3)")?;
        for (cve_id, hash) in record_hashes {
            stmt.execute(params![&checkpoint.feed, cve_id, hash])?;
        }

        Ok(())
    })
}
