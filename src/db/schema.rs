// src/db/schema.rs

//! Database schema definitions and migrations
//!
//! Defines the SQLite schema for checkpoint storage and provides a
//! migration system to evolve it over time.

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::Result;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the schema version tracking table
fn init_schema_version(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;
    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    init_schema_version(conn)?;

    let version = conn
        .query_row(
            "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Apply all pending migrations to bring the database up to date
pub fn migrate(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;
    debug!("Current schema version: {}", current_version);

    if current_version >= SCHEMA_VERSION {
        debug!("Schema is up to date");
        return Ok(());
    }

    if current_version < 1 {
        migrate_v1(conn)?;
        set_schema_version(conn, 1)?;
        info!("Applied schema migration to version 1");
    }

    Ok(())
}

/// Initial schema - Version 1
///
/// - checkpoints: one row per feed, the last observed snapshot state
/// - record_hashes: per-record content hashes backing slow-path diffing
fn migrate_v1(conn: &Connection) -> Result<()> {
    debug!("Creating schema version 1");

    conn.execute_batch(
        "
        CREATE TABLE checkpoints (
            feed TEXT PRIMARY KEY,
            snapshot_hash TEXT NOT NULL,
            checked_at TEXT NOT NULL
        );

        CREATE TABLE record_hashes (
            feed TEXT NOT NULL REFERENCES checkpoints(feed) ON DELETE CASCADE,
            cve_id TEXT NOT NULL,
            hash TEXT NOT NULL,
            PRIMARY KEY (feed, cve_id)
        );
        ",
    )?;

    Ok(())
}
