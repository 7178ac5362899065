// src/db/mod.rs

//! SQLite-backed checkpoint store
//!
//! One database holds one checkpoint row per feed plus the per-record hash
//! map persisted alongside it. All writes for a check cycle go through a
//! single SQLite transaction, so a checkpoint is never partially visible.

pub mod checkpoint;
pub mod schema;

use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::Result;

/// Initialize the checkpoint database, creating parent directories and
/// applying any pending schema migrations
pub fn init(db_path: &str) -> Result<()> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let conn = open(db_path)?;
    schema::migrate(&conn)?;

    info!("Checkpoint database ready at {}", db_path);
    Ok(())
}

/// Open a connection to an existing checkpoint database
pub fn open(db_path: &str) -> Result<Connection> {
    let conn = Connection::open(db_path)?;

    conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;

    Ok(conn)
}

/// Run a closure inside a SQLite transaction, committing on success.
///
/// On error the transaction rolls back and the prior state stays visible.
pub fn transaction<T, F>(conn: &mut Connection, f: F) -> Result<T>
where
    F: FnOnce(&rusqlite::Transaction) -> Result<T>,
{
    let tx = conn.transaction()?;
    let result = f(&tx)?;
    tx.commit()?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_commits() {
        let mut conn = Connection::open_in_memory().unwrap();
        schema::migrate(&conn).unwrap();

        transaction(&mut conn, |tx| {
            tx.execute(
                "INSERT INTO checkpoints (feed, snapshot_hash, checked_at) VALUES ('recent', 'AA', 'now')",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM checkpoints", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let mut conn = Connection::open_in_memory().unwrap();
        schema::migrate(&conn).unwrap();

        let result: Result<()> = transaction(&mut conn, |tx| {
            tx.execute(
                "INSERT INTO checkpoints (feed, snapshot_hash, checked_at) VALUES ('recent', 'AA', 'now')",
                [],
            )?;
            Err(crate::error::Error::Init("forced failure".to_string()))
        });
        assert!(result.is_err());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM checkpoints", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
