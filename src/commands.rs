// src/commands.rs

//! Command implementations for the cvewatch CLI
//!
//! Each function backs one subcommand defined in `cli`. Output goes to
//! stdout; whatever schedules these commands owns retry and delivery.

use std::time::Duration;

use cvewatch::db::checkpoint::{self, Checkpoint};
use cvewatch::{ChangeResult, FeedVariant, HttpFeedSource, Result, db, run_check};

/// Initialize the checkpoint database
pub fn cmd_init(db_path: &str) -> Result<()> {
    db::init(db_path)?;
    println!("Checkpoint database initialized at: {db_path}");
    Ok(())
}

/// Parse the --feed argument into the set of variants to check
pub fn parse_feeds(feed: &str) -> std::result::Result<Vec<FeedVariant>, String> {
    if feed.eq_ignore_ascii_case("all") {
        Ok(FeedVariant::ALL.to_vec())
    } else {
        Ok(vec![feed.parse()?])
    }
}

/// Check one or more feeds and print the changed records
pub fn cmd_check(feeds: &[FeedVariant], db_path: &str, json: bool, timeout: Duration) -> Result<()> {
    let mut conn = db::open(db_path)?;
    let source = HttpFeedSource::with_timeout(timeout)?;

    let mut results = Vec::new();
    for feed in feeds {
        results.push(run_check(&mut conn, &source, *feed)?);
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&results).unwrap_or_default()
        );
    } else {
        for result in &results {
            print_result(result);
        }
    }

    Ok(())
}

/// Shorten a hex hash for display
fn short(hash: &str) -> &str {
    hash.get(..12).unwrap_or(hash)
}

fn print_result(result: &ChangeResult) {
    println!(
        "{}: {} changed record(s) (snapshot {})",
        result.feed,
        result.changed.len(),
        short(&result.snapshot_hash)
    );

    for item in &result.changed {
        let severity = item.severity().unwrap_or("-");
        let summary = item.summary().unwrap_or("");
        println!("  {:<18} {:<8} {}", item.id(), severity, summary);
    }
}

/// List stored checkpoints
pub fn cmd_status(db_path: &str) -> Result<()> {
    let conn = db::open(db_path)?;
    let checkpoints = Checkpoint::list_all(&conn)?;

    if checkpoints.is_empty() {
        println!("No feeds checked yet");
        return Ok(());
    }

    println!(
        "{:<10} {:<14} {:>8}  {}",
        "FEED", "SNAPSHOT", "RECORDS", "LAST CHECK"
    );
    for cp in &checkpoints {
        let records = checkpoint::record_count(&conn, &cp.feed)?;
        println!(
            "{:<10} {:<14} {:>8}  {}",
            cp.feed,
            short(&cp.snapshot_hash),
            records,
            cp.checked_at
        );
    }

    Ok(())
}
