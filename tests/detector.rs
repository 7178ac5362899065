// tests/detector.rs

//! End-to-end change detection against a file-backed checkpoint store.
//!
//! Feed payloads are gzip-compressed JSON, exercising the same
//! decompress-then-hash path the HTTP source uses, without the network.

use std::collections::HashSet;
use std::io::Write;

use cvewatch::db::checkpoint::{self, Checkpoint};
use cvewatch::{FeedPayload, FeedSource, FeedVariant, compression, db, hash, run_check};
use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

/// Feed source that serves gzip-compressed JSON, like the real endpoints
struct GzipSource {
    compressed: Vec<u8>,
}

impl GzipSource {
    fn new(json: &str) -> Self {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(json.as_bytes()).unwrap();
        Self {
            compressed: encoder.finish().unwrap(),
        }
    }
}

impl FeedSource for GzipSource {
    fn fetch(&self, _feed: FeedVariant) -> cvewatch::Result<FeedPayload> {
        let bytes = compression::gunzip(&self.compressed)?;
        let hash = hash::snapshot_hash(&bytes);
        Ok(FeedPayload { bytes, hash })
    }
}

fn feed_json(items: &[(&str, &str)]) -> String {
    let rendered: Vec<String> = items
        .iter()
        .map(|(id, summary)| {
            format!(
                r#"{{"cve": {{"CVE_data_meta": {{"ID": "{id}"}},
                     "description": {{"description_data": [{{"lang": "en", "value": "{summary}"}}]}}}},
                     "publishedDate": "2023-05-30T12:00Z"}}"#
            )
        })
        .collect();

    format!(
        r#"{{"CVE_data_type": "CVE", "CVE_data_numberOfCVEs": "{}",
             "CVE_data_timestamp": "2023-06-01T07:00Z", "CVE_Items": [{}]}}"#,
        items.len(),
        rendered.join(",")
    )
}

fn setup_db() -> (TempDir, String) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir
        .path()
        .join("cvewatch.db")
        .to_str()
        .unwrap()
        .to_string();
    db::init(&db_path).unwrap();
    (temp_dir, db_path)
}

#[test]
fn test_three_tick_scenario() {
    let (_dir, db_path) = setup_db();
    let mut conn = db::open(&db_path).unwrap();

    // Tick 1: feed returns {A, B, C}, all new
    let tick1 = GzipSource::new(&feed_json(&[
        ("CVE-2023-0001", "record A"),
        ("CVE-2023-0002", "record B"),
        ("CVE-2023-0003", "record C"),
    ]));
    let result = run_check(&mut conn, &tick1, FeedVariant::Recent).unwrap();
    let ids: HashSet<&str> = result.changed.iter().map(|i| i.id()).collect();
    assert_eq!(
        ids,
        HashSet::from(["CVE-2023-0001", "CVE-2023-0002", "CVE-2023-0003"])
    );

    // Tick 2: identical feed, fast path, nothing changed
    let result = run_check(&mut conn, &tick1, FeedVariant::Recent).unwrap();
    assert!(result.changed.is_empty());

    // Tick 3: A modified, B and C unchanged, D new
    let tick3 = GzipSource::new(&feed_json(&[
        ("CVE-2023-0001", "record A, revised"),
        ("CVE-2023-0002", "record B"),
        ("CVE-2023-0003", "record C"),
        ("CVE-2023-0004", "record D"),
    ]));
    let result = run_check(&mut conn, &tick3, FeedVariant::Recent).unwrap();
    let ids: HashSet<&str> = result.changed.iter().map(|i| i.id()).collect();
    assert_eq!(ids, HashSet::from(["CVE-2023-0001", "CVE-2023-0004"]));
}

#[test]
fn test_checkpoint_survives_process_restart() {
    let (_dir, db_path) = setup_db();
    let source = GzipSource::new(&feed_json(&[("CVE-2023-0001", "record A")]));

    {
        let mut conn = db::open(&db_path).unwrap();
        let result = run_check(&mut conn, &source, FeedVariant::Recent).unwrap();
        assert_eq!(result.changed.len(), 1);
    }

    // Fresh connection, same store: the checkpoint carries over
    let mut conn = db::open(&db_path).unwrap();
    let result = run_check(&mut conn, &source, FeedVariant::Recent).unwrap();
    assert!(result.changed.is_empty());
}

#[test]
fn test_store_failure_leaves_prior_checkpoint_intact() {
    let (_dir, db_path) = setup_db();
    let mut conn = db::open(&db_path).unwrap();

    let tick1 = GzipSource::new(&feed_json(&[("CVE-2023-0001", "record A")]));
    run_check(&mut conn, &tick1, FeedVariant::Recent).unwrap();
    let stored = Checkpoint::load(&conn, "recent").unwrap().unwrap();

    // Make the store refuse writes: the commit in tick 2 must fail and the
    // tick 1 checkpoint must stay authoritative.
    conn.pragma_update(None, "query_only", "ON").unwrap();

    let tick2 = GzipSource::new(&feed_json(&[("CVE-2023-0001", "record A, revised")]));
    let err = run_check(&mut conn, &tick2, FeedVariant::Recent).unwrap_err();
    assert!(matches!(err, cvewatch::Error::Store(_)));

    conn.pragma_update(None, "query_only", "OFF").unwrap();

    let after = Checkpoint::load(&conn, "recent").unwrap().unwrap();
    assert_eq!(after, stored);
    assert_eq!(checkpoint::record_count(&conn, "recent").unwrap(), 1);

    // Next tick recovers and re-detects the same change
    let result = run_check(&mut conn, &tick2, FeedVariant::Recent).unwrap();
    assert_eq!(result.changed.len(), 1);
    assert_eq!(result.changed[0].id(), "CVE-2023-0001");
}

#[test]
fn test_corrupt_gzip_payload_is_cycle_terminal() {
    let (_dir, db_path) = setup_db();
    let mut conn = db::open(&db_path).unwrap();

    struct CorruptSource;
    impl FeedSource for CorruptSource {
        fn fetch(&self, _feed: FeedVariant) -> cvewatch::Result<FeedPayload> {
            let bytes = compression::gunzip(b"this is not gzip")?;
            let hash = hash::snapshot_hash(&bytes);
            Ok(FeedPayload { bytes, hash })
        }
    }

    let err = run_check(&mut conn, &CorruptSource, FeedVariant::Modified).unwrap_err();
    assert!(matches!(err, cvewatch::Error::Decompress(_)));
    assert!(Checkpoint::load(&conn, "modified").unwrap().is_none());
}

#[test]
fn test_recent_and_modified_share_a_store() {
    let (_dir, db_path) = setup_db();
    let mut conn = db::open(&db_path).unwrap();

    let recent = GzipSource::new(&feed_json(&[("CVE-2023-0001", "record A")]));
    let modified = GzipSource::new(&feed_json(&[
        ("CVE-2023-0001", "record A"),
        ("CVE-2023-0099", "record Z"),
    ]));

    run_check(&mut conn, &recent, FeedVariant::Recent).unwrap();
    run_check(&mut conn, &modified, FeedVariant::Modified).unwrap();

    let all = Checkpoint::list_all(&conn).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(checkpoint::record_count(&conn, "recent").unwrap(), 1);
    assert_eq!(checkpoint::record_count(&conn, "modified").unwrap(), 2);
}
