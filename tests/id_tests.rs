// Tests for id map construction and foreign-key remapping

use revprep::id_utils::{simplify, IdMap};
use std::collections::HashMap;
use std::path::Path;

fn write_csv(path: &Path, headers: &[&str], rows: &[&[&str]]) {
    let mut writer = csv::Writer::from_path(path).expect("csv writer");
    writer.write_record(headers).expect("header");
    for row in rows {
        writer.write_record(*row).expect("row");
    }
    writer.flush().expect("flush");
}

fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut rdr = csv::Reader::from_path(path).expect("csv reader");
    let headers = rdr
        .headers()
        .expect("headers")
        .iter()
        .map(String::from)
        .collect();
    let rows = rdr
        .records()
        .map(|r| r.expect("record").iter().map(String::from).collect())
        .collect();
    (headers, rows)
}

fn user_map(dir: &Path) -> IdMap {
    let path = dir.join("user_id_map.csv");
    write_csv(
        &path,
        &["user_id", "uid"],
        &[&["uAAA", "0"], &["uBBB", "1"], &["uCCC", "2"]],
    );
    IdMap::from_csv(path.to_str().unwrap(), "user_id", "uid", "user id map").expect("user map")
}

fn business_map(dir: &Path) -> IdMap {
    let path = dir.join("business_id_map.csv");
    write_csv(
        &path,
        &["business_id", "bid"],
        &[&["bXXX", "0"], &["bYYY", "1"]],
    );
    IdMap::from_csv(
        path.to_str().unwrap(),
        "business_id",
        "bid",
        "business id map",
    )
    .expect("business map")
}

// ============================================================================
// IdMap Tests
// ============================================================================

#[test]
fn test_id_map_lookup() {
    let dir = tempfile::tempdir().expect("tempdir");
    let map = user_map(dir.path());

    assert_eq!(map.len(), 3);
    assert_eq!(map.get("uBBB").expect("mapped id"), "1");
    assert!(map.contains("uCCC"));
    assert_eq!(map.try_get("uAAA"), Some("0"));
}

#[test]
fn test_id_map_missing_id_is_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let map = user_map(dir.path());

    let err = map.get("uZZZ").expect_err("unmapped id must not default");
    let message = err.to_string();
    assert!(message.contains("uZZZ"));
    assert!(message.contains("user id map"));
    assert_eq!(map.try_get("uZZZ"), None);
}

#[test]
fn test_id_map_duplicate_original_is_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("user_id_map.csv");
    write_csv(
        &path,
        &["user_id", "uid"],
        &[&["uAAA", "0"], &["uAAA", "1"]],
    );

    let err = IdMap::from_csv(path.to_str().unwrap(), "user_id", "uid", "user id map")
        .expect_err("duplicate original ids must fail");
    assert!(err.to_string().contains("uAAA"));
}

#[test]
fn test_id_map_unreadable_file_is_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing.csv");

    assert!(IdMap::from_csv(path.to_str().unwrap(), "user_id", "uid", "user id map").is_err());
}

// ============================================================================
// Row Remapper Tests
// ============================================================================

#[test]
fn test_simplify_renames_and_remaps() {
    let dir = tempfile::tempdir().expect("tempdir");
    let uid_map = user_map(dir.path());
    let bid_map = business_map(dir.path());

    let infile = dir.path().join("train_reviews.csv");
    write_csv(
        &infile,
        &["user_id", "business_id", "stars"],
        &[
            &["uAAA", "bYYY", "4.0"],
            &["uCCC", "bXXX", "1.0"],
            &["uBBB", "bYYY", "5.0"],
        ],
    );
    let outfile = dir.path().join("reviews_simplified.csv");

    simplify(
        infile.to_str().unwrap(),
        outfile.to_str().unwrap(),
        &uid_map,
        &bid_map,
    )
    .expect("simplify");

    let (headers, rows) = read_csv(&outfile);
    assert_eq!(headers, vec!["uid", "bid", "stars"]);
    assert_eq!(
        rows,
        vec![
            vec!["0", "1", "4.0"],
            vec!["2", "0", "1.0"],
            vec!["1", "1", "5.0"],
        ]
    );
}

#[test]
fn test_simplify_round_trip() {
    // Every remapped foreign key must resolve back to its original id under
    // the inverse of the map.
    let dir = tempfile::tempdir().expect("tempdir");
    let uid_map = user_map(dir.path());
    let bid_map = business_map(dir.path());

    let originals = [("uAAA", "bXXX"), ("uBBB", "bXXX"), ("uCCC", "bYYY")];
    let infile = dir.path().join("validate_queries.csv");
    write_csv(
        &infile,
        &["user_id", "business_id"],
        &[&["uAAA", "bXXX"], &["uBBB", "bXXX"], &["uCCC", "bYYY"]],
    );
    let outfile = dir.path().join("validate_simplified.csv");

    simplify(
        infile.to_str().unwrap(),
        outfile.to_str().unwrap(),
        &uid_map,
        &bid_map,
    )
    .expect("simplify");

    let inverse_users: HashMap<&str, &str> =
        [("0", "uAAA"), ("1", "uBBB"), ("2", "uCCC")].into_iter().collect();
    let inverse_businesses: HashMap<&str, &str> =
        [("0", "bXXX"), ("1", "bYYY")].into_iter().collect();

    let (_, rows) = read_csv(&outfile);
    for (row, (original_user, original_business)) in rows.iter().zip(originals) {
        assert_eq!(inverse_users[row[0].as_str()], original_user);
        assert_eq!(inverse_businesses[row[1].as_str()], original_business);
    }
}

#[test]
fn test_simplify_missing_id_aborts_without_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let uid_map = user_map(dir.path());
    let bid_map = business_map(dir.path());

    let infile = dir.path().join("train_reviews.csv");
    write_csv(
        &infile,
        &["user_id", "business_id", "stars"],
        &[&["uAAA", "bXXX", "3.0"], &["uUNSEEN", "bYYY", "2.0"]],
    );
    let outfile = dir.path().join("reviews_simplified.csv");

    let err = simplify(
        infile.to_str().unwrap(),
        outfile.to_str().unwrap(),
        &uid_map,
        &bid_map,
    )
    .expect_err("unmapped foreign key must abort the job");

    let message = err.to_string();
    assert!(message.contains("uUNSEEN"));
    assert!(message.contains("row 1"));
    assert!(!outfile.exists(), "no partial output may be left behind");
}
