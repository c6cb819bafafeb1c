// Tests for category vocabulary handling and one-hot expansion

use revprep::cat_utils::{expand, load_vocabulary, sanitize_label};
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

// ============================================================================
// Label Sanitization Tests
// ============================================================================

#[test]
fn test_sanitize_label_strips_punctuation() {
    assert_eq!(sanitize_label("Bars"), "cat_Bars");
    assert_eq!(sanitize_label("Wine & Spirits"), "cat_WineSpirits");
    assert_eq!(sanitize_label("Cajun/Creole"), "cat_CajunCreole");
    assert_eq!(sanitize_label("Tobacco Shops (Vape)"), "cat_TobaccoShopsVape");
    assert_eq!(sanitize_label("Farmers' Markets"), "cat_FarmersMarkets");
    assert_eq!(sanitize_label("Tex-Mex"), "cat_TexMex");
}

#[test]
fn test_load_vocabulary_preserves_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cat_freq.csv");
    write_csv(
        &path,
        &["categories", "n"],
        &[&["Food", "120"], &["Bars", "60"], &["Nightlife", "30"]],
    );

    let vocabulary = load_vocabulary(path.to_str().unwrap()).expect("vocabulary");
    assert_eq!(vocabulary, vec!["Food", "Bars", "Nightlife"]);
}

// ============================================================================
// Expansion Tests
// ============================================================================

fn vocabulary() -> Vec<String> {
    vec!["Bars".to_string(), "Food".to_string(), "Nightlife".to_string()]
}

#[test]
fn test_expand_counts_listed_categories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let infile = dir.path().join("business_preclean1.csv");
    write_csv(
        &infile,
        &["business_id", "categories", "stars"],
        &[
            &["b0", "Bars, Food", "4.0"],
            &["b1", "", "2.5"],
            &["b2", "Food, Food, Nightlife", "3.0"],
        ],
    );
    let outfile = dir.path().join("catframe.csv");

    expand(infile.to_str().unwrap(), &vocabulary(), outfile.to_str().unwrap()).expect("expand");

    let (headers, rows) = read_csv(&outfile);
    assert_eq!(headers, vec!["cat_Bars", "cat_Food", "cat_Nightlife"]);
    assert_eq!(
        rows,
        vec![
            // "Bars, Food" reads 1 in cat_Bars and cat_Food, 0 elsewhere.
            vec!["1", "1", "0"],
            // No categories: a row of zeros, not an error.
            vec!["0", "0", "0"],
            // Occurrences count, uncapped.
            vec!["0", "2", "1"],
        ]
    );
}

#[test]
fn test_expand_row_alignment() {
    let dir = tempfile::tempdir().expect("tempdir");
    let infile = dir.path().join("business_preclean1.csv");
    write_csv(
        &infile,
        &["business_id", "categories"],
        &[&["b0", "Nightlife"], &["b1", "Bars"]],
    );
    let outfile = dir.path().join("catframe.csv");

    expand(infile.to_str().unwrap(), &vocabulary(), outfile.to_str().unwrap()).expect("expand");

    let (_, rows) = read_csv(&outfile);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec!["0", "0", "1"]);
    assert_eq!(rows[1], vec!["1", "0", "0"]);
}

#[test]
fn test_expand_unknown_category_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let infile = dir.path().join("business_preclean1.csv");
    write_csv(
        &infile,
        &["business_id", "categories"],
        &[&["b0", "Bars"], &["b1", "Karaoke"]],
    );
    let outfile = dir.path().join("catframe.csv");

    let err = expand(infile.to_str().unwrap(), &vocabulary(), outfile.to_str().unwrap())
        .expect_err("a category outside the vocabulary must abort");
    let message = err.to_string();
    assert!(message.contains("Karaoke"));
    assert!(message.contains("row 1"));
    assert!(!outfile.exists(), "no partial frame may be left behind");
}

#[test]
fn test_expand_rejects_colliding_column_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let infile = dir.path().join("business_preclean1.csv");
    write_csv(&infile, &["business_id", "categories"], &[&["b0", ""]]);
    let outfile = dir.path().join("catframe.csv");

    // Both labels sanitize to cat_WineSpirits.
    let vocabulary = vec!["Wine & Spirits".to_string(), "Wine/Spirits".to_string()];
    let err = expand(infile.to_str().unwrap(), &vocabulary, outfile.to_str().unwrap())
        .expect_err("colliding column names must abort");
    assert!(err.to_string().contains("cat_WineSpirits"));
}
