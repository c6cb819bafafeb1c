// cat_utils.rs
use crate::csv_utils::CsvBuilder;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::error::Error;

lazy_static! {
    // Characters stripped from category labels when deriving column names.
    static ref DROPPED_CHARS: Regex = Regex::new(r"[ &/()'\-]").unwrap();
}

/// The delimiter between category labels in a business row.
pub const CATEGORY_DELIMITER: &str = ", ";

/// Derives a valid, identifiable column name from a category label by
/// stripping whitespace and punctuation and prefixing `cat_`.
///
/// ```
/// use revprep::cat_utils::sanitize_label;
///
/// assert_eq!(sanitize_label("Bars"), "cat_Bars");
/// assert_eq!(sanitize_label("Wine & Spirits"), "cat_WineSpirits");
/// assert_eq!(sanitize_label("Cajun/Creole"), "cat_CajunCreole");
/// assert_eq!(sanitize_label("Gastropubs (Modern)"), "cat_GastropubsModern");
/// ```
pub fn sanitize_label(label: &str) -> String {
    format!("cat_{}", DROPPED_CHARS.replace_all(label, ""))
}

/// Loads the category vocabulary from the `categories` column of a frequency
/// table such as `cat_freq.csv`, preserving its order — the vocabulary is
/// the column schema of the one-hot frame.
pub fn load_vocabulary(file_path: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let mut table = CsvBuilder::from_csv(file_path);
    if let Some(e) = table.take_error() {
        return Err(format!("failed to read '{}': {}", file_path, e).into());
    }

    table
        .get_column("categories")
        .ok_or(format!("column 'categories' not found in '{}'", file_path).into())
}

/// Expands the delimited `categories` string of each business at `infile`
/// into one count column per vocabulary entry, saving the frame as
/// `outfile`. Rows stay aligned with the input table.
///
/// A business with no categories yields a row of zeros. A category listed by
/// a business but absent from the vocabulary is fatal, as is a pair of
/// labels that sanitize to the same column name. Prints a progress line
/// every 5000 rows and "Completed!" once the frame is written.
pub fn expand(infile: &str, vocabulary: &[String], outfile: &str) -> Result<(), Box<dyn Error>> {
    let mut business = CsvBuilder::from_csv(infile);
    if let Some(e) = business.take_error() {
        return Err(format!("failed to read '{}': {}", infile, e).into());
    }

    let categories_index = business
        .column_index("categories")
        .ok_or(format!("column 'categories' not found in '{}'", infile))?;

    // Column names, checked for post-sanitization collisions up front.
    let headers: Vec<String> = vocabulary.iter().map(|cat| sanitize_label(cat)).collect();
    let mut seen = HashSet::new();
    for (cat, header) in vocabulary.iter().zip(&headers) {
        if !seen.insert(header.as_str()) {
            return Err(format!(
                "category '{}' sanitizes to '{}', which another category already claimed",
                cat, header
            )
            .into());
        }
    }

    let column_of: HashMap<&str, usize> = vocabulary
        .iter()
        .enumerate()
        .map(|(i, cat)| (cat.as_str(), i))
        .collect();

    let mut frame = Vec::new();
    if let Some(rows) = business.get_data() {
        for (index, row) in rows.iter().enumerate() {
            let mut counts = vec![0i64; vocabulary.len()];

            let cell = row.get(categories_index).map(|s| s.as_str()).unwrap_or("");
            if !cell.is_empty() {
                for cat in cell.split(CATEGORY_DELIMITER) {
                    let column = column_of.get(cat).ok_or(format!(
                        "category '{}' on row {} of '{}' is not in the vocabulary",
                        cat, index, infile
                    ))?;
                    counts[*column] += 1;
                }
            }

            frame.push(counts.iter().map(|n| n.to_string()).collect());

            if index % 5000 == 0 {
                println!("Processing row {}...", index);
            }
        }
    }

    CsvBuilder::from_raw_data(headers, frame).save_as(outfile)?;
    println!("Completed!");

    Ok(())
}
