// rating_utils.rs
use crate::csv_utils::CsvBuilder;
use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use std::fs::File;

/// A validation row: a query whose true rating is known.
#[derive(Debug, Deserialize)]
pub struct ValidationRow {
    pub user_id: String,
    pub stars: f64,
}

/// A held-out query row; no rating is present.
#[derive(Debug, Deserialize)]
pub struct QueryRow {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
struct UserRow {
    user_id: String,
    average_stars: f64,
}

#[derive(Debug, Deserialize)]
struct BusinessRow {
    stars: f64,
}

fn open(file_path: &str) -> Result<csv::Reader<File>, Box<dyn Error>> {
    let file =
        File::open(file_path).map_err(|e| format!("failed to read '{}': {}", file_path, e))?;
    Ok(csv::Reader::from_reader(file))
}

/// Loads the validation set's rows, in file order.
pub fn load_validation(file_path: &str) -> Result<Vec<ValidationRow>, Box<dyn Error>> {
    let mut rdr = open(file_path)?;
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: ValidationRow =
            result.map_err(|e| format!("bad row in '{}': {}", file_path, e))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Loads the held-out query set's rows, in file order.
pub fn load_queries(file_path: &str) -> Result<Vec<QueryRow>, Box<dyn Error>> {
    let mut rdr = open(file_path)?;
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: QueryRow = result.map_err(|e| format!("bad row in '{}': {}", file_path, e))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Loads each user's historical average rating, keyed by original user id,
/// along with the order-independent list of averages (for the global mean).
pub fn load_user_means(
    file_path: &str,
) -> Result<(HashMap<String, f64>, Vec<f64>), Box<dyn Error>> {
    let mut rdr = open(file_path)?;
    let mut means = HashMap::new();
    let mut all = Vec::new();
    for result in rdr.deserialize() {
        let row: UserRow = result.map_err(|e| format!("bad row in '{}': {}", file_path, e))?;
        all.push(row.average_stars);
        means.insert(row.user_id, row.average_stars);
    }
    Ok((means, all))
}

/// Loads every business's rating.
pub fn load_business_stars(file_path: &str) -> Result<Vec<f64>, Box<dyn Error>> {
    let mut rdr = open(file_path)?;
    let mut all = Vec::new();
    for result in rdr.deserialize() {
        let row: BusinessRow = result.map_err(|e| format!("bad row in '{}': {}", file_path, e))?;
        all.push(row.stars);
    }
    Ok(all)
}

/// Arithmetic mean; NaN over an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Root-mean-square-error of paired predictions against true values.
///
/// The slices must be the same length; the shorter length wins the zip, so
/// callers are expected to pass aligned vectors.
pub fn rmse(truth: &[f64], predicted: &[f64]) -> f64 {
    let n = truth.len() as f64;
    let sum_sq: f64 = truth
        .iter()
        .zip(predicted)
        .map(|(t, p)| (t - p) * (t - p))
        .sum();
    (sum_sq / n).sqrt()
}

/// RMSE of a single constant guess against every true value.
///
/// ```
/// use revprep::rating_utils::rmse_constant;
///
/// let truth = [1.0, 3.0, 5.0];
/// assert!((rmse_constant(&truth, 3.0) - (8.0f64 / 3.0).sqrt()).abs() < 1e-12);
/// ```
pub fn rmse_constant(truth: &[f64], guess: f64) -> f64 {
    let n = truth.len() as f64;
    let sum_sq: f64 = truth.iter().map(|t| (t - guess) * (t - guess)).sum();
    (sum_sq / n).sqrt()
}

/// Predicts each row's rating as its user's historical average. A user
/// absent from the per-user table is fatal; no fallback rating is invented
/// for unseen users.
pub fn per_user_predictions(
    user_ids: &[String],
    user_means: &HashMap<String, f64>,
    source: &str,
) -> Result<Vec<f64>, Box<dyn Error>> {
    let mut predictions = Vec::with_capacity(user_ids.len());
    for (index, user_id) in user_ids.iter().enumerate() {
        match user_means.get(user_id) {
            Some(stars) => predictions.push(*stars),
            None => {
                return Err(format!(
                    "user id '{}' (row {} of '{}') has no average_stars entry in the user table",
                    user_id, index, source
                )
                .into());
            }
        }
    }
    Ok(predictions)
}

/// Writes the submission table: one row per held-out query, `index` counting
/// from 0 and `stars` carrying the prediction.
pub fn write_submission(file_path: &str, predictions: &[f64]) -> Result<(), Box<dyn Error>> {
    let rows = predictions
        .iter()
        .enumerate()
        .map(|(index, stars)| vec![index.to_string(), stars.to_string()])
        .collect();

    CsvBuilder::from_raw_data(vec!["index".to_string(), "stars".to_string()], rows)
        .save_as(file_path)?;

    Ok(())
}
