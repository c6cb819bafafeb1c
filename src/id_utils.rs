// id_utils.rs
use crate::csv_utils::CsvBuilder;
use std::collections::HashMap;
use std::error::Error;

/// Lookup from the dataset's original opaque string identifiers to their
/// compact integer replacements, built once per entity type from a two-column
/// map table such as `user_id_map.csv` or `business_id_map.csv`.
///
/// The compact side is kept as its decimal string rendering, since every
/// consumer writes it straight back into a CSV cell.
#[derive(Debug)]
pub struct IdMap {
    label: String,
    map: HashMap<String, String>,
}

impl IdMap {
    /// Builds the map from `file_path`, taking originals from `original_col`
    /// and compact ids from `compact_col`. `label` names the map in
    /// diagnostics ("user id map", "business id map").
    ///
    /// ```
    /// use revprep::id_utils::IdMap;
    /// use csv::Writer;
    ///
    /// let tmp_file = tempfile::Builder::new()
    ///     .suffix(".csv")
    ///     .tempfile()
    ///     .expect("failed to create temporary file");
    /// let mut writer = Writer::from_path(tmp_file.path()).expect("csv writer");
    /// writer.write_record(&["user_id", "uid"]).expect("header");
    /// writer.write_record(&["AbC123", "0"]).expect("row");
    /// writer.flush().expect("flush");
    ///
    /// let map = IdMap::from_csv(
    ///     tmp_file.path().to_str().unwrap(),
    ///     "user_id",
    ///     "uid",
    ///     "user id map",
    /// ).unwrap();
    ///
    /// assert_eq!(map.get("AbC123").unwrap(), "0");
    /// assert!(map.get("missing").is_err());
    /// ```
    pub fn from_csv(
        file_path: &str,
        original_col: &str,
        compact_col: &str,
        label: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let mut table = CsvBuilder::from_csv(file_path);
        if let Some(e) = table.take_error() {
            return Err(format!("failed to read '{}': {}", file_path, e).into());
        }

        let original_index = table
            .column_index(original_col)
            .ok_or(format!("column '{}' not found in '{}'", original_col, file_path))?;
        let compact_index = table
            .column_index(compact_col)
            .ok_or(format!("column '{}' not found in '{}'", compact_col, file_path))?;

        let mut map = HashMap::new();
        if let Some(rows) = table.get_data() {
            for (index, row) in rows.iter().enumerate() {
                let original = row.get(original_index).cloned().unwrap_or_default();
                let compact = row.get(compact_index).cloned().unwrap_or_default();
                if original.is_empty() {
                    return Err(format!(
                        "empty '{}' value on row {} of '{}'",
                        original_col, index, file_path
                    )
                    .into());
                }
                // Originals are unique within their table; a repeat means the
                // map file itself is corrupt.
                if map.insert(original.clone(), compact).is_some() {
                    return Err(format!(
                        "duplicate '{}' value '{}' on row {} of '{}'",
                        original_col, original, index, file_path
                    )
                    .into());
                }
            }
        }

        println!("Completed building {}.", label);

        Ok(IdMap {
            label: label.to_string(),
            map,
        })
    }

    /// Looks up the compact id for `original`. An unmapped id is an error
    /// carrying the id and the map's label, never a silent default.
    pub fn get(&self, original: &str) -> Result<&str, Box<dyn Error>> {
        self.try_get(original)
            .ok_or_else(|| format!("id '{}' is not present in the {}", original, self.label).into())
    }

    /// Looks up the compact id for `original`, returning `None` when the id
    /// is unmapped. Consumers that drop unrepresentable ids (the friend list
    /// compactor) go through this instead of `get`.
    pub fn try_get(&self, original: &str) -> Option<&str> {
        self.map.get(original).map(|s| s.as_str())
    }

    pub fn contains(&self, original: &str) -> bool {
        self.map.contains_key(original)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Rewrites the `user_id`/`business_id` foreign keys of the interaction table
/// at `infile` to their compact ids, renames the columns to `uid`/`bid`, and
/// saves the result as `outfile`.
///
/// Any row referencing an id absent from either map aborts the job before the
/// output file is created, so a failed run leaves nothing half-written.
pub fn simplify(
    infile: &str,
    outfile: &str,
    uid_map: &IdMap,
    bid_map: &IdMap,
) -> Result<(), Box<dyn Error>> {
    let mut table = CsvBuilder::from_csv(infile);
    if let Some(e) = table.take_error() {
        return Err(format!("failed to read '{}': {}", infile, e).into());
    }

    let user_index = table
        .column_index("user_id")
        .ok_or(format!("column 'user_id' not found in '{}'", infile))?;
    let business_index = table
        .column_index("business_id")
        .ok_or(format!("column 'business_id' not found in '{}'", infile))?;

    let headers = table
        .get_headers()
        .ok_or(format!("'{}' has no header row", infile))?
        .to_vec();

    let mut remapped = Vec::new();
    if let Some(rows) = table.get_data() {
        for (index, row) in rows.iter().enumerate() {
            let mut row = row.clone();
            let original_user = row.get(user_index).cloned().unwrap_or_default();
            let original_business = row.get(business_index).cloned().unwrap_or_default();

            let uid = uid_map.get(&original_user).map_err(|e| {
                format!("{} (row {} of '{}')", e, index, infile)
            })?;
            let bid = bid_map.get(&original_business).map_err(|e| {
                format!("{} (row {} of '{}')", e, index, infile)
            })?;

            row[user_index] = uid.to_string();
            row[business_index] = bid.to_string();
            remapped.push(row);
        }
    }

    CsvBuilder::from_raw_data(headers, remapped)
        .rename_columns(vec![("user_id", "uid"), ("business_id", "bid")])
        .save_as(outfile)?;

    Ok(())
}
