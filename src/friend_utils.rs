// friend_utils.rs
use crate::csv_utils::CsvBuilder;
use crate::id_utils::IdMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use std::fs::File;

/// The value a friend list holds when a user has no (surviving) friends.
/// The dataset uses the literal string rather than an empty cell.
pub const EMPTY_FRIENDS: &str = "None";

/// The friend lists are delimited with a comma plus a space throughout the
/// user tables.
pub const FRIEND_DELIMITER: &str = ", ";

/// Compacts a single friend list through the user id map, dropping ids the
/// map cannot represent and preserving the relative order of survivors.
/// Returns the `None` sentinel when nothing survives.
pub fn compact_friend_list(friends: &str, uid_map: &IdMap) -> String {
    if friends == EMPTY_FRIENDS || friends.is_empty() {
        return EMPTY_FRIENDS.to_string();
    }

    let survivors: Vec<&str> = friends
        .split(FRIEND_DELIMITER)
        .filter_map(|friend| uid_map.try_get(friend))
        .collect();

    if survivors.is_empty() {
        EMPTY_FRIENDS.to_string()
    } else {
        survivors.join(FRIEND_DELIMITER)
    }
}

/// Rewrites the `friends` column of the user table at `infile` from original
/// ids to compact ids, saving the result as `outfile`. Prints a progress line
/// every 1000 rows.
///
/// A row too short to carry a `friends` cell is fatal, with the row context
/// printed before the job dies; nothing is written in that case.
pub fn shorten(infile: &str, outfile: &str, uid_map: &IdMap) -> Result<(), Box<dyn Error>> {
    let mut table = CsvBuilder::from_csv(infile);
    if let Some(e) = table.take_error() {
        return Err(format!("failed to read '{}': {}", infile, e).into());
    }

    let friends_index = table
        .column_index("friends")
        .ok_or(format!("column 'friends' not found in '{}'", infile))?;

    let headers = table
        .get_headers()
        .ok_or(format!("'{}' has no header row", infile))?
        .to_vec();

    let mut rewritten = Vec::new();
    if let Some(rows) = table.get_data() {
        for (index, row) in rows.iter().enumerate() {
            let mut row = row.clone();
            let compacted = match row.get(friends_index) {
                Some(friends) => compact_friend_list(friends, uid_map),
                None => {
                    return Err(format!(
                        "row {} of '{}' has no 'friends' cell: {:?}",
                        index, infile, row
                    )
                    .into());
                }
            };
            row[friends_index] = compacted;
            rewritten.push(row);

            if index % 1000 == 0 {
                println!("On row {}...", index);
            }
        }
    }

    CsvBuilder::from_raw_data(headers, rewritten).save_as(outfile)?;

    Ok(())
}

/// A per-user interaction count, as stored in `train_freq.csv` and
/// `val_freq.csv`.
#[derive(Debug, Deserialize)]
pub struct FreqRow {
    pub uid: String,
    pub n: i64,
}

/// Loads a frequency table into an O(1) uid→count lookup.
pub fn load_freqs(file_path: &str) -> Result<HashMap<String, i64>, Box<dyn Error>> {
    let file = File::open(file_path)
        .map_err(|e| format!("failed to read '{}': {}", file_path, e))?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut freqs = HashMap::new();
    for result in rdr.deserialize() {
        let row: FreqRow = result.map_err(|e| format!("bad row in '{}': {}", file_path, e))?;
        freqs.insert(row.uid, row.n);
    }

    Ok(freqs)
}

/// Sums the interaction counts of every friend listed across `friends`
/// cells, optionally truncating each user's list to its first `limit`
/// entries. Friends absent from the frequency table contribute zero; the
/// frequency table only covers users who actually rated.
pub fn ratings_count(
    friends: &[String],
    freqs: &HashMap<String, i64>,
    limit: Option<usize>,
) -> i64 {
    let mut count = 0;
    for friend_list in friends {
        if friend_list == EMPTY_FRIENDS || friend_list.is_empty() {
            continue;
        }

        let mut f_list: Vec<&str> = friend_list.split(FRIEND_DELIMITER).collect();

        // Limit friends per user
        if let Some(limit) = limit {
            f_list.truncate(limit);
        }

        for uid in f_list {
            if let Some(n) = freqs.get(uid) {
                count += n;
            }
        }
    }

    count
}

/// Formats the one-line report for a given limit, e.g. "If we limit each
/// user to 3 friends, there will be 120 and 45 from training and validation,
/// respectively."
pub fn count_report_line(limit: Option<usize>, train_count: i64, val_count: i64) -> String {
    let preface = match limit {
        None => "Considering all friends".to_string(),
        Some(limit) => format!("If we limit each user to {} friends", limit),
    };
    format!(
        "{}, there will be {} and {} from training and validation, respectively.",
        preface, train_count, val_count
    )
}
