// csv_utils.rs
use std::collections::HashMap;
use std::error::Error;
use std::fs::File;

/// Represents a CsvBuilder object. This struct holds a CSV table as headers
/// plus string-valued rows, with an internal error handler, and is the I/O
/// seam every pipeline job loads from and saves through.
#[derive(Debug)]
pub struct CsvBuilder {
    headers: Vec<String>,
    data: Vec<Vec<String>>,
    error: Option<Box<dyn Error>>,
}

impl Default for CsvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvBuilder {
    /// Creates a new, empty `CsvBuilder`.
    pub fn new() -> Self {
        CsvBuilder {
            headers: Vec::new(),
            data: Vec::new(),
            error: None,
        }
    }

    /// Reads data from a CSV file at the specified `file_path` and returns a
    /// `CsvBuilder`.
    ///
    /// A file that cannot be opened or parsed does not panic; the failure is
    /// stashed in the builder's error slot, to be surfaced by the caller via
    /// `take_error`.
    ///
    /// ```
    /// use revprep::csv_utils::CsvBuilder;
    /// use csv::Writer;
    ///
    /// let tmp_file = tempfile::Builder::new()
    ///     .prefix("csv_test")
    ///     .suffix(".csv")
    ///     .tempfile()
    ///     .expect("failed to create temporary file");
    ///
    /// let mut writer = Writer::from_path(tmp_file.path()).expect("failed to create CSV writer");
    /// writer.write_record(&["uid", "friends"]).expect("failed to write header");
    /// writer.write_record(&["1", "2, 3"]).expect("write record");
    /// writer.flush().expect("flush writer");
    ///
    /// let mut csv_builder = CsvBuilder::from_csv(tmp_file.path().to_str().unwrap());
    ///
    /// assert!(csv_builder.take_error().is_none());
    /// assert_eq!(csv_builder.get_headers().unwrap(), &["uid".to_string(), "friends".to_string()]);
    /// assert_eq!(
    ///     csv_builder.get_data().unwrap(),
    ///     &vec![vec!["1".to_string(), "2, 3".to_string()]]
    /// );
    /// ```
    pub fn from_csv(file_path: &str) -> Self {
        let mut builder = CsvBuilder::new();

        match File::open(file_path) {
            Ok(file) => {
                let mut rdr = csv::Reader::from_reader(file);

                if let Ok(hdrs) = rdr.headers() {
                    builder.headers = hdrs.iter().map(String::from).collect();
                }

                for result in rdr.records() {
                    match result {
                        Ok(record) => builder.data.push(record.iter().map(String::from).collect()),
                        Err(e) => {
                            builder.error = Some(Box::new(e));
                            break;
                        }
                    }
                }
            }
            Err(e) => builder.error = Some(Box::new(e)),
        }

        builder
    }

    /// Creates a `CsvBuilder` directly from headers and rows already in
    /// memory. This is the constructor the jobs use for freshly computed
    /// output tables.
    ///
    /// ```
    /// use revprep::csv_utils::CsvBuilder;
    ///
    /// let builder = CsvBuilder::from_raw_data(
    ///     vec!["uid".to_string(), "bid".to_string()],
    ///     vec![vec!["7".to_string(), "42".to_string()]],
    /// );
    ///
    /// assert_eq!(builder.get_headers().unwrap(), &["uid".to_string(), "bid".to_string()]);
    /// ```
    pub fn from_raw_data(headers: Vec<String>, data: Vec<Vec<String>>) -> Self {
        CsvBuilder {
            headers,
            data,
            error: None,
        }
    }

    /// Removes and returns the stashed error, if any. Jobs call this right
    /// after `from_csv` so an unreadable input aborts before any
    /// transformation runs.
    pub fn take_error(&mut self) -> Option<Box<dyn Error>> {
        self.error.take()
    }

    fn has_headers(&self) -> bool {
        !self.headers.is_empty()
    }

    /// Retrieves the headers, if any are set.
    pub fn get_headers(&self) -> Option<&[String]> {
        if self.has_headers() {
            Some(&self.headers)
        } else {
            None
        }
    }

    /// Retrieves a reference to the data rows if any exist.
    pub fn get_data(&self) -> Option<&Vec<Vec<String>>> {
        if self.data.is_empty() {
            None
        } else {
            Some(&self.data)
        }
    }

    /// Returns the 0-based position of the named column.
    pub fn column_index(&self, column_name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column_name)
    }

    /// Pulls a whole column out as an owned vector, in row order.
    ///
    /// Rows shorter than the header row contribute an empty string, the same
    /// value `save_as` would pad them with.
    pub fn get_column(&self, column_name: &str) -> Option<Vec<String>> {
        let index = self.column_index(column_name)?;
        Some(
            self.data
                .iter()
                .map(|row| row.get(index).cloned().unwrap_or_default())
                .collect(),
        )
    }

    /// Sets the CSV header using an array of strings.
    pub fn set_header(&mut self, header: Vec<&str>) -> &mut Self {
        // If there's an existing error, don't modify the builder
        if self.error.is_some() {
            return self;
        }

        self.headers = header
            .into_iter()
            .map(|s| s.to_string())
            .collect::<Vec<String>>();

        self
    }

    /// Adds a data row to the CSV.
    pub fn add_row(&mut self, row: Vec<&str>) -> &mut Self {
        if self.error.is_none() {
            let row_vec = row.into_iter().map(|s| s.to_string()).collect();
            self.data.push(row_vec);
        }
        self
    }

    /// Renames columns per the given (old, new) pairs; columns not mentioned
    /// keep their names.
    ///
    /// ```
    /// use revprep::csv_utils::CsvBuilder;
    ///
    /// let mut builder = CsvBuilder::from_raw_data(
    ///     vec!["user_id".to_string(), "business_id".to_string(), "stars".to_string()],
    ///     vec![],
    /// );
    ///
    /// builder.rename_columns(vec![("user_id", "uid"), ("business_id", "bid")]);
    ///
    /// assert_eq!(
    ///     builder.get_headers().unwrap(),
    ///     &["uid".to_string(), "bid".to_string(), "stars".to_string()]
    /// );
    /// ```
    pub fn rename_columns(&mut self, renames: Vec<(&str, &str)>) -> &mut Self {
        let rename_map: HashMap<&str, &str> = renames.into_iter().collect();

        self.headers = self
            .headers
            .iter()
            .map(|h| {
                let h_str = h.as_str();
                rename_map.get(h_str).unwrap_or(&h_str).to_string()
            })
            .collect();

        self
    }

    /// Saves the table to `new_file_path`, padding short rows with empty
    /// strings so every record matches the header width.
    pub fn save_as(&mut self, new_file_path: &str) -> Result<&mut Self, Box<dyn Error>> {
        let file = File::create(new_file_path)?;
        let mut wtr = csv::Writer::from_writer(file);

        if !self.headers.is_empty() {
            wtr.write_record(&self.headers)?;
        }

        let headers_len = self.headers.len();
        for record in &mut self.data {
            while record.len() < headers_len {
                record.push("".to_string());
            }
            wtr.write_record(&*record)?;
        }

        wtr.flush()?;

        Ok(self)
    }

    /// Prints the row count.
    pub fn print_row_count(&mut self) -> &mut Self {
        // The number of rows is the length of the data vector, excluding the
        // header row.
        let row_count = self.data.len();
        println!();
        println!("Row count: {}", row_count);

        self
    }

    /// Prints the table with every column, capping cell width. Small report
    /// tables only; wide frames such as the one-hot category table are not
    /// meant to go through this.
    pub fn print_table(&mut self) -> &mut Self {
        let max_cell_width: usize = 45;

        // Column widths from headers and all rows, capped
        let mut max_lengths = self
            .headers
            .iter()
            .map(|h| h.len() + 1)
            .collect::<Vec<usize>>();
        for row in &self.data {
            for (i, cell) in row.iter().enumerate() {
                if i < max_lengths.len() {
                    let current_max = std::cmp::max(max_lengths[i], cell.len());
                    max_lengths[i] = std::cmp::min(current_max, max_cell_width);
                }
            }
        }

        let format_cell = |s: &String, max_length: usize| -> String {
            format!("{:width$.width$}", s, width = max_length)
        };

        let table_width = max_lengths.iter().map(|&len| len + 1).sum::<usize>() + 1;

        println!(
            "\n|{}|",
            self.headers
                .iter()
                .zip(max_lengths.iter())
                .map(|(header, &max_length)| format_cell(header, max_length))
                .collect::<Vec<String>>()
                .join("|")
        );
        println!("{}", "-".repeat(table_width));

        for row in &self.data {
            println!(
                "|{}|",
                row.iter()
                    .zip(max_lengths.iter())
                    .map(|(cell, &max_length)| format_cell(cell, max_length))
                    .collect::<Vec<String>>()
                    .join("|")
            );
        }

        self
    }
}
