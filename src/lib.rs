// lib.rs
//! # REVPREP
//!
//! A RUST-dominant Data Preparation & Analysis toolkit for social review
//! datasets (users, businesses, reviews, friend graphs), designed to minimize
//! developer cognitive load. 💪🚀
//!
//! Every job in this library is a single-purpose batch transform: read one or
//! more CSV files, perform a bounded in-memory transformation, and write a CSV
//! or print a report to the operator. There is no shared runtime and no job
//! calls another job — composition happens purely through the CSV files laid
//! out under a common data directory, and each job ships as its own binary
//! under `src/bin`.
//!
//! ## `csv_utils`
//!
//! - **Purpose**: A toolkit for CSV file management across all pipeline jobs.
//! - **Features**:
//!   - **CsvBuilder**: A builder for loading, reshaping, and saving CSV
//!     tables, facilitating:
//!   - **Easy Initialization**: Start with a new table, raw data, or load from
//!     an existing file.
//!   - **Custom Headers and Rows**: Set custom headers and add rows
//!     effortlessly.
//!   - **Column Manipulation**: Rename columns, locate them by name, and pull
//!     a column out as a vector.
//!   - **Chainable Methods**: Combine multiple operations in a fluent and
//!     readable manner.
//!   - **Data Analysis Aids**: Count rows and print compact tables for quick
//!     operator-facing reports.
//!
//! ## `id_utils`
//!
//! - **Purpose**: Substitute compact dense integer ids for the dataset's
//!   original opaque string identifiers.
//! - **Features**:
//!   - **IdMap**: An original→compact lookup built from a two-column map
//!     table, where an unmapped lookup is an error, never a silent default.
//!   - **simplify**: Rewrite the `user_id`/`business_id` foreign keys of an
//!     interaction table to `uid`/`bid`.
//!
//! ## `friend_utils`
//!
//! - **Purpose**: Per-user friend list handling.
//! - **Features**:
//!   - Compact each user's friend list through an `IdMap`, reducing empty
//!     results to the `None` sentinel.
//!   - Sum per-friend interaction counts against a frequency table, with an
//!     optional per-user friend limit.
//!
//! ## `cat_utils`
//!
//! - **Purpose**: One-hot expansion of delimited business category strings
//!   over a fixed external vocabulary.
//! - **Features**:
//!   - Vocabulary loading, label sanitization into valid `cat_*` column
//!     names, and per-business occurrence counting.
//!
//! ## `graph_utils`
//!
//! - **Purpose**: Connectivity analysis over the undirected friendship graph.
//! - **Features**:
//!   - **FriendGraph**: Symmetric edge construction from one-directional
//!     friend lists, seed-component extraction, component enumeration, and
//!     component-removal statistics.
//!
//! ## `rating_utils`
//!
//! - **Purpose**: Baseline accuracy reporting for the ratings-prediction
//!   task.
//! - **Features**:
//!   - RMSE against constant guesses, global means, and per-user means, plus
//!     submission-file generation for a held-out query set.
//!
//! ## License
//!
//! This project is licensed under the MIT License.

pub mod cat_utils;
pub mod csv_utils;
pub mod friend_utils;
pub mod graph_utils;
pub mod id_utils;
pub mod rating_utils;
