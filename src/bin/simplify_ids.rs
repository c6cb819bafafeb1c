// simplify_ids.rs
use clap::Parser;
use revprep::id_utils::{simplify, IdMap};
use std::error::Error;
use std::path::{Path, PathBuf};

/// Rewrites the user/business foreign keys of the review and query tables to
/// compact integer ids, renaming the columns to uid/bid.
#[derive(Parser, Debug)]
#[command(about = "Rewrite review/query foreign keys to compact ids")]
struct Args {
    /// Directory holding the conventional CSV files
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
}

fn file(dir: &Path, name: &str) -> String {
    dir.join(name).to_string_lossy().into_owned()
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let dir = args.data_dir.as_path();

    let uid_map = IdMap::from_csv(
        &file(dir, "user_id_map.csv"),
        "user_id",
        "uid",
        "user id map",
    )?;
    let bid_map = IdMap::from_csv(
        &file(dir, "business_id_map.csv"),
        "business_id",
        "bid",
        "business id map",
    )?;

    simplify(
        &file(dir, "train_reviews.csv"),
        &file(dir, "reviews_simplified.csv"),
        &uid_map,
        &bid_map,
    )?;
    simplify(
        &file(dir, "validate_queries.csv"),
        &file(dir, "validate_simplified.csv"),
        &uid_map,
        &bid_map,
    )?;
    simplify(
        &file(dir, "test_queries.csv"),
        &file(dir, "test_simplified.csv"),
        &uid_map,
        &bid_map,
    )?;

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("simplify_ids failed: {}", e);
        std::process::exit(1);
    }
}
