// shorten_friends.rs
use clap::Parser;
use revprep::friend_utils::shorten;
use revprep::id_utils::IdMap;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Rewrites each user's friend list from original ids to compact ids,
/// dropping ids the map cannot represent.
#[derive(Parser, Debug)]
#[command(about = "Compact the friend lists of the user table")]
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

    shorten(
        &file(dir, "users.csv"),
        &file(dir, "users_simplified.csv"),
        &uid_map,
    )?;

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("shorten_friends failed: {}", e);
        std::process::exit(1);
    }
}
