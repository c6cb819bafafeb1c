// ratings_count.rs
use clap::Parser;
use revprep::csv_utils::CsvBuilder;
use revprep::friend_utils::{count_report_line, load_freqs, ratings_count};
use std::error::Error;
use std::path::{Path, PathBuf};

/// Sums the interaction counts contributed by each user's friends, at a few
/// per-user friend limits, to gauge how much signal the friend graph carries.
#[derive(Parser, Debug)]
#[command(about = "Count ratings reachable through friend lists")]
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

    let friends_file = file(dir, "friends.csv");
    let mut table = CsvBuilder::from_csv(&friends_file);
    if let Some(e) = table.take_error() {
        return Err(format!("failed to read '{}': {}", friends_file, e).into());
    }
    table.print_row_count();
    let friends = table
        .get_column("friends")
        .ok_or(format!("column 'friends' not found in '{}'", friends_file))?;

    let train_freqs = load_freqs(&file(dir, "train_freq.csv"))?;
    let val_freqs = load_freqs(&file(dir, "val_freq.csv"))?;

    for limit in [None, Some(3), Some(5), Some(10)] {
        let train_count = ratings_count(&friends, &train_freqs, limit);
        let val_count = ratings_count(&friends, &val_freqs, limit);
        println!("{}", count_report_line(limit, train_count, val_count));
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("ratings_count failed: {}", e);
        std::process::exit(1);
    }
}
