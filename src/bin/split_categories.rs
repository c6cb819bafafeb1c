// split_categories.rs
use clap::Parser;
use revprep::cat_utils::{expand, load_vocabulary};
use std::error::Error;
use std::path::{Path, PathBuf};

/// Expands each business's delimited category string into one count column
/// per entry of the category vocabulary.
#[derive(Parser, Debug)]
#[command(about = "One-hot expand business categories over the vocabulary")]
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

    let vocabulary = load_vocabulary(&file(dir, "cat_freq.csv"))?;
    expand(
        &file(dir, "business_preclean1.csv"),
        &vocabulary,
        &file(dir, "catframe.csv"),
    )?;

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("split_categories failed: {}", e);
        std::process::exit(1);
    }
}
