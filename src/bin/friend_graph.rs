// friend_graph.rs
use clap::Parser;
use revprep::graph_utils::{analyze, write_cover};
use std::error::Error;
use std::path::{Path, PathBuf};

/// Builds the undirected friendship graph, extracts the component containing
/// the seed user, and reports what the graph looks like once that component
/// is removed.
#[derive(Parser, Debug)]
#[command(about = "Connectivity analysis over the friendship graph")]
struct Args {
    /// Directory holding the conventional CSV files
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// The user whose connected component anchors the analysis
    #[arg(long, default_value_t = 12990)]
    seed: u32,
}

fn file(dir: &Path, name: &str) -> String {
    dir.join(name).to_string_lossy().into_owned()
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let dir = args.data_dir.as_path();

    let report = analyze(&file(dir, "friends.csv"), args.seed)?;

    let cover_path = file(dir, "max_cover.csv");
    write_cover(&cover_path, &report.seed_component)?;

    println!("User rows: {}", report.user_rows);
    println!("Total nodes: {}", report.total_nodes);
    println!(
        "Component of user {}: {} nodes ({:.4} of the graph)",
        args.seed,
        report.seed_component.len(),
        report.seed_fraction()
    );
    println!(
        "Wrote {} node ids to '{}'.",
        report.seed_component.len(),
        cover_path
    );
    println!(
        "Next largest component after removal: {} nodes",
        report.next_largest.len()
    );
    println!("{:?}", report.next_largest);
    println!("Mean remaining component size: {}", report.mean_remaining);

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("friend_graph failed: {}", e);
        std::process::exit(1);
    }
}
