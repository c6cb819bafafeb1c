// rating_baselines.rs
use clap::Parser;
use revprep::csv_utils::CsvBuilder;
use revprep::rating_utils::{
    load_business_stars, load_queries, load_user_means, load_validation, mean,
    per_user_predictions, rmse, rmse_constant, write_submission,
};
use std::error::Error;
use std::path::{Path, PathBuf};

/// Reports RMSE baselines for the ratings-prediction task and emits a
/// submission for the held-out query set using each user's historical
/// average.
#[derive(Parser, Debug)]
#[command(about = "RMSE baselines and per-user-mean submission")]
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

    let validation_file = file(dir, "validate_queries.csv");
    let validation = load_validation(&validation_file)?;
    let truth: Vec<f64> = validation.iter().map(|row| row.stars).collect();

    // RMSE against each constant star rating.
    let mut constant_table = CsvBuilder::new();
    constant_table.set_header(vec!["star", "rmse"]);
    for star in 1..=5 {
        let star_value = star.to_string();
        let rmse_value = rmse_constant(&truth, star as f64).to_string();
        constant_table.add_row(vec![star_value.as_str(), rmse_value.as_str()]);
    }
    println!("RMSE if you had just guessed the same star rating for everything:");
    constant_table.print_table();

    // Average given by all users and received by all businesses.
    let (user_means, all_user_means) = load_user_means(&file(dir, "users.csv"))?;
    let business_stars = load_business_stars(&file(dir, "business.csv"))?;
    let mean_user_rating = mean(&all_user_means);
    let mean_business_rating = mean(&business_stars);
    println!("\nMean user rating: {}", mean_user_rating);
    println!("Mean business rating: {}\n", mean_business_rating);

    println!("RMSE by guessing the mean:");
    println!("User mean: {}", rmse_constant(&truth, mean_user_rating));
    println!("Business mean: {}\n", rmse_constant(&truth, mean_business_rating));

    // Assign ratings based on the average stars of each user.
    let validation_users: Vec<String> =
        validation.into_iter().map(|row| row.user_id).collect();
    let predictions = per_user_predictions(&validation_users, &user_means, &validation_file)?;
    println!(
        "RMSE if we use the average_stars of the user in each prediction:\n  {}",
        rmse(&truth, &predictions)
    );

    // Create the submission for the held-out queries.
    let test_file = file(dir, "test_queries.csv");
    let queries = load_queries(&test_file)?;
    let query_users: Vec<String> = queries.into_iter().map(|row| row.user_id).collect();
    let submission = per_user_predictions(&query_users, &user_means, &test_file)?;

    let submission_file = file(dir, "submission.csv");
    write_submission(&submission_file, &submission)?;
    println!(
        "\nWrote {} predictions to '{}'.",
        submission.len(),
        submission_file
    );

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("rating_baselines failed: {}", e);
        std::process::exit(1);
    }
}
