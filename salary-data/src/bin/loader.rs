use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use salary_data::ComponentLoader;
use salary_db_sqlite::SqliteRepository;

/// Load default salary component data from a CSV file into the database.
///
/// The CSV file should have the following columns:
/// - name: The component name (e.g., "Provident Fund")
/// - calculation_type: FIXED, PERCENTAGE, or BASICPERCENTAGE
/// - value: The amount (FIXED) or percentage figure
/// - earning: true for earnings, false for deductions
#[derive(Parser, Debug)]
#[command(name = "salary-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing default component data
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database URL (e.g., sqlite:payroll.db?mode=rwc to create if missing)
    #[arg(short, long, default_value = "sqlite:payroll.db?mode=rwc")]
    database: String,

    /// Run database migrations before loading data
    #[arg(short, long, default_value_t = false)]
    migrate: bool,

    /// Run seed files from the specified directory after migrations
    #[arg(short, long)]
    seeds: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let repo = SqliteRepository::new(&args.database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;

    if args.migrate {
        println!("Running migrations...");
        repo.run_migrations()
            .await
            .context("Failed to run migrations")?;
        println!("Migrations complete.");
    }

    if let Some(seeds_dir) = &args.seeds {
        println!("Running seeds from: {}", seeds_dir.display());
        repo.run_seeds(seeds_dir)
            .await
            .with_context(|| format!("Failed to run seeds from: {}", seeds_dir.display()))?;
        println!("Seeds complete.");
    }

    println!("Loading default components from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = ComponentLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let inserted = ComponentLoader::load(&repo, &records)
        .await
        .context("Failed to load default components into database")?;

    println!(
        "Successfully loaded {} default components into the database.",
        inserted
    );

    Ok(())
}
