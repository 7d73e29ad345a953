// vigia/src/commands/seed.rs
//
// USE CASE: Seed the database from CSV extracts.

use std::path::PathBuf;

use anyhow::Context;
use vigia_core::application::seed_all;
use vigia_core::infrastructure::adapters::duckdb::DuckDbStore;
use vigia_core::infrastructure::config::{FailurePolicy, load_seed_config};
use vigia_core::infrastructure::report::write_seed_report;

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    project_dir: PathBuf,
    data_dir: Option<String>,
    db_path: Option<String>,
    full: bool,
    keep_going: bool,
    fail_fast: bool,
    report_path: PathBuf,
) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the Config (Infra) + CLI overrides
    println!("⚙️  Loading configuration...");
    let mut config = load_seed_config(&project_dir)
        .with_context(|| format!("Failed to load seed configuration from {:?}", project_dir))?;

    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    if let Some(path) = db_path {
        config.db_path = path;
    }
    if full {
        config.use_full_data = true;
    }
    if keep_going {
        config.on_error = Some(FailurePolicy::Continue);
    }
    if fail_fast {
        config.on_error = Some(FailurePolicy::Abort);
    }

    let mode = if config.use_full_data {
        "REMOTE full"
    } else {
        "LOCAL partial"
    };
    println!("   Dataset: {mode} | DB: {}", config.db_path);

    // B. Instantiate the DB Adapter (DuckDB)
    let store = DuckDbStore::open(&config.db_path)
        .with_context(|| format!("Failed to initialize DuckDB at {}", config.db_path))?;

    // C. Run the Pipeline (Application Layer)
    match seed_all(&store, &config).await {
        Ok(report) => {
            write_seed_report(&report_path, &report)
                .with_context(|| format!("Failed to write seed report at {:?}", report_path))?;
            tracing::info!(path = ?report_path, "Seed report written");

            println!(
                "   Parsed: {} | Rejected: {} | Inserted: {}",
                report.records_parsed, report.records_rejected, report.records_inserted
            );
            if report.success {
                println!("\n✨ SUCCESS! Seed finished in {:.2?}", start.elapsed());
            } else {
                eprintln!("\n❌ PARTIAL FAILURE. {} sources failed.", report.errors.len());
                // Exit with error code for CI/CD
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("\n💥 CRITICAL SEED ERROR: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
