// vigia/src/main.rs

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug vigia seed ... pour voir les détails
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        // --- USE CASE: SEED THE DATABASE ---
        Commands::Seed {
            project_dir,
            data_dir,
            db_path,
            full,
            keep_going,
            fail_fast,
            report,
        } => {
            commands::seed::execute(
                project_dir,
                data_dir,
                db_path,
                full,
                keep_going,
                fail_fast,
                report,
            )
            .await
        }

        // --- USE CASE: DASHBOARD KPIS ---
        Commands::Metrics { db_path } => commands::metrics::execute(db_path).await,

        // --- USE CASE: CHART SERIES ---
        Commands::Chart {
            db_path,
            period,
            group_by,
            state,
            municipality,
        } => commands::chart::execute(db_path, period, group_by, state, municipality).await,

        // --- USE CASE: FILTER DROPDOWNS ---
        Commands::States { db_path } => commands::regions::execute_states(db_path).await,
        Commands::Municipalities { db_path } => {
            commands::regions::execute_municipalities(db_path).await
        }
    }
}
