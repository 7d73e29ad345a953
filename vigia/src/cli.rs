// vigia/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vigia")]
#[command(about = "SRAG/SARI Surveillance Ingestion & Aggregation Engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🌱 Seeds the database from CSV extracts (local partial or remote full)
    Seed {
        /// Project directory (where vigia.yaml lives)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Override the directory scanned for local .csv extracts
        #[arg(long)]
        data_dir: Option<String>,

        /// Override the DuckDB database file
        #[arg(long)]
        db_path: Option<String>,

        /// Use the remote OpenDataSUS full dataset (same as USE_FULL_DATA=true)
        #[arg(long, default_value = "false")]
        full: bool,

        /// Keep processing remaining sources when one fails
        #[arg(long, conflicts_with = "fail_fast")]
        keep_going: bool,

        /// Abort the whole run on the first failing source
        #[arg(long)]
        fail_fast: bool,

        /// Where to write the JSON seed report
        #[arg(long, default_value = "seed_report.json")]
        report: PathBuf,
    },

    /// 📊 Computes the four dashboard KPIs
    Metrics {
        #[arg(long, default_value = "vigia_db.duckdb")]
        db_path: String,
    },

    /// 📈 Aggregates cases into chart series (date bucket x region)
    Chart {
        #[arg(long, default_value = "vigia_db.duckdb")]
        db_path: String,

        /// Bucket width: daily | monthly | yearly
        #[arg(long, default_value = "monthly")]
        period: String,

        /// Series dimension: state | municipality
        #[arg(long, default_value = "state")]
        group_by: String,

        /// Filter by notifying state (ex: SP, RJ)
        #[arg(long)]
        state: Option<String>,

        /// Filter by notifying municipality code
        #[arg(long)]
        municipality: Option<String>,
    },

    /// 🗺️ Lists the distinct notifying states
    States {
        #[arg(long, default_value = "vigia_db.duckdb")]
        db_path: String,
    },

    /// 🏙️ Lists the distinct notifying municipalities (code + name)
    Municipalities {
        #[arg(long, default_value = "vigia_db.duckdb")]
        db_path: String,
    },
}
