// vigia-core/src/application/seed.rs
//
// Ingestion pipeline: one CSV source -> transform -> 100-record idempotent
// batches -> storage port. Sources run strictly sequentially; a single
// writer, append/skip-only, so no locking is needed.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::domain::transform::transform_row;
use crate::error::VigiaError;
use crate::infrastructure::config::{FailurePolicy, SeedConfig};
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::source;
use crate::ports::store::CaseStore;

/// Batch size of the bulk inserts.
pub const BATCH_SIZE: usize = 100;

// Remote CSV URLs from OpenDataSUS S3, ascending by year.
pub const REMOTE_CSV_URLS: [(u16, &str); 6] = [
    (
        2019,
        "https://s3.sa-east-1.amazonaws.com/ckan.saude.gov.br/SRAG/2019/INFLUD19-26-06-2025.csv",
    ),
    (
        2020,
        "https://s3.sa-east-1.amazonaws.com/ckan.saude.gov.br/SRAG/2020/INFLUD20-26-06-2025.csv",
    ),
    (
        2021,
        "https://s3.sa-east-1.amazonaws.com/ckan.saude.gov.br/SRAG/2021/INFLUD21-26-06-2025.csv",
    ),
    (
        2022,
        "https://s3.sa-east-1.amazonaws.com/ckan.saude.gov.br/SRAG/2022/INFLUD22-26-06-2025.csv",
    ),
    (
        2023,
        "https://s3.sa-east-1.amazonaws.com/ckan.saude.gov.br/SRAG/2023/INFLUD23-26-06-2025.csv",
    ),
    (
        2024,
        "https://s3.sa-east-1.amazonaws.com/ckan.saude.gov.br/SRAG/2024/INFLUD24-26-06-2025.csv",
    ),
];

/// Accounting for one processed source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceOutcome {
    /// Rows the CSV reader produced.
    pub parsed: u64,
    /// Rows silently dropped by the transformer (missing id/date/state).
    pub rejected: u64,
    /// Records actually inserted (duplicates skipped by the store count as 0).
    pub inserted: u64,
}

/// Accounting for a whole seed run, persisted as JSON by the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedReport {
    pub success: bool,
    pub sources_processed: usize,
    pub records_parsed: u64,
    pub records_rejected: u64,
    pub records_inserted: u64,
    pub errors: Vec<String>,
}

impl SeedReport {
    fn absorb(&mut self, outcome: SourceOutcome) {
        self.sources_processed += 1;
        self.records_parsed += outcome.parsed;
        self.records_rejected += outcome.rejected;
        self.records_inserted += outcome.inserted;
    }
}

/// Ingest one local CSV extract.
#[instrument(skip(store))]
pub async fn seed_from_csv(
    store: &dyn CaseStore,
    path: &Path,
) -> Result<SourceOutcome, VigiaError> {
    info!(path = %path.display(), "Starting to import data");

    let rows = source::read_rows(path)?;
    let outcome = transform_and_insert(store, &rows, 1).await?;

    info!(
        inserted = outcome.inserted,
        rejected = outcome.rejected,
        "Successfully imported records from {}",
        path.display()
    );
    Ok(outcome)
}

/// Ingest one remote yearly extract.
#[instrument(skip(store))]
pub async fn seed_from_url(
    store: &dyn CaseStore,
    url: &str,
    year: u16,
) -> Result<SourceOutcome, VigiaError> {
    info!(year, url, "Starting to download and import data");

    let rows = source::download_rows(url).await?;
    // Les extraits annuels sont volumineux : progression tous les 1000
    let outcome = transform_and_insert(store, &rows, 10).await?;

    info!(
        year,
        inserted = outcome.inserted,
        rejected = outcome.rejected,
        "Successfully imported records for year {year}"
    );
    Ok(outcome)
}

/// Transform raw rows, then push valid records in fixed-size batches.
///
/// Progress is logged every `log_every_batches` batches and after the last
/// one. The next batch's insert is not issued before the previous one
/// completed, which is the pipeline's natural backpressure point.
async fn transform_and_insert(
    store: &dyn CaseStore,
    rows: &[crate::domain::case::RawCaseRow],
    log_every_batches: usize,
) -> Result<SourceOutcome, VigiaError> {
    let records: Vec<_> = rows.iter().filter_map(transform_row).collect();
    let parsed = rows.len() as u64;
    let rejected = parsed - records.len() as u64;

    info!(
        parsed,
        valid = records.len(),
        "Parsed records, inserting into database..."
    );

    let mut inserted = 0u64;
    let mut processed = 0usize;
    for (batch_index, batch) in records.chunks(BATCH_SIZE).enumerate() {
        inserted += store.insert_batch(batch).await?;
        processed += batch.len();

        let is_last = processed == records.len();
        if is_last || (batch_index + 1) % log_every_batches == 0 {
            info!("Inserted {processed}/{} records", records.len());
        }
    }

    Ok(SourceOutcome {
        parsed,
        rejected,
        inserted,
    })
}

/// Orchestrate a full multi-source run (remote yearly extracts or a local
/// directory of partial files, per config), honouring the failure policy.
pub async fn seed_all(
    store: &dyn CaseStore,
    config: &SeedConfig,
) -> Result<SeedReport, VigiaError> {
    let policy = config.default_policy();
    let mut report = SeedReport {
        success: true,
        ..SeedReport::default()
    };

    if config.use_full_data {
        info!("Starting to seed database from REMOTE full dataset...");
        let years: Vec<u16> = REMOTE_CSV_URLS.iter().map(|(year, _)| *year).collect();
        info!("Found {} years to process: {:?}", years.len(), years);

        for (year, url) in REMOTE_CSV_URLS {
            match seed_from_url(store, url, year).await {
                Ok(outcome) => {
                    report.absorb(outcome);
                    info!(
                        "Progress: {} total records imported so far",
                        report.records_inserted
                    );
                }
                Err(e) => {
                    error!(year, "Failed to import year: {e}");
                    report.success = false;
                    report.errors.push(format!("year {year}: {e}"));
                    if policy == FailurePolicy::Abort {
                        return Err(e);
                    }
                }
            }
        }
    } else {
        info!("Starting to seed database from LOCAL partial dataset...");
        let data_dir = Path::new(&config.data_dir);
        if !data_dir.is_dir() {
            error!("Data directory not found: {}", data_dir.display());
            return Err(VigiaError::Infrastructure(
                InfrastructureError::DataDirNotFound(data_dir.display().to_string()),
            ));
        }

        let files = list_csv_files(data_dir);
        if files.is_empty() {
            warn!("No CSV files found in {}", data_dir.display());
            return Ok(report);
        }
        info!("Found {} CSV files to process", files.len());

        for file in files {
            match seed_from_csv(store, &file).await {
                Ok(outcome) => report.absorb(outcome),
                Err(e) => {
                    error!(file = %file.display(), "Error processing file: {e}");
                    report.success = false;
                    report.errors.push(format!("{}: {e}", file.display()));
                    if policy == FailurePolicy::Abort {
                        return Err(e);
                    }
                }
            }
        }
    }

    info!(
        "Seeding completed! Total records imported: {}",
        report.records_inserted
    );
    Ok(report)
}

/// All `.csv` files directly under the data directory, sorted by filename so
/// multi-file runs process in a stable order.
fn list_csv_files(data_dir: &Path) -> Vec<std::path::PathBuf> {
    let mut files: Vec<_> = walkdir::WalkDir::new(data_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| {
            entry.path().is_file()
                && entry.path().extension().and_then(|s| s.to_str()) == Some("csv")
        })
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}
