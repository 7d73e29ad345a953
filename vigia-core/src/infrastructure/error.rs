// vigia-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(vigia::infra::database::duckdb),
        help("An error occurred inside the SQL engine.")
    )]
    DuckDB(#[from] duckdb::Error),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(vigia::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CSV SOURCES ---
    #[error("CSV Reading Error: {0}")]
    #[diagnostic(
        code(vigia::infra::csv),
        help("The extract must be ';'-delimited with the official SRAG headers.")
    )]
    Csv(#[from] csv::Error),

    // --- REMOTE DOWNLOAD ---
    #[error("HTTP Transport Error: {0}")]
    #[diagnostic(code(vigia::infra::http))]
    Http(#[from] reqwest::Error),

    #[error("Failed to download '{url}': HTTP {status}")]
    #[diagnostic(
        code(vigia::infra::download),
        help("The OpenDataSUS bucket may have rotated the extract name.")
    )]
    DownloadFailed { url: String, status: u16 },

    // --- REPORT SERIALIZATION ---
    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(vigia::infra::json))]
    Json(#[from] serde_json::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(vigia::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Data directory not found at '{0}'")]
    #[diagnostic(code(vigia::infra::data_dir_missing))]
    DataDirNotFound(String),
}

// Manual implementation for shortcuts (e.g. `?` operator on duckdb calls)
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}
