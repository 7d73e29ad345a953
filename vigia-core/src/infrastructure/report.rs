// vigia-core/src/infrastructure/report.rs
//
// Seed report persistence. The report is the machine-readable trace of a
// seed run (CI reads it to decide pass/fail), so a half-written file is
// worse than no file: serialize fully, then swap into place.

use std::io::Write;
use std::path::Path;

use crate::application::seed::SeedReport;
use crate::infrastructure::error::InfrastructureError;

/// Serialize the seed report to pretty JSON and write it atomically.
///
/// The temporary file is created in the target's own directory so the final
/// rename never crosses a filesystem boundary.
pub fn write_seed_report(path: &Path, report: &SeedReport) -> Result<(), InfrastructureError> {
    let json = serde_json::to_string_pretty(report)?;
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(json.as_bytes())?;
    temp_file.persist(path).map_err(|e| e.error)?;

    Ok(())
}
