// vigia-core/src/infrastructure/source.rs
//
// Raw row acquisition: local ';'-delimited extracts and the remote
// OpenDataSUS yearly files. Row-shape problems are skipped with a warning;
// reader/transport problems abort the source.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::domain::case::RawCaseRow;
use crate::error::VigiaError;
use crate::infrastructure::error::InfrastructureError;

/// Read all raw rows from a local CSV extract.
pub fn read_rows(path: &Path) -> Result<Vec<RawCaseRow>, VigiaError> {
    let file = std::fs::File::open(path)
        .map_err(|e| VigiaError::Infrastructure(InfrastructureError::Io(e)))?;
    debug!(path = %path.display(), "Reading local extract");
    collect_rows(file)
}

/// Download and parse one remote yearly extract.
///
/// Known gap: no timeout and no retry on the download; a stalled transfer
/// stalls the run.
pub async fn download_rows(url: &str) -> Result<Vec<RawCaseRow>, VigiaError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| VigiaError::Infrastructure(InfrastructureError::Http(e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(VigiaError::Infrastructure(
            InfrastructureError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            },
        ));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| VigiaError::Infrastructure(InfrastructureError::Http(e)))?;

    collect_rows(body.as_ref())
}

/// Drive the csv reader over any byte source and deserialize by header name.
///
/// flexible(true): the official extracts are inconsistently quoted and
/// occasionally short a few trailing columns; serde defaults absorb that.
fn collect_rows<R: Read>(reader: R) -> Result<Vec<RawCaseRow>, VigiaError> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, result) in csv_reader.deserialize::<RawCaseRow>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            // Un flux qui casse en cours de lecture invalide toute la source
            Err(error) if error.is_io_error() => {
                return Err(VigiaError::Infrastructure(InfrastructureError::Csv(error)));
            }
            Err(error) => {
                // Une ligne difforme ne doit jamais interrompre le lot
                warn!(row = index + 1, %error, "Skipping unreadable row");
            }
        }
    }

    Ok(rows)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "NU_NOTIFIC;DT_NOTIFIC;SEM_NOT;ID_MUNICIP;SG_UF_NOT;CO_MUN_NOT;SG_UF;CO_MUN_RES;CS_SEXO;NU_IDADE_N;TP_IDADE;HOSPITAL;DT_INTERNA;UTI;DT_ENTUTI;VACINA_COV;DOSE_1_COV;DOSE_2_COV;EVOLUCAO;DT_EVOLUCA";

    #[test]
    fn test_read_rows_local_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{HEADER}")?;
        writeln!(
            file,
            "100001;15/03/2024;11;SAO PAULO;SP;355030;SP;355030;F;45;3;1;16/03/2024;2;;1;10/01/2021;;1;"
        )?;
        writeln!(
            file,
            "100002;2024-03-16;11;CAMPINAS;SP;350950;SP;350950;M;30;3;2;;2;;9;;;2;20/03/2024"
        )?;

        let rows = read_rows(file.path())?;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].notification_id, "100001");
        assert_eq!(rows[0].state, "SP");
        assert_eq!(rows[1].notification_date, "2024-03-16");
        assert_eq!(rows[1].evolution, "2");
        Ok(())
    }

    #[test]
    fn test_extra_columns_are_ignored() -> Result<()> {
        let data = format!(
            "{HEADER};CS_RACA\n100003;01/01/2024;1;RIO DE JANEIRO;RJ;330455;RJ;330455;F;60;3;1;;1;02/01/2024;1;;;;;4\n"
        );

        let rows = collect_rows(data.as_bytes())?;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].state, "RJ");
        assert_eq!(rows[0].icu, "1");
        Ok(())
    }

    #[test]
    fn test_quoted_cells_are_unquoted_by_the_reader() -> Result<()> {
        let data = format!(
            "{HEADER}\n\"100004\";\"05/02/2024\";\"6\";\"SANTOS\";\"SP\";;;;;;;;;;;;;;;\n"
        );

        let rows = collect_rows(data.as_bytes())?;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].notification_id, "100004");
        assert_eq!(rows[0].municipality_name, "SANTOS");
        Ok(())
    }

    /// Reader that serves a valid header and one row, then breaks mid-stream.
    struct BrokenStream {
        data: Vec<u8>,
        pos: usize,
    }

    impl Read for BrokenStream {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos < self.data.len() {
                let n = buf.len().min(self.data.len() - self.pos);
                buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
                self.pos += n;
                Ok(n)
            } else {
                Err(std::io::Error::other("connection reset"))
            }
        }
    }

    #[test]
    fn test_mid_stream_io_failure_aborts_source() {
        let reader = BrokenStream {
            data: format!(
                "{HEADER}\n100001;15/03/2024;11;SAO PAULO;SP;355030;SP;355030;F;45;3;1;;2;;1;;;1;\n"
            )
            .into_bytes(),
            pos: 0,
        };

        let result = collect_rows(reader);

        // Pas de succès partiel : la source entière est invalidée
        assert!(matches!(
            result,
            Err(VigiaError::Infrastructure(InfrastructureError::Csv(_)))
        ));
    }

    #[test]
    fn test_missing_file_aborts_source() {
        let result = read_rows(Path::new("/nonexistent/INFLUD24.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_body_yields_no_rows() -> Result<()> {
        let rows = collect_rows(HEADER.as_bytes())?;
        assert!(rows.is_empty());
        Ok(())
    }
}
