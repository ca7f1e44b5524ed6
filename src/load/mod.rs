// src/load/mod.rs
mod raw_table;

pub use raw_table::{RawRow, RawTable};

use crate::error::CensusError;
use csv::{ReaderBuilder, StringRecord};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};
use tracing::{debug, info, warn};

pub const TOPIC_COLUMN: &str = "Topic";
pub const CHARACTERISTIC_COLUMN: &str = "Characteristic";
pub const TOTAL_COLUMN: &str = "Total";

/// How the export is laid out on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Metadata lines preceding the header row.
    pub skip_rows: usize,
    /// Any label understood by `encoding_rs`, e.g. "latin1".
    pub encoding: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            skip_rows: 3,
            encoding: "latin1".to_string(),
        }
    }
}

/// Read the census export at `path`:
/// - decodes the whole file with `opts.encoding`
/// - drops the first `opts.skip_rows` lines of metadata
/// - takes the next line as the header row and locates `Topic`,
///   `Characteristic` and `Total`
/// - keeps those three cells of every following record as text
#[tracing::instrument(level = "info", skip(path, opts), fields(path = %path.display()))]
pub fn load_census_csv(path: &Path, opts: &LoadOptions) -> Result<RawTable, CensusError> {
    // 1) Read raw bytes; a missing file is the one terminal condition
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => CensusError::DataNotFound {
            path: path.to_path_buf(),
        },
        _ => CensusError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    // 2) Decode with the legacy single-byte encoding
    let encoding = Encoding::for_label(opts.encoding.as_bytes()).ok_or_else(|| {
        CensusError::UnknownEncoding {
            label: opts.encoding.clone(),
        }
    })?;
    let (text, used, had_errors) = encoding.decode(&bytes);
    if had_errors {
        warn!(encoding = used.name(), "malformed sequences replaced while decoding");
    }
    debug!(bytes = bytes.len(), encoding = used.name(), "decoded input");

    // 3) Skip metadata, then parse header + records
    let body = skip_lines(&text, opts.skip_rows);
    let table = parse_records(body)?;

    info!(rows = table.len(), "loaded census table");
    Ok(table)
}

/// Parse a header row plus data records into a `RawTable`.
pub fn parse_records(body: &str) -> Result<RawTable, CensusError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|source| CensusError::Csv { record: 0, source })?
        .clone();
    let topic_idx = column_index(&headers, TOPIC_COLUMN)?;
    let characteristic_idx = column_index(&headers, CHARACTERISTIC_COLUMN)?;
    let total_idx = column_index(&headers, TOTAL_COLUMN)?;

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.map_err(|source| CensusError::Csv {
            record: idx + 1,
            source,
        })?;
        let cell = |i: usize| record.get(i).unwrap_or("").to_string();
        rows.push(RawRow {
            topic: cell(topic_idx),
            characteristic: cell(characteristic_idx),
            total: cell(total_idx),
        });
    }

    Ok(RawTable { rows })
}

/// Return `text` minus its first `n` lines.
fn skip_lines(text: &str, n: usize) -> &str {
    let mut rest = text;
    for _ in 0..n {
        match rest.find('\n') {
            Some(i) => rest = &rest[i + 1..],
            None => return "",
        }
    }
    rest
}

fn column_index(headers: &StringRecord, name: &'static str) -> Result<usize, CensusError> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
        .ok_or(CensusError::MissingColumn { column: name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,censusviz::load=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn write_fixture(bytes: &[u8]) -> Result<NamedTempFile> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(bytes)?;
        Ok(tmp)
    }

    #[test]
    fn loads_latin1_export_after_metadata() -> Result<()> {
        init_test_logging();
        let mut content: Vec<u8> = Vec::new();
        content.extend_from_slice(b"Census Profile, 2021 Census of Population\n");
        content.extend_from_slice(b"Geography: Metro Vancouver A\n");
        content.extend_from_slice(b"\n");
        content.extend_from_slice(b"Topic,Characteristic,Total,Men+,Women+\n");
        content.extend_from_slice(b"Mother tongue,  English ,1200,600,600\n");
        // 0xE7 is c-cedilla in latin-1
        content.extend_from_slice(b"Mother tongue,  Fran\xe7ais,85,40,45\n");
        content.extend_from_slice(b"Income of households in 2020,\"$20,000 to $24,999\",100\n");

        let tmp = write_fixture(&content)?;
        let table = load_census_csv(tmp.path(), &LoadOptions::default())?;

        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[0].topic, "Mother tongue");
        assert_eq!(table.rows[0].characteristic, "  English ");
        assert_eq!(table.rows[0].total, "1200");
        assert_eq!(table.rows[1].characteristic, "  Français");
        assert_eq!(table.rows[2].characteristic, "$20,000 to $24,999");
        assert_eq!(table.rows[2].total, "100");
        Ok(())
    }

    #[test]
    fn short_records_yield_empty_cells() -> Result<()> {
        let table = parse_records("Characteristic,Topic,Total\nUnder $5,Income\n")?;
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].topic, "Income");
        assert_eq!(table.rows[0].characteristic, "Under $5");
        assert_eq!(table.rows[0].total, "");
        Ok(())
    }

    #[test]
    fn missing_file_is_data_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        let opts = LoadOptions::default();
        let err = load_census_csv(&path, &opts).unwrap_err();
        match err {
            CensusError::DataNotFound { path: p } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_total_column_is_reported() -> Result<()> {
        let tmp = write_fixture(b"a\nb\nc\nTopic,Characteristic\nMother tongue,English\n")?;
        let opts = LoadOptions::default();
        let err = load_census_csv(tmp.path(), &opts).unwrap_err();
        assert!(matches!(err, CensusError::MissingColumn { column: "Total" }));
        Ok(())
    }

    #[test]
    fn unknown_encoding_is_rejected() -> Result<()> {
        let tmp = write_fixture(b"Topic,Characteristic,Total\n")?;
        let opts = LoadOptions {
            skip_rows: 0,
            encoding: "klingon-8".to_string(),
        };
        let err = load_census_csv(tmp.path(), &opts).unwrap_err();
        assert!(matches!(err, CensusError::UnknownEncoding { .. }));
        Ok(())
    }

    #[test]
    fn skip_lines_handles_short_input() {
        assert_eq!(skip_lines("a\nb\nc\nrest", 3), "rest");
        assert_eq!(skip_lines("a\r\nb\r\n", 1), "b\r\n");
        assert_eq!(skip_lines("only", 3), "");
        assert_eq!(skip_lines("x\ny", 0), "x\ny");
    }
}
