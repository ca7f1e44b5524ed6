use std::path::PathBuf;

/// Fatal conditions raised while loading the census export.
///
/// Everything past loading recovers locally (unparseable counts become
/// missing values, absent brackets become placeholder rows), so this is the
/// whole of the typed error surface.
#[derive(Debug, thiserror::Error)]
pub enum CensusError {
    #[error("data file not found at {}", .path.display())]
    DataNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown text encoding `{label}`")]
    UnknownEncoding { label: String },

    #[error("required column `{column}` missing from header row")]
    MissingColumn { column: &'static str },

    #[error("CSV parse error at record {record}: {source}")]
    Csv {
        record: usize,
        #[source]
        source: csv::Error,
    },
}
