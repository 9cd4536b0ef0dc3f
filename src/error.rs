use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop ingestion of a results directory.
///
/// Per-line parse problems are not errors: they are logged and skipped by
/// the loader.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("results directory not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("failed to read {}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    pub fn read_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IngestError::ReadFailure {
            path: path.into(),
            source,
        }
    }
}
