use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced to callers
///
/// Decoding itself cannot fail; only reaching the bytes (or writing an
/// export) can.
#[derive(Error, Debug)]
pub enum PdbError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No export.pdb found under {root:?}")]
    NotFound { root: PathBuf },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl PdbError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PdbError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PdbError>;
