//! Per-post failure taxonomy

use std::path::PathBuf;
use thiserror::Error;

/// Errors that exclude a single post from the repository
///
/// Absence (missing directory, index file or metadata block) and unpublished
/// posts are not errors; they are reported as `Ok(None)` by the loaders.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(#[from] serde_json::Error),

    #[error("Metadata must be a JSON object")]
    MetadataNotObject,
}

impl PostError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
