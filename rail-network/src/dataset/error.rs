//! Dataset loading errors.

/// Errors that can occur when reading a dataset from disk.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File is not a valid route table
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
