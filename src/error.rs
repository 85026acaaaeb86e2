//! Error types for catalog file operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by whole-file operations (storage writes, batch imports).
///
/// Container operations never return these: duplicates and failed lookups
/// are reported through `bool` / `Option` results instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The requested file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file extension is not a recognized batch format.
    #[error("Unsupported file format: {} (use .json or .csv)", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Reading or writing the file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected shape.
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file is not valid CSV.
    #[error("Invalid CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type alias for catalog file operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
