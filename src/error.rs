//! Error type shared by every pipeline stage.

use arrow::error::ArrowError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    /// File missing, unreadable or unwritable.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV (ragged rows, bad quoting, invalid UTF-8).
    #[error("malformed CSV in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ArrowError,
    },

    /// A header whose normalized name has no entry in the column mapping.
    #[error("column '{0}' has no entry in the column mapping")]
    UnmappedColumn(String),

    /// A column the rules expect is not in the table.
    #[error("column '{0}' not found")]
    MissingColumn(String),

    /// A cell that cannot become a whole integer.
    #[error("column '{column}', row {row}: cannot convert '{value}' to an integer")]
    NotInteger {
        column: String,
        row: usize,
        value: String,
    },

    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
