//! Error types for the flashcard core

use thiserror::Error;

/// Errors raised by a key-value storage backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while validating a vocabulary catalog.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog has no entries")]
    Empty,

    #[error("duplicate entry id: {0}")]
    DuplicateId(String),

    #[error("entry {0} has an empty id, text or category")]
    MissingField(String),
}

/// Errors raised while importing a vocabulary file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    #[error("unsupported file format: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required '{0}' column in file header")]
    MissingColumn(&'static str),

    #[error("empty file - no header row")]
    NoHeader,

    #[error("no sheets found in Excel file")]
    NoSheets,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] calamine::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("answer threshold must be within 0.0..=1.0, got {0}")]
    InvalidThreshold(f64),
}

/// Errors raised by a study session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("unknown catalog entry: {0}")]
    UnknownEntry(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
