//! Error types for sheetfind-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or querying a spreadsheet.
///
/// A failed national-ID validation and a lookup miss are not errors; they
/// are ordinary outcomes reported as values.
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The workbook could not be opened or parsed
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// Requested sheet does not exist in the workbook
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Requested column does not exist in the header row
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}
