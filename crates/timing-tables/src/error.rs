//! Error types for the timing-tables crate.
//!
//! Every variant carries enough context (file, line, dataset) to point at
//! the input that broke the scan.

use thiserror::Error;

/// Errors that can occur while reading and scanning benchmark output
#[derive(Error, Debug)]
pub enum TableError {
    /// Input file could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// An "Operation took" line had no decimal number in one of the logs
    #[error("No timing value found at line {line} in {file}")]
    NumberNotFound { file: String, line: usize },

    /// The matched text could not be converted to a float
    #[error("Invalid timing value '{value}' at line {line} in {file}")]
    InvalidNumber {
        file: String,
        line: usize,
        value: String,
    },

    /// The query script closed a block before opening any
    #[error("Disconnect at line {line} of the query script has no preceding connect")]
    DisconnectWithoutConnect { line: usize },

    /// The query script connects to more datasets than the logs recorded
    #[error("Dataset #{index} ('{name}') closed at line {line} has no timing block in the logs")]
    MissingDataset {
        index: usize,
        name: String,
        line: usize,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, TableError>;
