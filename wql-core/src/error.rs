/// Error types for the water quality library
use thiserror::Error;

/// Main error type for water quality data operations
#[derive(Error, Debug)]
pub enum WqError {
    /// HTTP request failed
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Endpoint answered with a non-OK status
    #[error("Unexpected HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Endpoint answered with an empty body
    #[error("Empty response from {url}")]
    EmptyResponse { url: String },

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A required column is missing from a CSV header row
    #[error("Missing expected column: {0}")]
    MissingColumn(String),

    /// A station row carried a number that is not a number
    #[error("Invalid station number '{value}' on line {line}")]
    InvalidStation { line: usize, value: String },

    /// Date parsing failed
    #[error("Failed to parse date: {0}")]
    DateParse(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

/// Type alias for Results using WqError
pub type Result<T> = std::result::Result<T, WqError>;
