//! Custom error types for image scanning

use std::io;

/// Errors that can stop a scan run
///
/// Per-image failures never surface as a `ScanError` from the pipeline; they
/// are folded into the record instead. These variants cover everything around
/// the pipeline: configuration, enumeration, output and the external decoders
/// when they are called directly.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Image could not be decoded into pixels
    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),

    /// Embedded metadata could not be read
    #[error("EXIF error: {0}")]
    ExifError(#[from] exif::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Invalid configuration value or file
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A concurrent worker task failed to join
    #[error("Worker task failed: {0}")]
    JoinError(#[from] tokio::task::JoinError),

    /// Generic error with message
    #[error("{0}")]
    GenericError(String),
}

/// Result type for scan operations
pub type ScanResult<T> = Result<T, ScanError>;

impl From<String> for ScanError {
    fn from(msg: String) -> Self {
        ScanError::GenericError(msg)
    }
}
