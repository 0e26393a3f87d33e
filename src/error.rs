//! Error types for the tissue-supplement library.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum SupplementError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid selector pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Missing column '{0}' in annotation")]
    MissingColumn(String),

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Template {path} does not contain the placeholder '{marker}'")]
    MissingPlaceholder { path: String, marker: String },
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, SupplementError>;
