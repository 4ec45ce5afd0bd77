use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Median requested from an empty structure")]
    EmptyStructure,

    #[error("Scan size mismatch: expected {expected} readings, got {actual}")]
    ScanSizeMismatch { expected: usize, actual: usize },

    #[error("Non-finite sample at scan index {index}")]
    NonFiniteSample { index: usize },

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FilterError>;
