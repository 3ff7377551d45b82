use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Source is empty: no header row")]
    MissingHeader,

    #[error("Label column '{0}' not found in header")]
    MissingLabelColumn(String),

    #[error("Line {line}: expected {expected} cells, got {actual}")]
    RaggedRow { line: usize, expected: usize, actual: usize },

    #[error("Line {line}: empty label")]
    EmptyLabel { line: usize },

    #[error("Line {line}: column '{column}' has invalid indicator '{value}'")]
    InvalidIndicator { line: usize, column: String, value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] cbrx_core::Error),
}
