use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeduceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed input: missing required column(s): {0}")]
    MissingColumns(String),

    #[error("Malformed input: row {row}: unparsable amount '{value}'")]
    BadAmount { row: usize, value: String },

    #[error("Invalid rule set: {0}")]
    BadRules(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Threshold must be between 0.0 and 1.0, got {0}")]
    InvalidThreshold(f64),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, DeduceError>;
