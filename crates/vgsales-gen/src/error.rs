use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("seed catalog not found: {}", .0.display())]
    MissingInput(PathBuf),
    #[error("malformed field '{field}' on line {line}: '{value}'")]
    MalformedField {
        line: u64,
        field: &'static str,
        value: String,
    },
    #[error("invariant violated: {0}")]
    Invariant(String),
    #[error("failed to initialize tracing: {0}")]
    Logging(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type GenResult<T> = Result<T, GenError>;
