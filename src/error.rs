use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProfileError>;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing column '{}' in {}", .column, .path.display())]
    MissingColumn { column: String, path: PathBuf },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("line {line}: {source}")]
    Row {
        line: usize,
        #[source]
        source: Box<ProfileError>,
    },
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Chart error: {0}")]
    Chart(String),
}

impl ProfileError {
    pub fn is_config(&self) -> bool {
        matches!(self, ProfileError::Config(_))
    }
}
