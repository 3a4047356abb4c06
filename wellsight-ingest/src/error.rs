use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("CSV parse failed: {0}")]
    CsvError(#[from] csv::Error),

    #[error("missing expected column '{column}' in {file}")]
    MissingColumn { column: String, file: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;
