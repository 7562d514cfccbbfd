use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Corpus or settings rejected at construction time.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Query rejected at the boundary before normalization.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
