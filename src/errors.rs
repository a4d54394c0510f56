use thiserror::Error;

/// Error type shared by the calculator, drafts, RPC service and configuration.
#[derive(Debug, Error)]
pub enum LeaseError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unsupported frequency: {0}")]
    UnsupportedFrequency(String),
    #[error("Date out of range: {0}")]
    DateOverflow(String),
    #[error("RPC `{function}` failed: {message}")]
    Rpc { function: String, message: String },
    #[error("{0}")]
    EmptyResult(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LeaseError>;
