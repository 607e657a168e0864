use thiserror::Error;

/// Why a load ended in the `Error` state.
///
/// These never escape the loader as errors; they are logged and kept as the
/// failure reason string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadFailure {
    #[error("missing source")]
    MissingSource,
    #[error("read error: {0}")]
    ReadError(String),
    #[error("empty content")]
    EmptyContent,
    #[error("insufficient fields ({found} of {expected})")]
    InsufficientFields { expected: usize, found: usize },
    #[error("exception: {0}")]
    FieldParseFailure(String),
    #[error("network error: {0}")]
    TransportFailure(String),
    #[error("http error: status {status} {reason}")]
    ProtocolFailure { status: u16, reason: String },
    #[error("unexpected exception: {0}")]
    UnexpectedException(String),
}

#[derive(Debug, Error)]
pub enum BuildInfoError {
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config Error: {0}")]
    ConfigError(String),
    #[error("JSON Error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Stamp Error: {0}")]
    StampError(String),
}

impl From<std::num::ParseIntError> for LoadFailure {
    fn from(err: std::num::ParseIntError) -> Self {
        LoadFailure::FieldParseFailure(err.to_string())
    }
}
