use meridian_strategy::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("tape io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tick record on line {line}: {source}")]
    Tape {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode tick record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("no products configured for synthetic tape")]
    EmptyUniverse,
}

pub type ReplayResult<T> = Result<T, ReplayError>;
