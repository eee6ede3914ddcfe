use thiserror::Error;

/// Errors raised while loading or validating a trader configuration.
///
/// All of these are detected at construction time; a running engine never
/// fails mid-tick.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{product}: standard deviation must be positive, got {std}")]
    NonPositiveStd { product: String, std: String },
    #[error("{product}: exit band {exit_z} must satisfy 0 <= exit < entry {entry_z}")]
    InvalidExitBand {
        product: String,
        entry_z: String,
        exit_z: String,
    },
    #[error("{product}: extreme threshold {extreme_z} must not be below entry {entry_z}")]
    InvalidExtremeThreshold {
        product: String,
        entry_z: String,
        extreme_z: String,
    },
    #[error("{product}: inventory limit must be positive, got {limit}")]
    NonPositiveLimit { product: String, limit: i64 },
    #[error("{product}: order size must be positive, got {size}")]
    NonPositiveSize { product: String, size: i64 },
    #[error("{product}: spread parameter must be non-negative, got {value}")]
    NegativeSpread { product: String, value: String },
    #[error("{0}: basket has no constituents")]
    EmptyBasket(String),
    #[error("{product}: constituent {constituent} has non-positive weight {weight}")]
    InvalidWeight {
        product: String,
        constituent: String,
        weight: i64,
    },
    #[error("{0}: basket lists itself as a constituent")]
    SelfReferencingBasket(String),
    #[error("Smoothing window must be at least 1")]
    InvalidWindow,
    #[error("Supplied history keeps {supplied} values, configuration asks for {configured}")]
    WindowMismatch { configured: usize, supplied: usize },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
