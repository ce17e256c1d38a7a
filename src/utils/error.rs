use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("upstream feed for '{venue}' answered with status {status}")]
    UpstreamStatusError { venue: String, status: u16 },

    #[error("malformed price '{value}': expected a decimal amount with currency suffix")]
    MalformedPriceError { value: String },

    #[error("invalid person count {0}: must be at least 1")]
    InvalidPersonCountError(u32),

    #[error("invalid search criteria: {field}: {reason}")]
    InvalidCriteriaError { field: String, reason: String },

    #[error("configuration error: {field} = '{value}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ScoutError>;
