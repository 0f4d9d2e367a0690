use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoiError {
    #[error("Unknown scenario '{key}' (expected conservative, expected or optimistic)")]
    UnknownScenario { key: String },

    #[error("Currency '{code}' not found in configuration")]
    UnknownCurrency { code: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type RoiResult<T> = Result<T, RoiError>;
