use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Priority {0} out of range (expected 1-5, 1 highest)")]
    InvalidPriority(u8),

    #[error("Unknown alert kind '{0}' (expected intrusion, fire or temperature_anomaly)")]
    UnknownAlertKind(String),

    #[error("Invalid record:\n{0}")]
    Validation(#[from] ValidationErrors),
}
