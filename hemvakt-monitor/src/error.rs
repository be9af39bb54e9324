use hemvakt_core::ContainerError;
use hemvakt_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("{kind} '{id}' already exists")]
    DuplicateId { kind: &'static str, id: String },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Rotation steps must be at least 1")]
    InvalidSteps,

    #[error("{0} cannot be empty")]
    Blank(&'static str),

    #[error("Command queue is full; '{0}' was not added")]
    QueueFull(String),

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl MonitorError {
    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        MonitorError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub(crate) fn duplicate(kind: &'static str, id: impl Into<String>) -> Self {
        MonitorError::DuplicateId {
            kind,
            id: id.into(),
        }
    }
}
