use chrono::{DateTime, Utc};
use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    CoreError(#[from] organizr_core::error::CoreError),

    #[error(transparent)]
    StoreError(#[from] crate::store::StoreError),

    #[error("Invalid window: end {end} must be after start {start}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(String),

    #[error("At least one query filter or a time window must be provided")]
    NoFilterProvided,
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
