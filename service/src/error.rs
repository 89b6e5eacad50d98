//! Service boundary errors.

use agora_store::StoreError;
use thiserror::Error;

/// Errors surfaced to external callers.
///
/// Domain rejections that belong to a specific operation (invalid
/// option, insufficient credits, ...) travel inside that operation's
/// response type instead; this enum covers configuration problems,
/// identity gating, lookups, and infrastructure failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("configuration error: {0}")]
    Config(String),

    /// Deliberately uniform: format errors, checksum mismatches and
    /// impossible birth dates all collapse into this one message, so a
    /// caller probing identifiers learns nothing from the shape of the
    /// failure.
    #[error("identifier rejected")]
    IdentifierRejected,

    #[error("person does not meet the legal age requirement")]
    Underage,

    #[error("topic not found: {0}")]
    TopicNotFound(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("store error: {0}")]
    Store(String),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        ServiceError::Store(e.to_string())
    }
}
