use agora_store::StoreError;
use agora_types::{OptionId, TopicId};
use thiserror::Error;

/// Errors from ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("topic {0} not found")]
    TopicNotFound(TopicId),

    #[error("topic {0} is closed to voting")]
    TopicClosed(TopicId),

    #[error("option {option} is not valid for topic {topic}")]
    InvalidOption { topic: TopicId, option: OptionId },

    #[error("topic {0} does not use this voting mode")]
    WrongVotingMode(TopicId),

    /// No eligibility record for the pseudonym — the caller is not a
    /// verified person.
    #[error("person is not eligible to vote")]
    NotEligible,

    #[error("person does not meet the legal age requirement")]
    Underage,

    #[error("insufficient credits: need {needed}, have {available}")]
    InsufficientCredits { needed: u64, available: u64 },

    #[error("invalid allocation: {0}")]
    InvalidAllocation(String),

    /// The optimistic commit lost every retry. Retryable by the caller;
    /// never silently dropped.
    #[error("commit conflicts exhausted retries")]
    ConflictRetryExhausted,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
