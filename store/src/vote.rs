//! Vote record, tally, and allocation storage trait.
//!
//! The two `commit_*` operations are the ledger's transaction boundary:
//! record upsert, tally deltas, audit append (and credit debit for
//! allocations) land together or not at all, conditional on the version
//! the caller read.

use crate::audit::AuditEntry;
use crate::StoreError;
use agora_types::{OptionId, PersonHash, Timestamp, TopicId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// The current vote of one person on one topic. At most one exists per
/// (topic, person) pair; revoting replaces `option` in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub topic: TopicId,
    pub person: PersonHash,
    pub option: OptionId,
    pub updated_at: Timestamp,
}

/// The current quadratic allocation of one person on one topic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub topic: TopicId,
    pub person: PersonHash,
    /// Votes per option; the cost is the sum of squares of these values.
    pub votes: BTreeMap<OptionId, u32>,
    pub updated_at: Timestamp,
}

/// A value paired with the backend version it was read at. Conditional
/// writes cite this version; a mismatch at commit time is a `Conflict`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub value: T,
    pub version: u64,
}

/// A signed adjustment to one option's tally count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TallyDelta {
    pub option: OptionId,
    pub delta: i64,
}

/// A conditional debit of a person's credit balance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreditDebit {
    pub person: PersonHash,
    pub expected_version: u64,
    pub new_balance: u64,
}

/// One atomic single-choice vote commit.
#[derive(Clone, Debug)]
pub struct CommitVote {
    /// Version of the existing vote record, or `None` for a first vote
    /// (the commit fails with `Conflict` if a record appeared meanwhile).
    pub expected_version: Option<u64>,
    pub record: VoteRecord,
    pub deltas: Vec<TallyDelta>,
    pub audit: AuditEntry,
}

/// One atomic quadratic allocation commit.
#[derive(Clone, Debug)]
pub struct CommitAllocation {
    pub expected_version: Option<u64>,
    pub record: AllocationRecord,
    pub deltas: Vec<TallyDelta>,
    pub credit: CreditDebit,
    pub audit: Vec<AuditEntry>,
}

/// Trait for vote, tally, and allocation storage.
pub trait VoteStore {
    fn get_vote(
        &self,
        topic: &TopicId,
        person: &PersonHash,
    ) -> Result<Option<Versioned<VoteRecord>>, StoreError>;

    fn get_allocation(
        &self,
        topic: &TopicId,
        person: &PersonHash,
    ) -> Result<Option<Versioned<AllocationRecord>>, StoreError>;

    /// Aggregate counts per option. Options with a zero count may be
    /// absent from the map.
    fn get_tally(&self, topic: &TopicId) -> Result<HashMap<OptionId, u64>, StoreError>;

    /// Number of distinct persons holding a vote record on the topic.
    fn voter_count(&self, topic: &TopicId) -> Result<u64, StoreError>;

    /// Atomically apply a single-choice vote commit.
    fn commit_vote(&self, commit: CommitVote) -> Result<(), StoreError>;

    /// Atomically apply a quadratic allocation commit, including the
    /// conditional credit debit.
    fn commit_allocation(&self, commit: CommitAllocation) -> Result<(), StoreError>;
}
