//! Append-only audit log trait.

use crate::StoreError;
use agora_types::{OptionId, PersonHash, Timestamp, TopicId};
use serde::{Deserialize, Serialize};

/// One vote transition, write-once.
///
/// `previous` is `None` for a first vote. The total order of transitions
/// for a (topic, person) pair is reconstructable from `recorded_at`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub topic: TopicId,
    pub person: PersonHash,
    pub previous: Option<OptionId>,
    pub next: OptionId,
    pub recorded_at: Timestamp,
}

/// Trait for the append-only audit log. No update or delete operations
/// exist, by design.
pub trait AuditStore {
    fn append(&self, entry: &AuditEntry) -> Result<(), StoreError>;

    /// Transitions for one (topic, person) pair, in append order.
    fn entries_for(
        &self,
        topic: &TopicId,
        person: &PersonHash,
    ) -> Result<Vec<AuditEntry>, StoreError>;

    fn entry_count(&self) -> Result<u64, StoreError>;

    /// Chained digest over every appended entry, in append order. Lets an
    /// exporter prove the log was not rewritten underneath it. All-zero
    /// for an empty log.
    fn audit_head(&self) -> Result<[u8; 32], StoreError>;
}
