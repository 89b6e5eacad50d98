//! The central vote transaction.

use agora_store::{
    AuditEntry, AuditStore, CommitVote, CreditStore, EligibilityStore, StoreError, TallyDelta,
    Topic, TopicStore, VoteRecord, VoteStore,
};
use agora_types::{LedgerParams, OptionId, PersonHash, Timestamp, TopicId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::LedgerError;

/// Result of a cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastOutcome {
    /// True when the submitted option matched the existing record — an
    /// idempotent resubmission that moved nothing.
    pub unchanged: bool,
}

/// The vote ledger over any conforming store.
///
/// Stateless apart from its store handle; concurrency control lives in the
/// store's conditional commits, retried here up to
/// `params.max_commit_retries` times.
pub struct VoteLedger<S> {
    store: Arc<S>,
    params: LedgerParams,
}

impl<S> VoteLedger<S>
where
    S: VoteStore + TopicStore + EligibilityStore + AuditStore + CreditStore,
{
    pub fn new(store: Arc<S>, params: LedgerParams) -> Self {
        Self { store, params }
    }

    pub(crate) fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub(crate) fn params(&self) -> &LedgerParams {
        &self.params
    }

    /// Cast or change a vote.
    ///
    /// Validates the option against the topic, gates on eligibility, then
    /// runs the read-modify-write inside an optimistic retry loop: read
    /// the current record and its version, compute the tally deltas, and
    /// commit conditionally. A conflicting commit for the same
    /// (topic, person) pair retries from the read; casts for different
    /// persons never invalidate each other.
    pub fn cast_vote(
        &self,
        topic_id: &TopicId,
        person: PersonHash,
        option: OptionId,
        now: Timestamp,
    ) -> Result<CastOutcome, LedgerError> {
        let topic = self.open_topic(topic_id)?;
        if topic.quadratic {
            return Err(LedgerError::WrongVotingMode(topic_id.clone()));
        }
        if !topic.has_option(&option) {
            return Err(LedgerError::InvalidOption {
                topic: topic_id.clone(),
                option,
            });
        }
        self.require_adult(&person)?;

        for _ in 0..self.params.max_commit_retries {
            let existing = self.store.get_vote(topic_id, &person)?;

            let (expected_version, previous) = match &existing {
                Some(v) => {
                    if v.value.option == option {
                        return Ok(CastOutcome { unchanged: true });
                    }
                    (Some(v.version), Some(v.value.option.clone()))
                }
                None => (None, None),
            };

            let mut deltas = Vec::with_capacity(2);
            if let Some(prev) = &previous {
                deltas.push(TallyDelta {
                    option: prev.clone(),
                    delta: -1,
                });
            }
            deltas.push(TallyDelta {
                option: option.clone(),
                delta: 1,
            });

            let commit = CommitVote {
                expected_version,
                record: VoteRecord {
                    topic: topic_id.clone(),
                    person,
                    option: option.clone(),
                    updated_at: now,
                },
                deltas,
                audit: AuditEntry {
                    topic: topic_id.clone(),
                    person,
                    previous,
                    next: option.clone(),
                    recorded_at: now,
                },
            };

            match self.store.commit_vote(commit) {
                Ok(()) => return Ok(CastOutcome { unchanged: false }),
                Err(StoreError::Conflict(_)) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(LedgerError::ConflictRetryExhausted)
    }

    /// Aggregate counts per option. Eventually reflects all committed
    /// casts; read-only.
    pub fn tally(&self, topic_id: &TopicId) -> Result<HashMap<OptionId, u64>, LedgerError> {
        self.require_topic(topic_id)?;
        Ok(self.store.get_tally(topic_id)?)
    }

    /// Ordered vote transitions for one (topic, person) pair.
    pub fn audit_trail(
        &self,
        topic_id: &TopicId,
        person: &PersonHash,
    ) -> Result<Vec<AuditEntry>, LedgerError> {
        Ok(self.store.entries_for(topic_id, person)?)
    }

    /// Digest over the whole audit log, for tamper-evident exports.
    pub fn audit_head(&self) -> Result<[u8; 32], LedgerError> {
        Ok(self.store.audit_head()?)
    }

    pub(crate) fn require_topic(&self, topic_id: &TopicId) -> Result<Topic, LedgerError> {
        self.store
            .get_topic(topic_id)?
            .ok_or_else(|| LedgerError::TopicNotFound(topic_id.clone()))
    }

    pub(crate) fn open_topic(&self, topic_id: &TopicId) -> Result<Topic, LedgerError> {
        let topic = self.require_topic(topic_id)?;
        if !topic.open {
            return Err(LedgerError::TopicClosed(topic_id.clone()));
        }
        Ok(topic)
    }

    pub(crate) fn require_adult(&self, person: &PersonHash) -> Result<(), LedgerError> {
        match self.store.get_eligibility(person)? {
            None => Err(LedgerError::NotEligible),
            Some(e) if !e.is_adult => Err(LedgerError::Underage),
            Some(_) => Ok(()),
        }
    }
}
