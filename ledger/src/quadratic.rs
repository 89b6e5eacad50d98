//! Quadratic allocation — the credit-budget vote mode.
//!
//! Instead of single-choice exclusivity, a person spreads weighted votes
//! across options; casting `n` votes on one option costs `n²` credits.
//! The cost check is always re-done server-side, and the debit commits in
//! the same atomic step as the tally movement.

use agora_store::{
    AuditEntry, AuditStore, CommitAllocation, CreditDebit, CreditStore, EligibilityStore,
    StoreError, TallyDelta, TopicStore, VoteStore,
};
use agora_store::AllocationRecord;
use agora_types::{OptionId, PersonHash, Timestamp, TopicId};
use std::collections::BTreeMap;

use crate::cast::{CastOutcome, VoteLedger};
use crate::error::LedgerError;

/// Quadratic cost of an allocation: the sum of squared per-option votes.
fn allocation_cost(votes: &BTreeMap<OptionId, u32>) -> Result<u64, LedgerError> {
    let mut cost: u64 = 0;
    for v in votes.values() {
        let sq = (*v as u64)
            .checked_mul(*v as u64)
            .ok_or_else(|| LedgerError::InvalidAllocation("vote weight overflow".into()))?;
        cost = cost
            .checked_add(sq)
            .ok_or_else(|| LedgerError::InvalidAllocation("allocation cost overflow".into()))?;
    }
    Ok(cost)
}

impl<S> VoteLedger<S>
where
    S: VoteStore + TopicStore + EligibilityStore + AuditStore + CreditStore,
{
    /// Replace a person's allocation on a quadratic topic.
    ///
    /// The previous allocation's cost is refunded and the new cost debited
    /// inside one conditional commit, so the budget invariant holds across
    /// re-allocations and no partial debit is ever visible. Zero-weight
    /// entries are rejected; an explicit withdrawal passes an empty map.
    pub fn allocate(
        &self,
        topic_id: &TopicId,
        person: PersonHash,
        votes: BTreeMap<OptionId, u32>,
        now: Timestamp,
    ) -> Result<CastOutcome, LedgerError> {
        let topic = self.open_topic(topic_id)?;
        if !topic.quadratic {
            return Err(LedgerError::WrongVotingMode(topic_id.clone()));
        }
        for (option, weight) in &votes {
            if !topic.has_option(option) {
                return Err(LedgerError::InvalidOption {
                    topic: topic_id.clone(),
                    option: option.clone(),
                });
            }
            if *weight == 0 {
                return Err(LedgerError::InvalidAllocation(format!(
                    "zero-weight entry for option {option}"
                )));
            }
        }
        self.require_adult(&person)?;

        let cost = allocation_cost(&votes)?;

        for _ in 0..self.params().max_commit_retries {
            let balance = self
                .store()
                .get_balance(&person)?
                .ok_or(LedgerError::NotEligible)?;
            let existing = self.store().get_allocation(topic_id, &person)?;

            let (expected_version, previous_votes) = match &existing {
                Some(v) => {
                    if v.value.votes == votes {
                        return Ok(CastOutcome { unchanged: true });
                    }
                    (Some(v.version), v.value.votes.clone())
                }
                None => (None, BTreeMap::new()),
            };

            // Refund the standing allocation before charging the new one.
            let previous_cost = allocation_cost(&previous_votes)?;
            let available = balance
                .value
                .checked_add(previous_cost)
                .ok_or_else(|| LedgerError::InvalidAllocation("credit overflow".into()))?;
            if cost > available {
                return Err(LedgerError::InsufficientCredits {
                    needed: cost,
                    available,
                });
            }

            let (deltas, audit) =
                diff_allocations(topic_id, person, &previous_votes, &votes, now);

            let commit = CommitAllocation {
                expected_version,
                record: AllocationRecord {
                    topic: topic_id.clone(),
                    person,
                    votes: votes.clone(),
                    updated_at: now,
                },
                deltas,
                credit: CreditDebit {
                    person,
                    expected_version: balance.version,
                    new_balance: available - cost,
                },
                audit,
            };

            match self.store().commit_allocation(commit) {
                Ok(()) => return Ok(CastOutcome { unchanged: false }),
                Err(StoreError::Conflict(_)) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(LedgerError::ConflictRetryExhausted)
    }

    /// A person's remaining credit budget.
    pub fn credit_balance(&self, person: &PersonHash) -> Result<u64, LedgerError> {
        Ok(self
            .store()
            .get_balance(person)?
            .map(|v| v.value)
            .unwrap_or(0))
    }
}

/// Per-option tally deltas and audit entries for an allocation change.
fn diff_allocations(
    topic: &TopicId,
    person: PersonHash,
    previous: &BTreeMap<OptionId, u32>,
    next: &BTreeMap<OptionId, u32>,
    now: Timestamp,
) -> (Vec<TallyDelta>, Vec<AuditEntry>) {
    let mut deltas = Vec::new();
    let mut audit = Vec::new();

    let options: std::collections::BTreeSet<&OptionId> =
        previous.keys().chain(next.keys()).collect();
    for option in options {
        let before = previous.get(option).copied().unwrap_or(0) as i64;
        let after = next.get(option).copied().unwrap_or(0) as i64;
        if before == after {
            continue;
        }
        deltas.push(TallyDelta {
            option: option.clone(),
            delta: after - before,
        });
        audit.push(AuditEntry {
            topic: topic.clone(),
            person,
            previous: (before > 0).then(|| option.clone()),
            next: option.clone(),
            recorded_at: now,
        });
    }
    (deltas, audit)
}
