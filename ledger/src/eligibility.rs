//! Eligibility lifecycle — the idempotent upsert fed by identity
//! verification.

use agora_store::{CreditStore, Eligibility, EligibilityStore};
use agora_types::{AssuranceLevel, LedgerParams, PersonHash, Timestamp};
use std::sync::Arc;

use crate::error::LedgerError;

/// Eligibility operations over any conforming store.
pub struct EligibilityLedger<S> {
    store: Arc<S>,
    params: LedgerParams,
}

impl<S> EligibilityLedger<S>
where
    S: EligibilityStore + CreditStore,
{
    pub fn new(store: Arc<S>, params: LedgerParams) -> Self {
        Self { store, params }
    }

    /// Record a successful identity verification.
    ///
    /// Underage persons are rejected before any write. A first
    /// verification creates the record with all three timestamps set to
    /// `now` and seeds the credit budget; repeat verifications touch only
    /// `last_verified_at`, so a retried call converges on the same state.
    /// Returns the record and whether it was newly created.
    pub fn verify(
        &self,
        person: PersonHash,
        is_adult: bool,
        now: Timestamp,
    ) -> Result<(Eligibility, bool), LedgerError> {
        if !is_adult {
            return Err(LedgerError::Underage);
        }

        match self.store.get_eligibility(&person)? {
            Some(mut existing) => {
                existing.last_verified_at = now;
                existing.assurance_level = AssuranceLevel::Eid;
                self.store.put_eligibility(&existing)?;
                Ok((existing, false))
            }
            None => {
                let record = Eligibility {
                    person,
                    is_adult,
                    assurance_level: AssuranceLevel::Eid,
                    created_at: now,
                    first_verified_at: now,
                    last_verified_at: now,
                };
                self.store.put_eligibility(&record)?;
                if self.store.get_balance(&person)?.is_none() {
                    self.store
                        .set_balance(&person, self.params.initial_credit_balance)?;
                }
                Ok((record, true))
            }
        }
    }

    pub fn get(&self, person: &PersonHash) -> Result<Option<Eligibility>, LedgerError> {
        Ok(self.store.get_eligibility(person)?)
    }

    /// Client-initiated erasure of the pseudonym reference. Tallies the
    /// person contributed to are not rolled back.
    pub fn erase(&self, person: &PersonHash) -> Result<(), LedgerError> {
        Ok(self.store.delete_eligibility(person)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_store_mem::MemStore;

    fn ledger() -> EligibilityLedger<MemStore> {
        EligibilityLedger::new(Arc::new(MemStore::new()), LedgerParams::default())
    }

    fn person(n: u8) -> PersonHash {
        PersonHash::new([n; 32])
    }

    #[test]
    fn first_verification_creates_record_and_seeds_credits() {
        let ledger = ledger();
        let (rec, is_new) = ledger.verify(person(1), true, Timestamp::new(100)).unwrap();
        assert!(is_new);
        assert_eq!(rec.created_at, Timestamp::new(100));
        assert_eq!(rec.first_verified_at, Timestamp::new(100));
        assert_eq!(rec.last_verified_at, Timestamp::new(100));
        assert_eq!(
            ledger.store.get_balance(&person(1)).unwrap().unwrap().value,
            100
        );
    }

    #[test]
    fn repeat_verification_touches_only_last_verified() {
        let ledger = ledger();
        ledger.verify(person(1), true, Timestamp::new(100)).unwrap();
        let (rec, is_new) = ledger.verify(person(1), true, Timestamp::new(200)).unwrap();
        assert!(!is_new);
        assert_eq!(rec.created_at, Timestamp::new(100));
        assert_eq!(rec.first_verified_at, Timestamp::new(100));
        assert_eq!(rec.last_verified_at, Timestamp::new(200));
    }

    #[test]
    fn retry_with_same_inputs_is_idempotent() {
        let ledger = ledger();
        ledger.verify(person(1), true, Timestamp::new(100)).unwrap();
        ledger.verify(person(1), true, Timestamp::new(100)).unwrap();
        let rec = ledger.get(&person(1)).unwrap().unwrap();
        assert_eq!(rec.first_verified_at, Timestamp::new(100));
        assert_eq!(rec.last_verified_at, Timestamp::new(100));
    }

    #[test]
    fn underage_rejected_without_write() {
        let ledger = ledger();
        assert!(matches!(
            ledger.verify(person(1), false, Timestamp::new(100)),
            Err(LedgerError::Underage)
        ));
        assert!(ledger.get(&person(1)).unwrap().is_none());
    }

    #[test]
    fn erase_removes_only_the_record() {
        let ledger = ledger();
        ledger.verify(person(1), true, Timestamp::new(100)).unwrap();
        ledger.erase(&person(1)).unwrap();
        assert!(ledger.get(&person(1)).unwrap().is_none());
    }
}
