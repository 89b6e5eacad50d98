//! Eligibility storage trait.

use crate::StoreError;
use agora_types::{AssuranceLevel, PersonHash, Timestamp};
use serde::{Deserialize, Serialize};

/// The per-pseudonym record of voting eligibility.
///
/// Created on first successful identity verification; later verifications
/// touch only `last_verified_at`. Never deleted by the system itself —
/// `delete_eligibility` exists solely for client-initiated erasure of the
/// pseudonym reference, and the tallies it contributed to are not rolled
/// back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    pub person: PersonHash,
    pub is_adult: bool,
    pub assurance_level: AssuranceLevel,
    pub created_at: Timestamp,
    pub first_verified_at: Timestamp,
    pub last_verified_at: Timestamp,
}

/// Trait for eligibility storage operations.
pub trait EligibilityStore {
    fn get_eligibility(&self, person: &PersonHash) -> Result<Option<Eligibility>, StoreError>;
    fn put_eligibility(&self, record: &Eligibility) -> Result<(), StoreError>;
    fn delete_eligibility(&self, person: &PersonHash) -> Result<(), StoreError>;
    fn eligibility_count(&self) -> Result<u64, StoreError>;
}
