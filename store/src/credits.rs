//! Credit balance storage trait (quadratic allocation).

use crate::vote::Versioned;
use crate::StoreError;
use agora_types::PersonHash;

/// Trait for per-person credit budgets.
///
/// Balances are only ever decremented through
/// [`crate::VoteStore::commit_allocation`], which checks the version read
/// here; `set_balance` exists for seeding and the recurring replenishment
/// job.
pub trait CreditStore {
    fn get_balance(&self, person: &PersonHash) -> Result<Option<Versioned<u64>>, StoreError>;
    fn set_balance(&self, person: &PersonHash, balance: u64) -> Result<(), StoreError>;
}
