//! Ledger parameters — policy values shared by every component.

use serde::{Deserialize, Serialize};

/// Tunable policy values for the eligibility and vote ledger.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerParams {
    /// Minimum age (full calendar years) for voting eligibility.
    pub legal_voting_age: u32,

    /// TTL in seconds for registration and assertion ceremony challenges.
    pub ceremony_ttl_secs: u64,

    /// TTL in seconds for cross-device link tokens. Minutes-scale: the
    /// token travels over a QR code and must not outlive the sitting.
    pub link_ttl_secs: u64,

    /// How long after redeeming a link token the fresh identity
    /// re-verification remains acceptable, in seconds.
    pub reauth_window_secs: u64,

    /// Bound on optimistic-commit retries before surfacing
    /// `ConflictRetryExhausted` to the caller.
    pub max_commit_retries: u32,

    /// Credit budget seeded for each person under quadratic allocation.
    pub initial_credit_balance: u64,
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            legal_voting_age: 18,
            ceremony_ttl_secs: 300,
            link_ttl_secs: 180,
            reauth_window_secs: 600,
            max_commit_retries: 8,
            initial_credit_balance: 100,
        }
    }
}
