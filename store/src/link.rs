//! Cross-device link challenge storage trait.

use crate::StoreError;
use agora_types::{LinkToken, PersonHash, Timestamp};
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a linking attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkPhase {
    /// Token issued, not yet scanned.
    Issued,
    /// Token redeemed exactly once; awaiting identity re-verification.
    Redeemed,
    /// Fresh full verification confirmed; credential binding may begin.
    ReauthVerified,
    /// Terminal: a registration ceremony was started from this token.
    CredentialBound,
}

/// An ephemeral cross-device linking attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkChallenge {
    pub token: LinkToken,
    pub issued_at: Timestamp,
    pub phase: LinkPhase,
    pub redeemed_at: Option<Timestamp>,
    pub reauth_at: Option<Timestamp>,
    /// Unknown until re-verification identifies the acting person.
    pub person: Option<PersonHash>,
}

/// Result of an atomic redemption attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedeemOutcome {
    /// This caller won the race; the token is now consumed.
    Redeemed,
    /// The TTL elapsed before redemption.
    Expired,
    /// The token was already consumed (here or by a concurrent redeemer).
    AlreadyConsumed,
}

/// Trait for link challenge storage.
pub trait LinkStore {
    fn put_link(&self, challenge: &LinkChallenge) -> Result<(), StoreError>;

    fn get_link(&self, token: &LinkToken) -> Result<Option<LinkChallenge>, StoreError>;

    /// Atomically check TTL and consumed state, and mark consumed — a
    /// compare-and-set, never check-then-set. A race between two redeemers
    /// yields exactly one `Redeemed`.
    fn consume(
        &self,
        token: &LinkToken,
        now: Timestamp,
        ttl_secs: u64,
    ) -> Result<RedeemOutcome, StoreError>;

    /// Transition `Redeemed → ReauthVerified`, recording the person.
    /// `Conflict` if the challenge is in any other phase.
    fn record_reauth(
        &self,
        token: &LinkToken,
        person: &PersonHash,
        now: Timestamp,
    ) -> Result<(), StoreError>;

    /// Transition `ReauthVerified → CredentialBound` (terminal).
    /// `Conflict` if the challenge is in any other phase.
    fn mark_bound(&self, token: &LinkToken) -> Result<(), StoreError>;
}
