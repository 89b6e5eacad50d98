//! Assurance levels for identity verification.

use serde::{Deserialize, Serialize};

/// How strongly the person behind a pseudonym has proven their identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssuranceLevel {
    /// No identity proof on record.
    None,
    /// Verified through the external eID exchange.
    Eid,
}

impl AssuranceLevel {
    /// Whether this level satisfies the fresh-re-verification gate for
    /// identity-bound mutations (device binding).
    pub fn is_full_verification(&self) -> bool {
        matches!(self, Self::Eid)
    }
}
