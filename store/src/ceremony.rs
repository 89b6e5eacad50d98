//! Ceremony challenge storage trait.

use crate::StoreError;
use agora_types::{CredentialId, PersonHash, Timestamp};
use serde::{Deserialize, Serialize};

/// An outstanding registration challenge, scoped to one person.
///
/// `excluded` snapshots the person's credential identifiers at issue time
/// so a device cannot register the same credential twice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationChallenge {
    pub person: PersonHash,
    pub challenge: [u8; 32],
    pub excluded: Vec<CredentialId>,
    pub issued_at: Timestamp,
}

/// An outstanding assertion challenge (discoverable-credential login, so
/// no person is known yet; the challenge value itself is the key).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionChallenge {
    pub challenge: [u8; 32],
    pub issued_at: Timestamp,
}

/// Trait for ceremony challenge storage.
///
/// The `take_*` operations atomically remove what they return — a
/// challenge can be completed at most once.
pub trait CeremonyStore {
    /// Store a registration challenge, replacing any outstanding one for
    /// the same person.
    fn put_registration(&self, challenge: &RegistrationChallenge) -> Result<(), StoreError>;

    fn take_registration(
        &self,
        person: &PersonHash,
    ) -> Result<Option<RegistrationChallenge>, StoreError>;

    fn put_assertion(&self, challenge: &AssertionChallenge) -> Result<(), StoreError>;

    fn take_assertion(
        &self,
        challenge: &[u8; 32],
    ) -> Result<Option<AssertionChallenge>, StoreError>;
}
