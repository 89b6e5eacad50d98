//! Credential binding storage trait.

use crate::StoreError;
use agora_types::{CredentialId, PersonHash, PublicKey, Timestamp};
use serde::{Deserialize, Serialize};

/// A public-key authentication credential bound to exactly one pseudonym.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub id: CredentialId,
    pub owner: PersonHash,
    pub public_key: PublicKey,
    /// Last signature counter presented by the authenticator. Assertions
    /// must present a strictly greater value.
    pub sign_count: u32,
    pub created_at: Timestamp,
    pub last_used_at: Timestamp,
    /// Human-readable platform label ("Pixel 9", "YubiKey 5").
    pub label: String,
}

/// Trait for credential storage.
///
/// A credential identifier is globally unique: once bound it can never be
/// rebound, so `bind` is insert-if-absent regardless of which owner holds
/// the existing binding.
pub trait CredentialStore {
    /// Insert a new binding. `AlreadyExists` if the identifier is present.
    fn bind(&self, credential: &Credential) -> Result<(), StoreError>;

    fn get_credential(&self, id: &CredentialId) -> Result<Option<Credential>, StoreError>;

    fn credentials_for(&self, person: &PersonHash) -> Result<Vec<Credential>, StoreError>;

    /// Compare-and-set the signature counter and touch `last_used_at`.
    /// `Conflict` if the stored counter is no longer `expected_sign_count`.
    fn update_usage(
        &self,
        id: &CredentialId,
        expected_sign_count: u32,
        new_sign_count: u32,
        now: Timestamp,
    ) -> Result<(), StoreError>;

    /// Remove a binding. `NotFound` if absent or owned by someone else
    /// (ownership is not disclosed through this call).
    fn revoke(&self, id: &CredentialId, owner: &PersonHash) -> Result<(), StoreError>;
}
