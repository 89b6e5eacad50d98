//! Ceremony response messages.

use agora_types::{CredentialId, PublicKey, Signature};
use serde::{Deserialize, Serialize};

/// An authenticator's answer to a registration challenge.
///
/// The authenticator proves possession of the new key pair by signing the
/// challenge bytes with it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub credential_id: CredentialId,
    pub public_key: PublicKey,
    /// Signature over the 32 challenge bytes, by the new private key.
    pub signature: Signature,
    /// Human-readable platform label chosen by the client.
    pub label: String,
}

/// An authenticator's answer to an assertion challenge.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssertionResponse {
    pub credential_id: CredentialId,
    /// Echo of the challenge being answered (the login flow is
    /// discoverable, so the challenge value is the lookup key).
    pub challenge: [u8; 32],
    /// Signature over the challenge bytes, by the stored credential key.
    pub signature: Signature,
    /// The authenticator's signature counter; must exceed the stored one.
    pub sign_count: u32,
}
