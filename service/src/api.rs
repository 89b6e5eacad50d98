//! Request and response types for the service operations.
//!
//! Everything here is serde-serializable and string-typed at the edges:
//! pseudonyms, credential identifiers, keys, signatures and challenges
//! travel as lowercase hex. The raw national identifier appears in
//! exactly one request type and is never echoed back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Identity ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct VerifyIdentityRequest {
    /// The raw national identifier. Dropped as soon as the pseudonym is
    /// derived.
    pub national_id: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyIdentityResponse {
    pub person_hash: String,
    pub is_adult: bool,
    pub is_new_person: bool,
}

// ── Voting ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CastVoteRequest {
    pub topic: String,
    pub person_hash: String,
    pub option: String,
}

/// Outcome of a cast or an allocation.
///
/// Domain rejections (closed topic, invalid option, insufficient
/// credits, ...) come back as `success: false` with a message rather
/// than as transport-level errors; nothing was mutated in that case.
#[derive(Debug, Serialize)]
pub struct CastVoteResponse {
    pub success: bool,
    pub unchanged: bool,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TallyResponse {
    pub topic: String,
    pub counts: BTreeMap<String, u64>,
}

#[derive(Debug, Deserialize)]
pub struct AllocateRequest {
    pub topic: String,
    pub person_hash: String,
    /// Option identifier to vote weight. An empty map withdraws the
    /// allocation.
    pub allocations: BTreeMap<String, u32>,
}

// ── Topics ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateTopicRequest {
    pub topic: String,
    pub options: Vec<String>,
    pub open: bool,
    #[serde(default)]
    pub quadratic: bool,
}

// ── Credential ceremonies ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BeginRegistrationRequest {
    pub person_hash: String,
}

#[derive(Debug, Serialize)]
pub struct BeginRegistrationResponse {
    /// 32-byte challenge, hex-encoded.
    pub challenge: String,
}

#[derive(Debug, Deserialize)]
pub struct CompleteRegistrationRequest {
    pub person_hash: String,
    pub credential_id: String,
    /// Ed25519 public key, 32 bytes hex.
    pub public_key: String,
    /// Signature over the challenge bytes, 64 bytes hex.
    pub signature: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct CompleteRegistrationResponse {
    pub credential_id: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct BeginAssertionResponse {
    pub challenge: String,
}

#[derive(Debug, Deserialize)]
pub struct CompleteAssertionRequest {
    pub credential_id: String,
    /// The challenge being answered, 32 bytes hex.
    pub challenge: String,
    pub signature: String,
    pub sign_count: u32,
}

#[derive(Debug, Serialize)]
pub struct CompleteAssertionResponse {
    pub person_hash: String,
}

// ── Device linking ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct IssueLinkResponse {
    pub token: String,
    pub qr_payload: String,
}

#[derive(Debug, Deserialize)]
pub struct RedeemLinkRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct RedeemLinkResponse {
    pub ok: bool,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmLinkReauthRequest {
    pub token: String,
    /// The raw national identifier, re-verified in full as part of this
    /// call. Possession of the token alone is never enough.
    pub national_id: String,
}

#[derive(Debug, Serialize)]
pub struct BeginLinkBindingResponse {
    pub person_hash: String,
    /// Registration ceremony challenge, 32 bytes hex.
    pub challenge: String,
}
