use agora_store::StoreError;
use thiserror::Error;

/// Errors from credential ceremonies.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The outstanding challenge's TTL elapsed. The caller restarts the
    /// ceremony.
    #[error("ceremony challenge expired")]
    ChallengeExpired,

    /// No outstanding challenge, or the response cites a different one
    /// (a replay, or a completion race lost to another device).
    #[error("ceremony challenge mismatch")]
    ChallengeMismatch,

    /// The credential identifier is already bound — to anyone. Rebinding
    /// never transfers; this is a hard failure worth surfacing.
    #[error("credential is already bound")]
    CredentialAlreadyBound,

    /// The attestation signature did not verify.
    #[error("attestation invalid")]
    AttestationInvalid,

    /// Unknown credential, bad signature, or a non-increasing signature
    /// counter (possible cloned authenticator).
    #[error("assertion invalid")]
    AssertionInvalid,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
