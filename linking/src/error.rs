use agora_store::StoreError;
use thiserror::Error;

/// Errors from the device-linking flow.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("unknown link token")]
    UnknownToken,

    #[error("link token expired")]
    Expired,

    /// The token was already redeemed, here or by a concurrent redeemer.
    #[error("link token already consumed")]
    AlreadyConsumed,

    /// The presented verification was not a fresh full eID round.
    /// An existing session never satisfies the linking gate.
    #[error("full identity re-verification required")]
    ReauthRequired,

    /// Too long passed between redemption and re-verification.
    #[error("re-verification window elapsed")]
    ReauthWindowElapsed,

    /// The attempt is not in the phase this operation requires.
    #[error("linking attempt is in the wrong state")]
    InvalidState,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
