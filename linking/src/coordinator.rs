//! The linking coordinator.

use agora_credentials::CredentialRegistry;
use agora_crypto::random_token_32;
use agora_store::{
    CeremonyStore, CredentialStore, LinkChallenge, LinkPhase, LinkStore, RedeemOutcome,
    RegistrationChallenge, StoreError,
};
use agora_types::{AssuranceLevel, LedgerParams, LinkToken, PersonHash, Timestamp};
use std::sync::Arc;

use crate::error::LinkError;

/// Coordinates the `Issued → Redeemed → ReauthVerified → CredentialBound`
/// state machine over any conforming store.
pub struct LinkCoordinator<S> {
    store: Arc<S>,
    registry: CredentialRegistry<S>,
    params: LedgerParams,
}

impl<S> LinkCoordinator<S>
where
    S: LinkStore + CredentialStore + CeremonyStore,
{
    pub fn new(store: Arc<S>, params: LedgerParams) -> Self {
        let registry = CredentialRegistry::new(Arc::clone(&store), params.clone());
        Self {
            store,
            registry,
            params,
        }
    }

    /// Issue a fresh link token with a minutes-scale TTL.
    pub fn issue(&self, now: Timestamp) -> Result<LinkChallenge, LinkError> {
        let challenge = LinkChallenge {
            token: LinkToken::new(random_token_32()),
            issued_at: now,
            phase: LinkPhase::Issued,
            redeemed_at: None,
            reauth_at: None,
            person: None,
        };
        self.store.put_link(&challenge)?;
        Ok(challenge)
    }

    /// The payload embedded in the QR code shown to the new device.
    pub fn qr_payload(token: &LinkToken) -> String {
        format!("agora-link:{token}")
    }

    /// Redeem a token on the new device. Atomic single-winner semantics:
    /// of any number of concurrent redeemers, exactly one succeeds.
    pub fn redeem(&self, token: &LinkToken, now: Timestamp) -> Result<(), LinkError> {
        match self.store.consume(token, now, self.params.link_ttl_secs) {
            Ok(RedeemOutcome::Redeemed) => Ok(()),
            Ok(RedeemOutcome::Expired) => Err(LinkError::Expired),
            Ok(RedeemOutcome::AlreadyConsumed) => Err(LinkError::AlreadyConsumed),
            Err(StoreError::NotFound(_)) => Err(LinkError::UnknownToken),
            Err(e) => Err(e.into()),
        }
    }

    /// Record the fresh identity re-verification for a redeemed token.
    ///
    /// Only a full eID round counts — an existing authenticated session
    /// must never be enough to take over a pseudonym's devices. The
    /// verification must land within the re-auth window of redemption.
    pub fn confirm_reauth(
        &self,
        token: &LinkToken,
        person: PersonHash,
        assurance: AssuranceLevel,
        now: Timestamp,
    ) -> Result<(), LinkError> {
        if !assurance.is_full_verification() {
            return Err(LinkError::ReauthRequired);
        }
        let challenge = self
            .store
            .get_link(token)?
            .ok_or(LinkError::UnknownToken)?;
        let redeemed_at = match (challenge.phase, challenge.redeemed_at) {
            (LinkPhase::Redeemed, Some(at)) => at,
            _ => return Err(LinkError::InvalidState),
        };
        if redeemed_at.has_expired(self.params.reauth_window_secs, now) {
            return Err(LinkError::ReauthWindowElapsed);
        }
        match self.store.record_reauth(token, &person, now) {
            Ok(()) => Ok(()),
            Err(StoreError::Conflict(_)) => Err(LinkError::InvalidState),
            Err(e) => Err(e.into()),
        }
    }

    /// Hand off to the credential registry: open a registration ceremony
    /// for the re-verified person and retire the token.
    pub fn begin_binding(
        &self,
        token: &LinkToken,
        now: Timestamp,
    ) -> Result<RegistrationChallenge, LinkError> {
        let challenge = self
            .store
            .get_link(token)?
            .ok_or(LinkError::UnknownToken)?;
        let person = match (challenge.phase, challenge.person) {
            (LinkPhase::ReauthVerified, Some(p)) => p,
            _ => return Err(LinkError::InvalidState),
        };
        match self.store.mark_bound(token) {
            Ok(()) => {}
            Err(StoreError::Conflict(_)) => return Err(LinkError::InvalidState),
            Err(e) => return Err(e.into()),
        }
        self.registry
            .begin_registration(person, now)
            .map_err(|e| match e {
                agora_credentials::CredentialError::Store(s) => LinkError::Store(s),
                // begin_registration only fails on storage.
                _ => LinkError::InvalidState,
            })
    }
}
