//! The credential registry.

use agora_crypto::{random_token_32, verify_signature};
use agora_store::{
    AssertionChallenge, CeremonyStore, Credential, CredentialStore, RegistrationChallenge,
    StoreError,
};
use agora_types::{CredentialId, LedgerParams, PersonHash, Timestamp};
use std::sync::Arc;

use crate::ceremony::{AssertionResponse, RegistrationResponse};
use crate::error::CredentialError;

/// Registry mediating credential ceremonies over any conforming store.
pub struct CredentialRegistry<S> {
    store: Arc<S>,
    params: LedgerParams,
}

impl<S> CredentialRegistry<S>
where
    S: CredentialStore + CeremonyStore,
{
    pub fn new(store: Arc<S>, params: LedgerParams) -> Self {
        Self { store, params }
    }

    /// Open a registration ceremony for a known person.
    ///
    /// Snapshots the person's current credential identifiers as an
    /// exclusion list and replaces any outstanding challenge for them.
    pub fn begin_registration(
        &self,
        person: PersonHash,
        now: Timestamp,
    ) -> Result<RegistrationChallenge, CredentialError> {
        let excluded = self
            .store
            .credentials_for(&person)?
            .into_iter()
            .map(|c| c.id)
            .collect();
        let challenge = RegistrationChallenge {
            person,
            challenge: random_token_32(),
            excluded,
            issued_at: now,
        };
        self.store.put_registration(&challenge)?;
        Ok(challenge)
    }

    /// Complete a registration ceremony, binding a new credential.
    ///
    /// The challenge is single-use: it is removed from the store before
    /// any verification, so a replay finds nothing to answer.
    pub fn complete_registration(
        &self,
        person: PersonHash,
        response: &RegistrationResponse,
        now: Timestamp,
    ) -> Result<Credential, CredentialError> {
        let challenge = self
            .store
            .take_registration(&person)?
            .ok_or(CredentialError::ChallengeMismatch)?;
        if challenge
            .issued_at
            .has_expired(self.params.ceremony_ttl_secs, now)
        {
            return Err(CredentialError::ChallengeExpired);
        }
        if !verify_signature(&challenge.challenge, &response.signature, &response.public_key) {
            return Err(CredentialError::AttestationInvalid);
        }
        if challenge.excluded.contains(&response.credential_id) {
            return Err(CredentialError::CredentialAlreadyBound);
        }

        let credential = Credential {
            id: response.credential_id.clone(),
            owner: person,
            public_key: response.public_key.clone(),
            sign_count: 0,
            created_at: now,
            last_used_at: now,
            label: response.label.clone(),
        };
        match self.store.bind(&credential) {
            Ok(()) => Ok(credential),
            // Bound to anyone, anywhere: a hard failure, never a transfer.
            Err(StoreError::AlreadyExists(_)) => Err(CredentialError::CredentialAlreadyBound),
            Err(e) => Err(e.into()),
        }
    }

    /// Open an assertion (login) ceremony. No person is known yet.
    pub fn begin_assertion(&self, now: Timestamp) -> Result<AssertionChallenge, CredentialError> {
        let challenge = AssertionChallenge {
            challenge: random_token_32(),
            issued_at: now,
        };
        self.store.put_assertion(&challenge)?;
        Ok(challenge)
    }

    /// Complete an assertion ceremony, returning the owning person.
    ///
    /// Rejects unknown credentials, bad signatures, and any presented
    /// signature counter that is not strictly greater than the stored one
    /// — a stale counter means a second copy of the credential exists.
    pub fn complete_assertion(
        &self,
        response: &AssertionResponse,
        now: Timestamp,
    ) -> Result<PersonHash, CredentialError> {
        let challenge = self
            .store
            .take_assertion(&response.challenge)?
            .ok_or(CredentialError::ChallengeMismatch)?;
        if challenge
            .issued_at
            .has_expired(self.params.ceremony_ttl_secs, now)
        {
            return Err(CredentialError::ChallengeExpired);
        }

        let credential = self
            .store
            .get_credential(&response.credential_id)?
            .ok_or(CredentialError::AssertionInvalid)?;
        if !verify_signature(&challenge.challenge, &response.signature, &credential.public_key) {
            return Err(CredentialError::AssertionInvalid);
        }
        if response.sign_count <= credential.sign_count {
            return Err(CredentialError::AssertionInvalid);
        }
        match self.store.update_usage(
            &response.credential_id,
            credential.sign_count,
            response.sign_count,
            now,
        ) {
            Ok(()) => Ok(credential.owner),
            // A concurrent assertion moved the counter under us. The safe
            // reading is the same as a stale counter.
            Err(StoreError::Conflict(_)) => Err(CredentialError::AssertionInvalid),
            Err(e) => Err(e.into()),
        }
    }

    /// Explicitly revoke a credential. Credentials never expire on their
    /// own.
    pub fn revoke(
        &self,
        person: &PersonHash,
        id: &CredentialId,
    ) -> Result<(), CredentialError> {
        Ok(self.store.revoke(id, person)?)
    }

    /// The person's bound credentials (device-management listing).
    pub fn credentials_for(&self, person: &PersonHash) -> Result<Vec<Credential>, CredentialError> {
        Ok(self.store.credentials_for(person)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_crypto::{keypair_from_seed, sign_message};
    use agora_store_mem::MemStore;
    use agora_types::KeyPair;

    fn person(n: u8) -> PersonHash {
        PersonHash::new([n; 32])
    }

    fn registry() -> CredentialRegistry<MemStore> {
        CredentialRegistry::new(Arc::new(MemStore::new()), LedgerParams::default())
    }

    fn authenticator(seed: u8) -> (CredentialId, KeyPair) {
        (CredentialId::new(vec![seed; 16]), keypair_from_seed(&[seed; 32]))
    }

    fn answer_registration(
        challenge: &RegistrationChallenge,
        id: &CredentialId,
        kp: &KeyPair,
    ) -> RegistrationResponse {
        RegistrationResponse {
            credential_id: id.clone(),
            public_key: kp.public.clone(),
            signature: sign_message(&challenge.challenge, &kp.private),
            label: "test device".into(),
        }
    }

    fn register(
        registry: &CredentialRegistry<MemStore>,
        p: PersonHash,
        seed: u8,
        now: Timestamp,
    ) -> (CredentialId, KeyPair) {
        let (id, kp) = authenticator(seed);
        let challenge = registry.begin_registration(p, now).unwrap();
        registry
            .complete_registration(p, &answer_registration(&challenge, &id, &kp), now)
            .unwrap();
        (id, kp)
    }

    #[test]
    fn register_then_assert_round_trip() {
        let registry = registry();
        let now = Timestamp::new(1000);
        let (id, kp) = register(&registry, person(1), 7, now);

        let challenge = registry.begin_assertion(now).unwrap();
        let response = AssertionResponse {
            credential_id: id,
            challenge: challenge.challenge,
            signature: sign_message(&challenge.challenge, &kp.private),
            sign_count: 1,
        };
        let owner = registry.complete_assertion(&response, now).unwrap();
        assert_eq!(owner, person(1));
    }

    #[test]
    fn registration_challenge_is_single_use() {
        let registry = registry();
        let now = Timestamp::new(1000);
        let (id, kp) = authenticator(7);
        let challenge = registry.begin_registration(person(1), now).unwrap();
        let response = answer_registration(&challenge, &id, &kp);
        registry.complete_registration(person(1), &response, now).unwrap();

        let (id2, kp2) = authenticator(8);
        let replay = answer_registration(&challenge, &id2, &kp2);
        assert!(matches!(
            registry.complete_registration(person(1), &replay, now),
            Err(CredentialError::ChallengeMismatch)
        ));
    }

    #[test]
    fn expired_registration_rejected() {
        let registry = registry();
        let (id, kp) = authenticator(7);
        let challenge = registry.begin_registration(person(1), Timestamp::new(1000)).unwrap();
        let response = answer_registration(&challenge, &id, &kp);
        // Default ceremony TTL is 300 seconds.
        assert!(matches!(
            registry.complete_registration(person(1), &response, Timestamp::new(1300)),
            Err(CredentialError::ChallengeExpired)
        ));
    }

    #[test]
    fn bad_attestation_signature_rejected() {
        let registry = registry();
        let now = Timestamp::new(1000);
        let (id, kp) = authenticator(7);
        let other = keypair_from_seed(&[99; 32]);
        let challenge = registry.begin_registration(person(1), now).unwrap();
        let response = RegistrationResponse {
            credential_id: id,
            public_key: kp.public.clone(),
            // Signed by a different key than the one presented.
            signature: sign_message(&challenge.challenge, &other.private),
            label: "test device".into(),
        };
        assert!(matches!(
            registry.complete_registration(person(1), &response, now),
            Err(CredentialError::AttestationInvalid)
        ));
    }

    #[test]
    fn cross_person_rebinding_fails_and_preserves_owner() {
        let registry = registry();
        let now = Timestamp::new(1000);
        let (id, kp) = register(&registry, person(1), 7, now);

        // Person 2 tries to register the very same credential identifier.
        let challenge = registry.begin_registration(person(2), now).unwrap();
        let response = answer_registration(&challenge, &id, &kp);
        assert!(matches!(
            registry.complete_registration(person(2), &response, now),
            Err(CredentialError::CredentialAlreadyBound)
        ));

        let creds = registry.credentials_for(&person(1)).unwrap();
        assert_eq!(creds.len(), 1);
        assert_eq!(creds[0].owner, person(1));
        assert!(registry.credentials_for(&person(2)).unwrap().is_empty());
    }

    #[test]
    fn excluded_credential_cannot_reregister() {
        let registry = registry();
        let now = Timestamp::new(1000);
        let (id, kp) = register(&registry, person(1), 7, now);

        // Same person, same device: the exclusion list catches it.
        let challenge = registry.begin_registration(person(1), now).unwrap();
        assert!(challenge.excluded.contains(&id));
        let response = answer_registration(&challenge, &id, &kp);
        assert!(matches!(
            registry.complete_registration(person(1), &response, now),
            Err(CredentialError::CredentialAlreadyBound)
        ));
    }

    #[test]
    fn non_increasing_counter_rejected() {
        let registry = registry();
        let now = Timestamp::new(1000);
        let (id, kp) = register(&registry, person(1), 7, now);

        // Legitimate assertion advances the counter to 5.
        let challenge = registry.begin_assertion(now).unwrap();
        let response = AssertionResponse {
            credential_id: id.clone(),
            challenge: challenge.challenge,
            signature: sign_message(&challenge.challenge, &kp.private),
            sign_count: 5,
        };
        registry.complete_assertion(&response, now).unwrap();

        // A clone replaying counter 5 (or anything lower) is rejected.
        for stale in [5, 3] {
            let challenge = registry.begin_assertion(now).unwrap();
            let response = AssertionResponse {
                credential_id: id.clone(),
                challenge: challenge.challenge,
                signature: sign_message(&challenge.challenge, &kp.private),
                sign_count: stale,
            };
            assert!(matches!(
                registry.complete_assertion(&response, now),
                Err(CredentialError::AssertionInvalid)
            ));
        }
    }

    #[test]
    fn assertion_with_unknown_credential_rejected() {
        let registry = registry();
        let now = Timestamp::new(1000);
        let (_, kp) = authenticator(7);
        let challenge = registry.begin_assertion(now).unwrap();
        let response = AssertionResponse {
            credential_id: CredentialId::new(vec![0xEE; 16]),
            challenge: challenge.challenge,
            signature: sign_message(&challenge.challenge, &kp.private),
            sign_count: 1,
        };
        assert!(matches!(
            registry.complete_assertion(&response, now),
            Err(CredentialError::AssertionInvalid)
        ));
    }

    #[test]
    fn revocation_removes_binding() {
        let registry = registry();
        let now = Timestamp::new(1000);
        let (id, _) = register(&registry, person(1), 7, now);

        // Someone else cannot revoke it.
        assert!(registry.revoke(&person(2), &id).is_err());
        registry.revoke(&person(1), &id).unwrap();
        assert!(registry.credentials_for(&person(1)).unwrap().is_empty());
    }
}
