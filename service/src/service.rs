//! The service facade.

use agora_credentials::{
    AssertionResponse, CredentialError, CredentialRegistry, RegistrationResponse,
};
use agora_crypto::Pepper;
use agora_identity::{derive_is_adult, derive_person_hash};
use agora_ledger::{EligibilityLedger, LedgerError, VoteLedger};
use agora_linking::{LinkCoordinator, LinkError};
use agora_store::{
    AuditStore, CeremonyStore, CredentialStore, CreditStore, EligibilityStore, LinkStore, Topic,
    TopicStore, VoteStore,
};
use agora_types::{
    AssuranceLevel, CredentialId, LedgerParams, LinkToken, OptionId, PersonHash, PublicKey,
    Signature, Timestamp, TopicId,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::*;
use crate::config::ServiceConfig;
use crate::error::ServiceError;

/// The full set of storage capabilities the facade needs.
pub trait ServiceStore:
    VoteStore
    + TopicStore
    + EligibilityStore
    + AuditStore
    + CreditStore
    + CredentialStore
    + CeremonyStore
    + LinkStore
{
}

impl<T> ServiceStore for T where
    T: VoteStore
        + TopicStore
        + EligibilityStore
        + AuditStore
        + CreditStore
        + CredentialStore
        + CeremonyStore
        + LinkStore
{
}

/// Owns the ledgers, registry and linking coordinator over one store.
pub struct CoreService<S> {
    store: Arc<S>,
    pepper: Pepper,
    params: LedgerParams,
    eligibility: EligibilityLedger<S>,
    votes: VoteLedger<S>,
    registry: CredentialRegistry<S>,
    links: LinkCoordinator<S>,
}

impl<S: ServiceStore> CoreService<S> {
    pub fn new(store: Arc<S>, pepper: Pepper, params: LedgerParams) -> Self {
        Self {
            eligibility: EligibilityLedger::new(Arc::clone(&store), params.clone()),
            votes: VoteLedger::new(Arc::clone(&store), params.clone()),
            registry: CredentialRegistry::new(Arc::clone(&store), params.clone()),
            links: LinkCoordinator::new(Arc::clone(&store), params.clone()),
            store,
            pepper,
            params,
        }
    }

    /// Build a service from configuration, decoding the pepper.
    pub fn from_config(config: &ServiceConfig, store: Arc<S>) -> Result<Self, ServiceError> {
        let pepper = config.pepper()?;
        Ok(Self::new(store, pepper, config.params.clone()))
    }

    // ── Identity ─────────────────────────────────────────────────────────

    /// Verify a national identifier and upsert the person's eligibility.
    ///
    /// The identifier exists only for the duration of this call: it is
    /// validated, hashed, checked for age and dropped. All failures of
    /// the identifier itself surface as the same
    /// [`ServiceError::IdentifierRejected`].
    pub fn verify_identity(
        &self,
        request: &VerifyIdentityRequest,
        now: Timestamp,
    ) -> Result<VerifyIdentityResponse, ServiceError> {
        let (person, is_adult) = self.check_identity(&request.national_id, now)?;

        let (record, is_new_person) = self
            .eligibility
            .verify(person, is_adult, now)
            .map_err(|e| match e {
                LedgerError::Underage => ServiceError::Underage,
                other => ServiceError::Store(other.to_string()),
            })?;

        info!(person = ?record.person, is_new_person, "identity verified");
        Ok(VerifyIdentityResponse {
            person_hash: person.to_string(),
            is_adult,
            is_new_person,
        })
    }

    /// Client-initiated erasure of the pseudonym's eligibility record.
    /// Tallies the person contributed to stay as they are.
    pub fn erase_identity(&self, person_hash: &str) -> Result<(), ServiceError> {
        let person = parse_person(person_hash)?;
        self.eligibility
            .erase(&person)
            .map_err(|e| ServiceError::Store(e.to_string()))?;
        info!(person = ?person, "eligibility record erased");
        Ok(())
    }

    // ── Topics and voting ────────────────────────────────────────────────

    pub fn create_topic(&self, request: &CreateTopicRequest) -> Result<(), ServiceError> {
        let topic = Topic {
            id: TopicId::new(request.topic.clone()),
            options: request.options.iter().map(OptionId::new).collect(),
            open: request.open,
            quadratic: request.quadratic,
        };
        self.store.put_topic(&topic)?;
        info!(topic = %request.topic, quadratic = request.quadratic, "topic created");
        Ok(())
    }

    /// Cast or change a vote. Domain rejections come back inside the
    /// response with nothing mutated.
    pub fn cast_vote(
        &self,
        request: &CastVoteRequest,
        now: Timestamp,
    ) -> Result<CastVoteResponse, ServiceError> {
        let person = parse_person(&request.person_hash)?;
        let topic = TopicId::new(request.topic.clone());
        let option = OptionId::new(request.option.clone());

        match self.votes.cast_vote(&topic, person, option, now) {
            Ok(outcome) => {
                info!(topic = %topic, person = ?person, unchanged = outcome.unchanged, "vote cast");
                Ok(CastVoteResponse {
                    success: true,
                    unchanged: outcome.unchanged,
                    message: None,
                })
            }
            Err(LedgerError::Store(e)) => Err(e.into()),
            Err(rejected) => {
                warn!(topic = %topic, person = ?person, reason = %rejected, "cast rejected");
                Ok(CastVoteResponse {
                    success: false,
                    unchanged: false,
                    message: Some(rejected.to_string()),
                })
            }
        }
    }

    pub fn get_topic_tally(&self, topic: &str) -> Result<TallyResponse, ServiceError> {
        let topic_id = TopicId::new(topic);
        let counts = self.votes.tally(&topic_id).map_err(|e| match e {
            LedgerError::TopicNotFound(t) => ServiceError::TopicNotFound(t.to_string()),
            other => ServiceError::Store(other.to_string()),
        })?;
        Ok(TallyResponse {
            topic: topic.to_string(),
            counts: counts
                .into_iter()
                .map(|(option, count)| (option.to_string(), count))
                .collect(),
        })
    }

    /// Replace a person's allocation on a quadratic topic.
    pub fn allocate(
        &self,
        request: &AllocateRequest,
        now: Timestamp,
    ) -> Result<CastVoteResponse, ServiceError> {
        let person = parse_person(&request.person_hash)?;
        let topic = TopicId::new(request.topic.clone());
        let votes: BTreeMap<OptionId, u32> = request
            .allocations
            .iter()
            .map(|(option, weight)| (OptionId::new(option), *weight))
            .collect();

        match self.votes.allocate(&topic, person, votes, now) {
            Ok(outcome) => {
                info!(topic = %topic, person = ?person, unchanged = outcome.unchanged, "allocation committed");
                Ok(CastVoteResponse {
                    success: true,
                    unchanged: outcome.unchanged,
                    message: None,
                })
            }
            Err(LedgerError::Store(e)) => Err(e.into()),
            Err(rejected) => {
                warn!(topic = %topic, person = ?person, reason = %rejected, "allocation rejected");
                Ok(CastVoteResponse {
                    success: false,
                    unchanged: false,
                    message: Some(rejected.to_string()),
                })
            }
        }
    }

    // ── Credential ceremonies ────────────────────────────────────────────

    pub fn begin_registration(
        &self,
        request: &BeginRegistrationRequest,
        now: Timestamp,
    ) -> Result<BeginRegistrationResponse, ServiceError> {
        let person = parse_person(&request.person_hash)?;
        let challenge = self
            .registry
            .begin_registration(person, now)
            .map_err(map_credential_error)?;
        Ok(BeginRegistrationResponse {
            challenge: hex::encode(challenge.challenge),
        })
    }

    pub fn complete_registration(
        &self,
        request: &CompleteRegistrationRequest,
        now: Timestamp,
    ) -> Result<CompleteRegistrationResponse, ServiceError> {
        let person = parse_person(&request.person_hash)?;
        let response = RegistrationResponse {
            credential_id: CredentialId::new(decode_hex(&request.credential_id)?),
            public_key: PublicKey(decode_hex32(&request.public_key)?),
            signature: Signature(decode_hex64(&request.signature)?),
            label: request.label.clone(),
        };
        let credential = self
            .registry
            .complete_registration(person, &response, now)
            .map_err(map_credential_error)?;
        info!(person = ?person, label = %credential.label, "credential bound");
        Ok(CompleteRegistrationResponse {
            credential_id: hex::encode(credential.id.as_bytes()),
            label: credential.label,
        })
    }

    pub fn begin_assertion(&self, now: Timestamp) -> Result<BeginAssertionResponse, ServiceError> {
        let challenge = self
            .registry
            .begin_assertion(now)
            .map_err(map_credential_error)?;
        Ok(BeginAssertionResponse {
            challenge: hex::encode(challenge.challenge),
        })
    }

    pub fn complete_assertion(
        &self,
        request: &CompleteAssertionRequest,
        now: Timestamp,
    ) -> Result<CompleteAssertionResponse, ServiceError> {
        let response = AssertionResponse {
            credential_id: CredentialId::new(decode_hex(&request.credential_id)?),
            challenge: decode_hex32(&request.challenge)?,
            signature: Signature(decode_hex64(&request.signature)?),
            sign_count: request.sign_count,
        };
        let person = self
            .registry
            .complete_assertion(&response, now)
            .map_err(map_credential_error)?;
        info!(person = ?person, "assertion verified");
        Ok(CompleteAssertionResponse {
            person_hash: person.to_string(),
        })
    }

    // ── Device linking ───────────────────────────────────────────────────

    pub fn issue_link_challenge(&self, now: Timestamp) -> Result<IssueLinkResponse, ServiceError> {
        let challenge = self
            .links
            .issue(now)
            .map_err(|e| ServiceError::Store(e.to_string()))?;
        Ok(IssueLinkResponse {
            token: challenge.token.to_string(),
            qr_payload: LinkCoordinator::<S>::qr_payload(&challenge.token),
        })
    }

    /// Redeem a link token on a new device. Of concurrent redeemers,
    /// exactly one receives `ok: true`.
    pub fn redeem_link_challenge(
        &self,
        request: &RedeemLinkRequest,
        now: Timestamp,
    ) -> Result<RedeemLinkResponse, ServiceError> {
        let token = parse_token(&request.token)?;
        match self.links.redeem(&token, now) {
            Ok(()) => Ok(RedeemLinkResponse {
                ok: true,
                error: None,
            }),
            Err(LinkError::Store(e)) => Err(e.into()),
            Err(rejected) => {
                warn!(reason = %rejected, "link redemption rejected");
                Ok(RedeemLinkResponse {
                    ok: false,
                    error: Some(rejected.to_string()),
                })
            }
        }
    }

    /// Re-verify identity for a redeemed link token.
    ///
    /// The full eID round runs inside this call, so the coordinator's
    /// freshness requirement holds by construction: there is no way to
    /// confirm with a stored session.
    pub fn confirm_link_reauth(
        &self,
        request: &ConfirmLinkReauthRequest,
        now: Timestamp,
    ) -> Result<(), ServiceError> {
        let token = parse_token(&request.token)?;
        let (person, is_adult) = self.check_identity(&request.national_id, now)?;
        self.eligibility
            .verify(person, is_adult, now)
            .map_err(|e| match e {
                LedgerError::Underage => ServiceError::Underage,
                other => ServiceError::Store(other.to_string()),
            })?;
        self.links
            .confirm_reauth(&token, person, AssuranceLevel::Eid, now)
            .map_err(|e| match e {
                LinkError::Store(inner) => inner.into(),
                rejected => ServiceError::InvalidRequest(rejected.to_string()),
            })?;
        info!(person = ?person, "link re-verification confirmed");
        Ok(())
    }

    /// Retire a re-verified token and open the registration ceremony for
    /// the new device.
    pub fn begin_link_binding(
        &self,
        token: &str,
        now: Timestamp,
    ) -> Result<BeginLinkBindingResponse, ServiceError> {
        let token = parse_token(token)?;
        let challenge = self
            .links
            .begin_binding(&token, now)
            .map_err(|e| match e {
                LinkError::Store(inner) => inner.into(),
                rejected => ServiceError::InvalidRequest(rejected.to_string()),
            })?;
        Ok(BeginLinkBindingResponse {
            person_hash: challenge.person.to_string(),
            challenge: hex::encode(challenge.challenge),
        })
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn check_identity(
        &self,
        national_id: &str,
        now: Timestamp,
    ) -> Result<(PersonHash, bool), ServiceError> {
        let person = derive_person_hash(&self.pepper, national_id)
            .map_err(|_| ServiceError::IdentifierRejected)?;
        let is_adult = derive_is_adult(national_id, now, self.params.legal_voting_age)
            .map_err(|_| ServiceError::IdentifierRejected)?;
        Ok((person, is_adult))
    }
}

fn parse_person(hex_str: &str) -> Result<PersonHash, ServiceError> {
    PersonHash::from_hex(hex_str)
        .ok_or_else(|| ServiceError::InvalidRequest("malformed person hash".to_string()))
}

fn parse_token(hex_str: &str) -> Result<LinkToken, ServiceError> {
    LinkToken::from_hex(hex_str)
        .ok_or_else(|| ServiceError::InvalidRequest("malformed link token".to_string()))
}

fn decode_hex(s: &str) -> Result<Vec<u8>, ServiceError> {
    hex::decode(s).map_err(|_| ServiceError::InvalidRequest("malformed hex field".to_string()))
}

fn decode_hex32(s: &str) -> Result<[u8; 32], ServiceError> {
    decode_hex(s)?
        .try_into()
        .map_err(|_| ServiceError::InvalidRequest("expected 32 bytes".to_string()))
}

fn decode_hex64(s: &str) -> Result<[u8; 64], ServiceError> {
    decode_hex(s)?
        .try_into()
        .map_err(|_| ServiceError::InvalidRequest("expected 64 bytes".to_string()))
}

fn map_credential_error(e: CredentialError) -> ServiceError {
    match e {
        CredentialError::Store(inner) => inner.into(),
        rejected => ServiceError::InvalidRequest(rejected.to_string()),
    }
}
