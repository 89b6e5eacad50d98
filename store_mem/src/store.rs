//! The in-memory store.

use agora_store::{
    AssertionChallenge, AuditEntry, AuditStore, CeremonyStore, CommitAllocation, CommitVote,
    Credential, CredentialStore, CreditStore, Eligibility, EligibilityStore, LinkChallenge,
    LinkPhase, LinkStore, RedeemOutcome, StoreError, Topic, TopicStore, Versioned, VoteRecord,
    VoteStore,
};
use agora_crypto::{blake2b_256, blake2b_256_multi};
use agora_store::{AllocationRecord, TallyDelta};
use agora_types::{CredentialId, LinkToken, OptionId, PersonHash, Timestamp, TopicId};
use std::collections::HashMap;
use std::sync::Mutex;

/// Every table touched by a vote or allocation commit, guarded together.
#[derive(Default)]
struct VoteTables {
    records: HashMap<(TopicId, PersonHash), Versioned<VoteRecord>>,
    allocations: HashMap<(TopicId, PersonHash), Versioned<AllocationRecord>>,
    tallies: HashMap<TopicId, HashMap<OptionId, u64>>,
    credits: HashMap<PersonHash, Versioned<u64>>,
    /// Append-only, bincode-serialized entries.
    audit: Vec<Vec<u8>>,
    /// Chained digest over `audit`: head' = H(head || H(entry)).
    audit_head: [u8; 32],
}

impl VoteTables {
    fn append_audit(&mut self, bytes: Vec<u8>) {
        let digest = blake2b_256(&bytes);
        self.audit_head = blake2b_256_multi(&[&self.audit_head[..], &digest[..]]);
        self.audit.push(bytes);
    }
}

/// An in-memory store implementing every storage trait.
/// Thread-safe; conditional writes hold the relevant lock across both the
/// check and the mutation.
#[derive(Default)]
pub struct MemStore {
    eligibility: Mutex<HashMap<PersonHash, Eligibility>>,
    credentials: Mutex<HashMap<CredentialId, Credential>>,
    topics: Mutex<HashMap<TopicId, Topic>>,
    votes: Mutex<VoteTables>,
    registration_challenges: Mutex<HashMap<PersonHash, agora_store::RegistrationChallenge>>,
    assertion_challenges: Mutex<HashMap<[u8; 32], AssertionChallenge>>,
    links: Mutex<HashMap<LinkToken, LinkChallenge>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EligibilityStore for MemStore {
    fn get_eligibility(&self, person: &PersonHash) -> Result<Option<Eligibility>, StoreError> {
        Ok(self.eligibility.lock().unwrap().get(person).cloned())
    }

    fn put_eligibility(&self, record: &Eligibility) -> Result<(), StoreError> {
        self.eligibility
            .lock()
            .unwrap()
            .insert(record.person, record.clone());
        Ok(())
    }

    fn delete_eligibility(&self, person: &PersonHash) -> Result<(), StoreError> {
        self.eligibility
            .lock()
            .unwrap()
            .remove(person)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(person.to_string()))
    }

    fn eligibility_count(&self) -> Result<u64, StoreError> {
        Ok(self.eligibility.lock().unwrap().len() as u64)
    }
}

impl CredentialStore for MemStore {
    fn bind(&self, credential: &Credential) -> Result<(), StoreError> {
        let mut creds = self.credentials.lock().unwrap();
        if creds.contains_key(&credential.id) {
            return Err(StoreError::AlreadyExists(credential.id.to_string()));
        }
        creds.insert(credential.id.clone(), credential.clone());
        Ok(())
    }

    fn get_credential(&self, id: &CredentialId) -> Result<Option<Credential>, StoreError> {
        Ok(self.credentials.lock().unwrap().get(id).cloned())
    }

    fn credentials_for(&self, person: &PersonHash) -> Result<Vec<Credential>, StoreError> {
        Ok(self
            .credentials
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.owner == *person)
            .cloned()
            .collect())
    }

    fn update_usage(
        &self,
        id: &CredentialId,
        expected_sign_count: u32,
        new_sign_count: u32,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        let mut creds = self.credentials.lock().unwrap();
        let cred = creds
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if cred.sign_count != expected_sign_count {
            return Err(StoreError::Conflict(format!(
                "sign count moved: expected {expected_sign_count}, found {}",
                cred.sign_count
            )));
        }
        cred.sign_count = new_sign_count;
        cred.last_used_at = now;
        Ok(())
    }

    fn revoke(&self, id: &CredentialId, owner: &PersonHash) -> Result<(), StoreError> {
        let mut creds = self.credentials.lock().unwrap();
        match creds.get(id) {
            Some(c) if c.owner == *owner => {
                creds.remove(id);
                Ok(())
            }
            _ => Err(StoreError::NotFound(id.to_string())),
        }
    }
}

impl TopicStore for MemStore {
    fn get_topic(&self, id: &TopicId) -> Result<Option<Topic>, StoreError> {
        Ok(self.topics.lock().unwrap().get(id).cloned())
    }

    fn put_topic(&self, topic: &Topic) -> Result<(), StoreError> {
        self.topics
            .lock()
            .unwrap()
            .insert(topic.id.clone(), topic.clone());
        Ok(())
    }
}

/// Apply tally deltas to a topic's counts. A delta that would drive a
/// count negative is a broken commit, not a user error.
fn apply_deltas(
    tallies: &mut HashMap<TopicId, HashMap<OptionId, u64>>,
    topic: &TopicId,
    deltas: &[TallyDelta],
) -> Result<(), StoreError> {
    let counts = tallies.entry(topic.clone()).or_default();
    // Validate before mutating so a bad batch leaves the tally untouched.
    for d in deltas {
        if d.delta < 0 {
            let current = counts.get(&d.option).copied().unwrap_or(0);
            if current < d.delta.unsigned_abs() {
                return Err(StoreError::Backend(format!(
                    "tally underflow for option {}",
                    d.option
                )));
            }
        }
    }
    for d in deltas {
        let entry = counts.entry(d.option.clone()).or_insert(0);
        if d.delta < 0 {
            *entry -= d.delta.unsigned_abs();
        } else {
            *entry += d.delta as u64;
        }
    }
    Ok(())
}

fn serialize_audit(entry: &AuditEntry) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(entry).map_err(|e| StoreError::Serialization(e.to_string()))
}

impl VoteStore for MemStore {
    fn get_vote(
        &self,
        topic: &TopicId,
        person: &PersonHash,
    ) -> Result<Option<Versioned<VoteRecord>>, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .records
            .get(&(topic.clone(), *person))
            .cloned())
    }

    fn get_allocation(
        &self,
        topic: &TopicId,
        person: &PersonHash,
    ) -> Result<Option<Versioned<AllocationRecord>>, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .allocations
            .get(&(topic.clone(), *person))
            .cloned())
    }

    fn get_tally(&self, topic: &TopicId) -> Result<HashMap<OptionId, u64>, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .tallies
            .get(topic)
            .cloned()
            .unwrap_or_default())
    }

    fn voter_count(&self, topic: &TopicId) -> Result<u64, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .records
            .keys()
            .filter(|(t, _)| t == topic)
            .count() as u64)
    }

    fn commit_vote(&self, commit: CommitVote) -> Result<(), StoreError> {
        let mut tables = self.votes.lock().unwrap();
        let key = (commit.record.topic.clone(), commit.record.person);

        let current_version = tables.records.get(&key).map(|v| v.version);
        if current_version != commit.expected_version {
            return Err(StoreError::Conflict(format!(
                "vote record version moved for topic {}",
                commit.record.topic
            )));
        }

        let audit_bytes = serialize_audit(&commit.audit)?;
        apply_deltas(&mut tables.tallies, &commit.record.topic, &commit.deltas)?;
        let next_version = current_version.unwrap_or(0) + 1;
        tables.records.insert(
            key,
            Versioned {
                value: commit.record,
                version: next_version,
            },
        );
        tables.append_audit(audit_bytes);
        Ok(())
    }

    fn commit_allocation(&self, commit: CommitAllocation) -> Result<(), StoreError> {
        let mut tables = self.votes.lock().unwrap();
        let key = (commit.record.topic.clone(), commit.record.person);

        let current_version = tables.allocations.get(&key).map(|v| v.version);
        if current_version != commit.expected_version {
            return Err(StoreError::Conflict(format!(
                "allocation version moved for topic {}",
                commit.record.topic
            )));
        }

        let credit_version = tables
            .credits
            .get(&commit.credit.person)
            .ok_or_else(|| StoreError::NotFound(commit.credit.person.to_string()))?
            .version;
        if credit_version != commit.credit.expected_version {
            return Err(StoreError::Conflict("credit balance moved".to_string()));
        }

        let mut audit_bytes = Vec::with_capacity(commit.audit.len());
        for entry in &commit.audit {
            audit_bytes.push(serialize_audit(entry)?);
        }
        apply_deltas(&mut tables.tallies, &commit.record.topic, &commit.deltas)?;

        tables.credits.insert(
            commit.credit.person,
            Versioned {
                value: commit.credit.new_balance,
                version: credit_version + 1,
            },
        );
        let next_version = current_version.unwrap_or(0) + 1;
        tables.allocations.insert(
            key,
            Versioned {
                value: commit.record,
                version: next_version,
            },
        );
        for bytes in audit_bytes {
            tables.append_audit(bytes);
        }
        Ok(())
    }
}

impl CreditStore for MemStore {
    fn get_balance(&self, person: &PersonHash) -> Result<Option<Versioned<u64>>, StoreError> {
        Ok(self.votes.lock().unwrap().credits.get(person).cloned())
    }

    fn set_balance(&self, person: &PersonHash, balance: u64) -> Result<(), StoreError> {
        let mut tables = self.votes.lock().unwrap();
        let version = tables.credits.get(person).map(|v| v.version).unwrap_or(0);
        tables.credits.insert(
            *person,
            Versioned {
                value: balance,
                version: version + 1,
            },
        );
        Ok(())
    }
}

impl AuditStore for MemStore {
    fn append(&self, entry: &AuditEntry) -> Result<(), StoreError> {
        let bytes = serialize_audit(entry)?;
        self.votes.lock().unwrap().append_audit(bytes);
        Ok(())
    }

    fn entries_for(
        &self,
        topic: &TopicId,
        person: &PersonHash,
    ) -> Result<Vec<AuditEntry>, StoreError> {
        let tables = self.votes.lock().unwrap();
        let mut out = Vec::new();
        for bytes in &tables.audit {
            let entry: AuditEntry = bincode::deserialize(bytes)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            if entry.topic == *topic && entry.person == *person {
                out.push(entry);
            }
        }
        Ok(out)
    }

    fn entry_count(&self) -> Result<u64, StoreError> {
        Ok(self.votes.lock().unwrap().audit.len() as u64)
    }

    fn audit_head(&self) -> Result<[u8; 32], StoreError> {
        Ok(self.votes.lock().unwrap().audit_head)
    }
}

impl CeremonyStore for MemStore {
    fn put_registration(
        &self,
        challenge: &agora_store::RegistrationChallenge,
    ) -> Result<(), StoreError> {
        self.registration_challenges
            .lock()
            .unwrap()
            .insert(challenge.person, challenge.clone());
        Ok(())
    }

    fn take_registration(
        &self,
        person: &PersonHash,
    ) -> Result<Option<agora_store::RegistrationChallenge>, StoreError> {
        Ok(self.registration_challenges.lock().unwrap().remove(person))
    }

    fn put_assertion(&self, challenge: &AssertionChallenge) -> Result<(), StoreError> {
        self.assertion_challenges
            .lock()
            .unwrap()
            .insert(challenge.challenge, challenge.clone());
        Ok(())
    }

    fn take_assertion(
        &self,
        challenge: &[u8; 32],
    ) -> Result<Option<AssertionChallenge>, StoreError> {
        Ok(self.assertion_challenges.lock().unwrap().remove(challenge))
    }
}

impl LinkStore for MemStore {
    fn put_link(&self, challenge: &LinkChallenge) -> Result<(), StoreError> {
        self.links
            .lock()
            .unwrap()
            .insert(challenge.token, challenge.clone());
        Ok(())
    }

    fn get_link(&self, token: &LinkToken) -> Result<Option<LinkChallenge>, StoreError> {
        Ok(self.links.lock().unwrap().get(token).cloned())
    }

    fn consume(
        &self,
        token: &LinkToken,
        now: Timestamp,
        ttl_secs: u64,
    ) -> Result<RedeemOutcome, StoreError> {
        let mut links = self.links.lock().unwrap();
        let challenge = links
            .get_mut(token)
            .ok_or_else(|| StoreError::NotFound(token.to_string()))?;

        if challenge.phase != LinkPhase::Issued {
            return Ok(RedeemOutcome::AlreadyConsumed);
        }
        if challenge.issued_at.has_expired(ttl_secs, now) {
            return Ok(RedeemOutcome::Expired);
        }
        challenge.phase = LinkPhase::Redeemed;
        challenge.redeemed_at = Some(now);
        Ok(RedeemOutcome::Redeemed)
    }

    fn record_reauth(
        &self,
        token: &LinkToken,
        person: &PersonHash,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        let mut links = self.links.lock().unwrap();
        let challenge = links
            .get_mut(token)
            .ok_or_else(|| StoreError::NotFound(token.to_string()))?;
        if challenge.phase != LinkPhase::Redeemed {
            return Err(StoreError::Conflict(format!(
                "link challenge in phase {:?}",
                challenge.phase
            )));
        }
        challenge.phase = LinkPhase::ReauthVerified;
        challenge.person = Some(*person);
        challenge.reauth_at = Some(now);
        Ok(())
    }

    fn mark_bound(&self, token: &LinkToken) -> Result<(), StoreError> {
        let mut links = self.links.lock().unwrap();
        let challenge = links
            .get_mut(token)
            .ok_or_else(|| StoreError::NotFound(token.to_string()))?;
        if challenge.phase != LinkPhase::ReauthVerified {
            return Err(StoreError::Conflict(format!(
                "link challenge in phase {:?}",
                challenge.phase
            )));
        }
        challenge.phase = LinkPhase::CredentialBound;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::AssuranceLevel;
    use std::sync::Arc;

    fn person(n: u8) -> PersonHash {
        PersonHash::new([n; 32])
    }

    fn topic_id() -> TopicId {
        TopicId::new("t1")
    }

    fn yes() -> OptionId {
        OptionId::new("yes")
    }

    fn no() -> OptionId {
        OptionId::new("no")
    }

    fn audit_entry(p: PersonHash, prev: Option<OptionId>, next: OptionId) -> AuditEntry {
        AuditEntry {
            topic: topic_id(),
            person: p,
            previous: prev,
            next,
            recorded_at: Timestamp::new(1000),
        }
    }

    fn first_vote_commit(p: PersonHash, option: OptionId) -> CommitVote {
        CommitVote {
            expected_version: None,
            record: VoteRecord {
                topic: topic_id(),
                person: p,
                option: option.clone(),
                updated_at: Timestamp::new(1000),
            },
            deltas: vec![TallyDelta { option: option.clone(), delta: 1 }],
            audit: audit_entry(p, None, option),
        }
    }

    #[test]
    fn eligibility_round_trip() {
        let store = MemStore::new();
        let rec = Eligibility {
            person: person(1),
            is_adult: true,
            assurance_level: AssuranceLevel::Eid,
            created_at: Timestamp::new(10),
            first_verified_at: Timestamp::new(10),
            last_verified_at: Timestamp::new(10),
        };
        store.put_eligibility(&rec).unwrap();
        assert_eq!(store.get_eligibility(&person(1)).unwrap(), Some(rec));
        store.delete_eligibility(&person(1)).unwrap();
        assert!(store.get_eligibility(&person(1)).unwrap().is_none());
    }

    #[test]
    fn commit_vote_updates_record_tally_audit() {
        let store = MemStore::new();
        store.commit_vote(first_vote_commit(person(1), yes())).unwrap();

        let tally = store.get_tally(&topic_id()).unwrap();
        assert_eq!(tally.get(&yes()), Some(&1));
        assert_eq!(store.voter_count(&topic_id()).unwrap(), 1);
        assert_eq!(store.entry_count().unwrap(), 1);

        let v = store.get_vote(&topic_id(), &person(1)).unwrap().unwrap();
        assert_eq!(v.version, 1);
        assert_eq!(v.value.option, yes());
    }

    #[test]
    fn commit_vote_stale_version_conflicts() {
        let store = MemStore::new();
        store.commit_vote(first_vote_commit(person(1), yes())).unwrap();

        // A second "first vote" cites version None and must conflict.
        let err = store
            .commit_vote(first_vote_commit(person(1), no()))
            .unwrap_err();
        assert!(err.is_conflict());
        // Nothing moved.
        assert_eq!(store.get_tally(&topic_id()).unwrap().get(&yes()), Some(&1));
        assert_eq!(store.entry_count().unwrap(), 1);
    }

    #[test]
    fn tally_underflow_rejected_without_partial_apply() {
        let store = MemStore::new();
        let mut commit = first_vote_commit(person(1), yes());
        commit.deltas = vec![
            TallyDelta { option: yes(), delta: 1 },
            TallyDelta { option: no(), delta: -1 },
        ];
        let err = store.commit_vote(commit).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
        assert!(store.get_tally(&topic_id()).unwrap().is_empty());
    }

    #[test]
    fn credential_bind_is_insert_if_absent() {
        let store = MemStore::new();
        let cred = Credential {
            id: CredentialId::new(vec![1, 2, 3]),
            owner: person(1),
            public_key: agora_types::PublicKey([5; 32]),
            sign_count: 0,
            created_at: Timestamp::new(1),
            last_used_at: Timestamp::new(1),
            label: "test".into(),
        };
        store.bind(&cred).unwrap();

        let mut stolen = cred.clone();
        stolen.owner = person(2);
        let err = store.bind(&stolen).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
        // Original binding untouched.
        let stored = store.get_credential(&cred.id).unwrap().unwrap();
        assert_eq!(stored.owner, person(1));
    }

    #[test]
    fn update_usage_is_compare_and_set() {
        let store = MemStore::new();
        let cred = Credential {
            id: CredentialId::new(vec![9]),
            owner: person(1),
            public_key: agora_types::PublicKey([5; 32]),
            sign_count: 4,
            created_at: Timestamp::new(1),
            last_used_at: Timestamp::new(1),
            label: "test".into(),
        };
        store.bind(&cred).unwrap();
        store.update_usage(&cred.id, 4, 5, Timestamp::new(2)).unwrap();
        assert!(store
            .update_usage(&cred.id, 4, 6, Timestamp::new(3))
            .unwrap_err()
            .is_conflict());
    }

    #[test]
    fn take_registration_is_single_use() {
        let store = MemStore::new();
        let ch = agora_store::RegistrationChallenge {
            person: person(1),
            challenge: [7; 32],
            excluded: vec![],
            issued_at: Timestamp::new(1),
        };
        store.put_registration(&ch).unwrap();
        assert!(store.take_registration(&person(1)).unwrap().is_some());
        assert!(store.take_registration(&person(1)).unwrap().is_none());
    }

    #[test]
    fn consume_race_has_one_winner() {
        let store = Arc::new(MemStore::new());
        let token = LinkToken::new([3; 32]);
        store
            .put_link(&LinkChallenge {
                token,
                issued_at: Timestamp::new(100),
                phase: LinkPhase::Issued,
                redeemed_at: None,
                reauth_at: None,
                person: None,
            })
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                store.consume(&token, Timestamp::new(150), 180).unwrap()
            }));
        }
        let outcomes: Vec<RedeemOutcome> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        let wins = outcomes
            .iter()
            .filter(|o| **o == RedeemOutcome::Redeemed)
            .count();
        assert_eq!(wins, 1);
        assert!(outcomes
            .iter()
            .all(|o| matches!(o, RedeemOutcome::Redeemed | RedeemOutcome::AlreadyConsumed)));
    }

    #[test]
    fn consume_after_ttl_expires() {
        let store = MemStore::new();
        let token = LinkToken::new([4; 32]);
        store
            .put_link(&LinkChallenge {
                token,
                issued_at: Timestamp::new(100),
                phase: LinkPhase::Issued,
                redeemed_at: None,
                reauth_at: None,
                person: None,
            })
            .unwrap();
        assert_eq!(
            store.consume(&token, Timestamp::new(280), 180).unwrap(),
            RedeemOutcome::Expired
        );
    }

    #[test]
    fn allocation_commit_debits_credits_atomically() {
        let store = MemStore::new();
        store.set_balance(&person(1), 100).unwrap();
        let balance = store.get_balance(&person(1)).unwrap().unwrap();

        let mut votes = std::collections::BTreeMap::new();
        votes.insert(yes(), 5u32);
        let commit = CommitAllocation {
            expected_version: None,
            record: AllocationRecord {
                topic: topic_id(),
                person: person(1),
                votes,
                updated_at: Timestamp::new(1000),
            },
            deltas: vec![TallyDelta { option: yes(), delta: 5 }],
            credit: agora_store::CreditDebit {
                person: person(1),
                expected_version: balance.version,
                new_balance: 75,
            },
            audit: vec![audit_entry(person(1), None, yes())],
        };
        store.commit_allocation(commit).unwrap();
        assert_eq!(store.get_balance(&person(1)).unwrap().unwrap().value, 75);
        assert_eq!(store.get_tally(&topic_id()).unwrap().get(&yes()), Some(&5));

        // Stale credit version conflicts.
        let mut votes = std::collections::BTreeMap::new();
        votes.insert(no(), 2u32);
        let alloc = store.get_allocation(&topic_id(), &person(1)).unwrap().unwrap();
        let stale = CommitAllocation {
            expected_version: Some(alloc.version),
            record: AllocationRecord {
                topic: topic_id(),
                person: person(1),
                votes,
                updated_at: Timestamp::new(1001),
            },
            deltas: vec![TallyDelta { option: no(), delta: 2 }],
            credit: agora_store::CreditDebit {
                person: person(1),
                expected_version: balance.version, // already bumped
                new_balance: 71,
            },
            audit: vec![],
        };
        assert!(store.commit_allocation(stale).unwrap_err().is_conflict());
        assert_eq!(store.get_balance(&person(1)).unwrap().unwrap().value, 75);
    }

    #[test]
    fn audit_entries_filtered_per_pair() {
        let store = MemStore::new();
        store.commit_vote(first_vote_commit(person(1), yes())).unwrap();
        store.commit_vote(first_vote_commit(person(2), no())).unwrap();

        let entries = store.entries_for(&topic_id(), &person(1)).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].next, yes());
    }

    #[test]
    fn audit_head_chains_in_append_order() {
        let store = MemStore::new();
        assert_eq!(store.audit_head().unwrap(), [0u8; 32]);

        store.append(&audit_entry(person(1), None, yes())).unwrap();
        let after_one = store.audit_head().unwrap();
        assert_ne!(after_one, [0u8; 32]);

        store.append(&audit_entry(person(2), None, no())).unwrap();
        let after_two = store.audit_head().unwrap();
        assert_ne!(after_two, after_one);

        // Same entries in the same order give the same head.
        let replay = MemStore::new();
        replay.append(&audit_entry(person(1), None, yes())).unwrap();
        replay.append(&audit_entry(person(2), None, no())).unwrap();
        assert_eq!(replay.audit_head().unwrap(), after_two);

        // A different order gives a different head.
        let reordered = MemStore::new();
        reordered.append(&audit_entry(person(2), None, no())).unwrap();
        reordered.append(&audit_entry(person(1), None, yes())).unwrap();
        assert_ne!(reordered.audit_head().unwrap(), after_two);
    }
}
