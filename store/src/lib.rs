//! Abstract storage traits for the Agora vote ledger.
//!
//! Every storage backend (in-memory, or a transactional database in a
//! multi-instance deployment) implements these traits. The rest of the
//! codebase depends only on the traits.
//!
//! The conditional operations (`commit_vote`, `commit_allocation`,
//! `consume`, `update_usage`) are the concurrency contract: a backend must
//! make their check-and-apply a single atomic step, because the ledger's
//! correctness rests on them — not on in-process locks.

pub mod audit;
pub mod ceremony;
pub mod credential;
pub mod credits;
pub mod eligibility;
pub mod error;
pub mod link;
pub mod topic;
pub mod vote;

pub use audit::{AuditEntry, AuditStore};
pub use ceremony::{AssertionChallenge, CeremonyStore, RegistrationChallenge};
pub use credential::{Credential, CredentialStore};
pub use credits::CreditStore;
pub use eligibility::{Eligibility, EligibilityStore};
pub use error::StoreError;
pub use link::{LinkChallenge, LinkPhase, LinkStore, RedeemOutcome};
pub use topic::{Topic, TopicStore};
pub use vote::{
    AllocationRecord, CommitAllocation, CommitVote, CreditDebit, TallyDelta, Versioned,
    VoteRecord, VoteStore,
};
