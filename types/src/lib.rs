//! Fundamental types for the Agora vote ledger.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: pseudonyms, topic and option identifiers, credential keys,
//! timestamps, assurance levels, and ledger parameters.

pub mod credential;
pub mod keys;
pub mod params;
pub mod person;
pub mod state;
pub mod time;
pub mod topic;

pub use credential::{CredentialId, LinkToken};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use params::LedgerParams;
pub use person::PersonHash;
pub use state::AssuranceLevel;
pub use time::Timestamp;
pub use topic::{OptionId, TopicId};
