//! Credential registry — binds passkey credentials to pseudonyms through
//! single-use, TTL-bound ceremonies.
//!
//! Two ceremonies exist: registration (attestation) binds a new credential
//! to a known person; assertion (login) identifies a person from a
//! discoverable credential. Both verify Ed25519 signatures over a fresh
//! challenge, and assertion additionally enforces a strictly monotonic
//! signature counter as the credential-cloning tripwire.

pub mod ceremony;
pub mod error;
pub mod registry;

pub use ceremony::{AssertionResponse, RegistrationResponse};
pub use error::CredentialError;
pub use registry::CredentialRegistry;
