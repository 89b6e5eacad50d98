//! Cryptographic primitives for the Agora ledger.
//!
//! Peppered HMAC-SHA256 for pseudonym derivation, Ed25519 for credential
//! ceremonies, Blake2b for token digests, and OS-RNG token generation.

pub mod hash;
pub mod keys;
pub mod pepper;
pub mod random;
pub mod sign;

pub use hash::{blake2b_256, blake2b_256_multi, person_hash};
pub use keys::{generate_keypair, keypair_from_seed};
pub use pepper::Pepper;
pub use random::random_token_32;
pub use sign::{sign_message, verify_signature};
