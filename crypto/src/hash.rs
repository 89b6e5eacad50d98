//! Keyed and unkeyed hashing.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::pepper::Pepper;

type Blake2b256 = Blake2b<U32>;
type HmacSha256 = Hmac<Sha256>;

/// Derive the 32-byte pseudonym hash of a national identifier.
///
/// HMAC-SHA256 keyed with the server pepper. Deterministic for a given
/// pepper; irreversible without it. The caller is responsible for
/// validating the identifier first — this function hashes whatever
/// normalized string it is given.
pub fn person_hash(pepper: &Pepper, national_id: &str) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(pepper.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(national_id.as_bytes());
    let result = mac.finalize().into_bytes();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}
