//! The server-held pepper secret for pseudonym derivation.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A 32-byte server secret mixed into every pseudonym derivation.
///
/// Without the pepper, a `PersonHash` cannot be brute-forced from the
/// enumerable national-identifier space. The type does not implement
/// `Debug`, `Clone`, or `Serialize`, and zeroizes on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Pepper([u8; 32]);

impl Pepper {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}
