//! The irreversible pseudonym derived from a verified national identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte peppered hash of a national identifier.
///
/// This is the sole cross-record join key in the system. The raw identifier
/// it was derived from is never stored and must never appear in logs or
/// error messages; `Debug` prints only a four-byte prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonHash([u8; 32]);

impl PersonHash {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse from the lowercase-hex form used at the wire boundary.
    pub fn from_hex(s: &str) -> Option<Self> {
        if s.len() != 64 {
            return None;
        }
        let mut out = [0u8; 32];
        for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
            let hi = (chunk[0] as char).to_digit(16)?;
            let lo = (chunk[1] as char).to_digit(16)?;
            out[i] = ((hi << 4) | lo) as u8;
        }
        Some(Self(out))
    }
}

impl fmt::Debug for PersonHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PersonHash({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for PersonHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

// Inline hex encoding to avoid adding the `hex` crate as a dependency of types.
pub(crate) mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_full_hex() {
        let h = PersonHash::new([0xab; 32]);
        assert_eq!(h.to_string().len(), 64);
        assert!(h.to_string().starts_with("abab"));
    }

    #[test]
    fn debug_is_truncated() {
        let h = PersonHash::new([0xcd; 32]);
        assert_eq!(format!("{:?}", h), "PersonHash(cdcdcdcd)");
    }
}
