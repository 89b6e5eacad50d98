//! Credential and link-token identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::person::hex;

/// Opaque, globally unique identifier of a bound authentication credential.
///
/// The authenticator chooses the identifier during the registration
/// ceremony; the registry only guarantees it is never rebound to a
/// different person.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CredentialId(Vec<u8>);

impl CredentialId {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CredentialId({})", hex::encode(&self.0))
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

/// Single-use token mediating a cross-device linking attempt.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkToken([u8; 32]);

impl LinkToken {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse from the lowercase-hex form used in QR payloads.
    pub fn from_hex(s: &str) -> Option<Self> {
        if s.len() != 64 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
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

impl fmt::Debug for LinkToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LinkToken({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for LinkToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_token_hex_round_trip() {
        let t = LinkToken::new([7u8; 32]);
        let parsed = LinkToken::from_hex(&t.to_string()).unwrap();
        assert_eq!(t, parsed);
    }

    #[test]
    fn link_token_rejects_bad_hex() {
        assert!(LinkToken::from_hex("zz").is_none());
        assert!(LinkToken::from_hex(&"0".repeat(63)).is_none());
        assert!(LinkToken::from_hex(&"g".repeat(64)).is_none());
    }
}
