//! Random token generation for ceremonies and link challenges.

use rand::RngCore;

/// 32 bytes from the OS RNG.
pub fn random_token_32() -> [u8; 32] {
    let mut out = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut out);
    out
}
