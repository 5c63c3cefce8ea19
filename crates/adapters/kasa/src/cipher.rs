//! XOR autokey cipher used by the outlet's local protocol.
//!
//! Each byte is XORed with the previous ciphertext byte, starting from a
//! fixed key.

const INITIAL_KEY: u8 = 171;

/// Scramble `plain`.
#[must_use]
pub fn encrypt(plain: &[u8]) -> Vec<u8> {
    let mut key = INITIAL_KEY;
    plain
        .iter()
        .map(|byte| {
            key ^= byte;
            key
        })
        .collect()
}

/// Unscramble `cipher`.
#[must_use]
pub fn decrypt(cipher: &[u8]) -> Vec<u8> {
    let mut key = INITIAL_KEY;
    cipher
        .iter()
        .map(|&byte| {
            let plain = key ^ byte;
            key = byte;
            plain
        })
        .collect()
}
