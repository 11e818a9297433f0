//! Anonymous sealed-box encryption of secret values.
//!
//! Implements the libsodium `crypto_box_seal` construction the secret store
//! requires: an ephemeral X25519 key pair is generated per call, a shared
//! secret is derived against the recipient's public key, and the ephemeral
//! public key is prepended to the authenticated ciphertext. Only the holder
//! of the recipient's private key can open the result; the sender cannot.

use crypto_box::{PublicKey, KEY_SIZE};
use rand::rngs::OsRng;
use tracing::trace;

use crate::error::{Result, SealError};

/// Length of the ephemeral X25519 public key prepended to the ciphertext.
pub const EPHEMERAL_KEY_LEN: usize = KEY_SIZE;

/// Length of the Poly1305 authentication tag.
pub const TAG_LEN: usize = 16;

/// Fixed ciphertext overhead: ephemeral key plus authentication tag.
pub const SEAL_OVERHEAD: usize = EPHEMERAL_KEY_LEN + TAG_LEN;

/// Seal a plaintext under a recipient public key.
///
/// Fresh randomness is drawn per call, so sealing the same input twice
/// produces different ciphertexts. Output length is always
/// `plaintext.len() + SEAL_OVERHEAD`. The caller is responsible for
/// base64-encoding the result before putting it on the wire.
///
/// # Arguments
///
/// * `plaintext` - The raw value to encrypt
/// * `recipient_key` - The recipient's X25519 public key (32 bytes)
///
/// # Errors
///
/// Returns `SealError::InvalidKeyLength` if the key is not exactly 32
/// bytes, or `SealError::Sealing` if the primitive itself fails.
pub fn seal(plaintext: &[u8], recipient_key: &[u8]) -> Result<Vec<u8>> {
    let key_bytes: [u8; KEY_SIZE] =
        recipient_key
            .try_into()
            .map_err(|_| SealError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: recipient_key.len(),
            })?;
    let public_key = PublicKey::from(key_bytes);

    trace!(plaintext_len = plaintext.len(), "sealing");

    let sealed = crypto_box::seal(&mut OsRng, &public_key, plaintext)
        .map_err(|e| SealError::Sealing(format!("{}", e)))?;

    trace!(ciphertext_len = sealed.len(), "sealed");

    Ok(sealed)
}
