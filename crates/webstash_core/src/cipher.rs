//! Password-based symmetric cipher for stored values.
//!
//! ## Envelope
//!
//! [`AesGcmCipher`] produces standard base64 of
//! `salt (16 bytes) || nonce (12 bytes) || ciphertext || tag (16 bytes)`.
//!
//! - A fresh random salt and nonce are drawn for every value
//! - The 256-bit key is derived from the password and salt with HKDF-SHA256
//! - AES-256-GCM authenticates the value, so a wrong password or a tampered
//!   envelope is reported as an error instead of yielding garbage
//! - Derived keys are zeroized on drop

use crate::error::{CoreError, CoreResult};
use aes_gcm::{
    aead::{generic_array::GenericArray, Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the per-value HKDF salt in bytes.
pub const SALT_SIZE: usize = 16;
/// Size of the AES-256 key in bytes.
pub const KEY_SIZE: usize = 32;
/// Size of the GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;
/// Size of the GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

const HKDF_INFO: &[u8] = b"webstash-value-key-v1";

/// A synchronous string-in/string-out cipher keyed by a password.
pub trait Cipher: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Encrypts `plaintext` under `password`.
    ///
    /// # Errors
    ///
    /// Returns an error if key derivation or encryption fails.
    fn encrypt(&self, plaintext: &str, password: &str) -> CoreResult<String>;

    /// Decrypts a value produced by [`encrypt`](Self::encrypt).
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid envelope, the password
    /// is wrong, or the envelope was modified.
    fn decrypt(&self, ciphertext: &str, password: &str) -> CoreResult<String>;
}

/// Cipher key derived from a password. Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
struct DerivedKey {
    bytes: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// HKDF is appropriate here because the password is normally a random
    /// identifier with high entropy, not a user-chosen phrase.
    fn derive(password: &[u8], salt: &[u8]) -> CoreResult<Self> {
        use hkdf::Hkdf;
        use sha2::Sha256;

        let hk = Hkdf::<Sha256>::new(Some(salt), password);
        let mut bytes = [0u8; KEY_SIZE];
        hk.expand(HKDF_INFO, &mut bytes)
            .map_err(|_| CoreError::key_derivation_failed("HKDF expand failed"))?;
        Ok(Self { bytes })
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(GenericArray::from_slice(&self.bytes))
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// AES-256-GCM with an HKDF-SHA256 password-to-key step.
#[derive(Debug, Default, Clone, Copy)]
pub struct AesGcmCipher;

impl AesGcmCipher {
    /// Creates the cipher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Cipher for AesGcmCipher {
    fn name(&self) -> &str {
        "aes-256-gcm"
    }

    fn encrypt(&self, plaintext: &str, password: &str) -> CoreResult<String> {
        let mut rng = rand::thread_rng();
        let mut salt = [0u8; SALT_SIZE];
        rng.fill_bytes(&mut salt);
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rng.fill_bytes(&mut nonce_bytes);

        let key = DerivedKey::derive(password.as_bytes(), &salt)?;
        let sealed = key
            .cipher()
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
            .map_err(|_| CoreError::encryption_failed("encryption error"))?;

        let mut envelope = Vec::with_capacity(SALT_SIZE + NONCE_SIZE + sealed.len());
        envelope.extend_from_slice(&salt);
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend(sealed);

        Ok(STANDARD.encode(envelope))
    }

    fn decrypt(&self, ciphertext: &str, password: &str) -> CoreResult<String> {
        let envelope = STANDARD
            .decode(ciphertext)
            .map_err(|e| CoreError::invalid_ciphertext(format!("not base64: {e}")))?;
        if envelope.len() < SALT_SIZE + NONCE_SIZE + TAG_SIZE {
            return Err(CoreError::invalid_ciphertext("envelope too short"));
        }

        let (salt, rest) = envelope.split_at(SALT_SIZE);
        let (nonce, sealed) = rest.split_at(NONCE_SIZE);

        let key = DerivedKey::derive(password.as_bytes(), salt)?;
        let plaintext = key
            .cipher()
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| CoreError::decryption_failed("decryption error"))?;

        String::from_utf8(plaintext)
            .map_err(|_| CoreError::decryption_failed("plaintext is not UTF-8"))
    }
}
