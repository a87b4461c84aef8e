//! Conditional encryption of stored values.

use crate::cipher::{AesGcmCipher, Cipher};
use crate::error::CoreResult;

/// Wraps and unwraps stored values through a [`Cipher`].
///
/// Encryption applies only when it is requested *and* the key is non-empty.
/// In every other case the value passes through unchanged, so a missing key
/// degrades to plaintext storage rather than an error.
pub struct ValueCodec {
    cipher: Box<dyn Cipher>,
}

impl ValueCodec {
    /// Creates a codec over the given cipher.
    #[must_use]
    pub fn new(cipher: Box<dyn Cipher>) -> Self {
        Self { cipher }
    }

    /// Returns the cipher name.
    #[must_use]
    pub fn cipher_name(&self) -> &str {
        self.cipher.name()
    }

    /// Prepares `value` for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if encryption was applied and failed.
    pub fn encode(&self, value: &str, key: &str, encrypt: bool) -> CoreResult<String> {
        if applies(key, encrypt) {
            self.cipher.encrypt(value, key)
        } else {
            Ok(value.to_string())
        }
    }

    /// Recovers a value read from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if decryption was applied and the stored value is
    /// not a valid envelope for `key`.
    pub fn decode(&self, stored: &str, key: &str, encrypt: bool) -> CoreResult<String> {
        if applies(key, encrypt) {
            self.cipher.decrypt(stored, key)
        } else {
            Ok(stored.to_string())
        }
    }
}

fn applies(key: &str, encrypt: bool) -> bool {
    encrypt && !key.is_empty()
}

impl Default for ValueCodec {
    fn default() -> Self {
        Self::new(Box::new(AesGcmCipher::new()))
    }
}

impl std::fmt::Debug for ValueCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueCodec")
            .field("cipher", &self.cipher.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use proptest::prelude::*;

    /// Reverses the string and tags it, so tests can see the cipher ran.
    struct MirrorCipher;

    impl Cipher for MirrorCipher {
        fn name(&self) -> &str {
            "mirror"
        }

        fn encrypt(&self, plaintext: &str, password: &str) -> CoreResult<String> {
            Ok(format!("{password}:{}", plaintext.chars().rev().collect::<String>()))
        }

        fn decrypt(&self, ciphertext: &str, password: &str) -> CoreResult<String> {
            ciphertext
                .strip_prefix(&format!("{password}:"))
                .map(|body| body.chars().rev().collect())
                .ok_or_else(|| CoreError::decryption_failed("wrong password"))
        }
    }

    #[test]
    fn encrypt_requested_with_key_uses_cipher() {
        let codec = ValueCodec::new(Box::new(MirrorCipher));
        assert_eq!(codec.encode("abc", "k", true).unwrap(), "k:cba");
        assert_eq!(codec.decode("k:cba", "k", true).unwrap(), "abc");
    }

    #[test]
    fn empty_key_passes_through() {
        let codec = ValueCodec::new(Box::new(MirrorCipher));
        assert_eq!(codec.encode("abc", "", true).unwrap(), "abc");
        assert_eq!(codec.decode("abc", "", true).unwrap(), "abc");
    }

    #[test]
    fn decode_with_wrong_key_fails() {
        let codec = ValueCodec::default();
        let stored = codec.encode("secret", "right", true).unwrap();
        assert!(codec.decode(&stored, "wrong", true).is_err());
    }

    #[test]
    fn default_codec_uses_aes_gcm() {
        assert_eq!(ValueCodec::default().cipher_name(), "aes-256-gcm");
    }

    proptest! {
        #[test]
        fn roundtrip_with_encryption(value in ".*", key in "[a-z0-9-]{1,36}") {
            let codec = ValueCodec::default();
            let stored = codec.encode(&value, &key, true).unwrap();
            prop_assert_eq!(codec.decode(&stored, &key, true).unwrap(), value);
        }

        #[test]
        fn passthrough_without_encryption(value in ".*", key in ".*") {
            let codec = ValueCodec::default();
            prop_assert_eq!(&codec.encode(&value, &key, false).unwrap(), &value);
            prop_assert_eq!(&codec.decode(&value, &key, false).unwrap(), &value);
        }
    }
}
