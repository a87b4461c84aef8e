//! RFC-4122 version-4 identifiers used as key material.
//!
//! Identifiers are 36 lowercase hex characters in 8-4-4-4-12 groups. The
//! character at index 14 is always `4` and the character at index 19 is one
//! of `8`, `9`, `a`, `b`. Randomness comes from the operating system CSPRNG.

use rand::RngCore;
use uuid::{Builder, Uuid};

/// Length of a full hyphenated identifier.
pub const IDENTIFIER_LEN: usize = 36;

/// Number of hex digits in an identifier once hyphens are stripped.
pub const HEX_DIGITS: usize = 32;

/// Generates a random identifier.
///
/// With `None`, returns the full 36-character hyphenated form. With
/// `Some(n)`, strips the hyphens and keeps the first `n` hex digits
/// (all 32 if `n` is larger).
#[must_use]
pub fn generate_identifier(len: Option<usize>) -> String {
    render(Uuid::new_v4(), len)
}

/// Generates an identifier from the given random source.
///
/// Same layout as [`generate_identifier`]; useful for reproducible output.
#[must_use]
pub fn generate_identifier_with<R: RngCore + ?Sized>(rng: &mut R, len: Option<usize>) -> String {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    render(Builder::from_random_bytes(bytes).into_uuid(), len)
}

fn render(id: Uuid, len: Option<usize>) -> String {
    match len {
        None => id.hyphenated().to_string(),
        Some(n) => {
            let mut simple = id.simple().to_string();
            simple.truncate(n);
            simple
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_layout(id: &str) {
        assert_eq!(id.len(), IDENTIFIER_LEN);
        for (i, c) in id.chars().enumerate() {
            match i {
                8 | 13 | 18 | 23 => assert_eq!(c, '-', "hyphen expected at {i} in {id}"),
                14 => assert_eq!(c, '4', "version marker missing in {id}"),
                19 => assert!(matches!(c, '8' | '9' | 'a' | 'b'), "bad variant in {id}"),
                _ => assert!(matches!(c, '0'..='9' | 'a'..='f'), "bad digit in {id}"),
            }
        }
    }

    #[test]
    fn full_identifier_layout() {
        for _ in 0..64 {
            assert_layout(&generate_identifier(None));
        }
    }

    #[test]
    fn identifiers_differ() {
        assert_ne!(generate_identifier(None), generate_identifier(None));
    }

    #[test]
    fn truncated_identifier_has_no_hyphens() {
        let id = generate_identifier(Some(12));
        assert_eq!(id.len(), 12);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn oversized_length_yields_all_digits() {
        assert_eq!(generate_identifier(Some(100)).len(), HEX_DIGITS);
    }

    #[test]
    fn zero_length_is_empty() {
        assert!(generate_identifier(Some(0)).is_empty());
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate_identifier_with(&mut StdRng::seed_from_u64(7), None);
        let b = generate_identifier_with(&mut StdRng::seed_from_u64(7), None);
        assert_eq!(a, b);
        assert_layout(&a);
    }

    proptest! {
        #[test]
        fn any_seed_yields_valid_layout(seed in any::<u64>()) {
            let id = generate_identifier_with(&mut StdRng::seed_from_u64(seed), None);
            assert_layout(&id);
        }

        #[test]
        fn truncation_yields_exact_hex(seed in any::<u64>(), n in 0usize..=HEX_DIGITS) {
            let id = generate_identifier_with(&mut StdRng::seed_from_u64(seed), Some(n));
            prop_assert_eq!(id.len(), n);
            prop_assert!(id.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        }
    }
}
