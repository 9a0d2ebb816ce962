//! Property-Based Tests for the Content Hash
//!
//! Uses proptest to verify the normalization and distinctness properties
//! of the cache key function.

use proptest::prelude::*;

use crate::cache::text_hash;

// == Strategies ==
/// Generates arbitrary printable text including surrounding whitespace
fn text_strategy() -> impl Strategy<Value = String> {
    "[ ]{0,3}[a-zA-Z0-9 ,.!?]{1,128}[ ]{0,3}"
}

/// Generates lowercase two-letter language codes
fn lang_strategy() -> impl Strategy<Value = String> {
    "[a-z]{2}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For all text/locale pairs, hashing is idempotent under the
    // normalization itself: hash(text) == hash(lowercase(trim(text))).
    #[test]
    fn prop_hash_normalization_idempotent(
        text in text_strategy(),
        src in lang_strategy(),
        tgt in lang_strategy(),
    ) {
        let direct = text_hash(&text, &src, &tgt);
        let normalized = text_hash(text.to_lowercase().trim(), &src, &tgt);
        prop_assert_eq!(direct, normalized);
    }

    // Hashing is deterministic.
    #[test]
    fn prop_hash_deterministic(
        text in text_strategy(),
        src in lang_strategy(),
        tgt in lang_strategy(),
    ) {
        prop_assert_eq!(text_hash(&text, &src, &tgt), text_hash(&text, &src, &tgt));
    }

    // Different target languages never collide for the same text.
    #[test]
    fn prop_hash_distinct_targets(
        text in text_strategy(),
        src in lang_strategy(),
        tgt_a in lang_strategy(),
        tgt_b in lang_strategy(),
    ) {
        prop_assume!(tgt_a != tgt_b);
        prop_assert_ne!(text_hash(&text, &src, &tgt_a), text_hash(&text, &src, &tgt_b));
    }

    // Output is always 64 lowercase hex characters.
    #[test]
    fn prop_hash_hex_format(
        text in text_strategy(),
        src in lang_strategy(),
        tgt in lang_strategy(),
    ) {
        let hash = text_hash(&text, &src, &tgt);
        prop_assert_eq!(hash.len(), 64);
        prop_assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
