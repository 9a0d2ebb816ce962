//! Content-addressed cache key generation.
//!
//! Normalization is deliberately narrow: the text is lower-cased and
//! trimmed, language codes participate verbatim. Internal whitespace,
//! punctuation and language-code casing are not normalized.

use sha2::{Digest, Sha256};

/// Computes the content key for a (text, source language, target language)
/// triple.
///
/// Two requests differing only in text case or surrounding whitespace hash
/// identically; any difference in the language pair produces a distinct key.
pub fn text_hash(text: &str, source_language: &str, target_language: &str) -> String {
    let content = format!(
        "{}:{}:{}",
        text.to_lowercase().trim(),
        source_language,
        target_language
    );
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_stability() {
        let hash1 = text_hash("Hello, world!", "en", "fr");
        let hash2 = text_hash("Hello, world!", "en", "fr");
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_hash_normalizes_case_and_whitespace() {
        let base = text_hash("Hello, world!", "en", "fr");
        assert_eq!(text_hash("  Hello, World!  ", "en", "fr"), base);
        assert_eq!(text_hash("HELLO, WORLD!", "en", "fr"), base);
    }

    #[test]
    fn test_hash_different_target_language() {
        let fr = text_hash("Hello", "en", "fr");
        let de = text_hash("Hello", "en", "de");
        assert_ne!(fr, de);
    }

    #[test]
    fn test_hash_different_source_language() {
        let en = text_hash("chat", "en", "es");
        let fr = text_hash("chat", "fr", "es");
        assert_ne!(en, fr);
    }

    #[test]
    fn test_internal_whitespace_not_normalized() {
        assert_ne!(
            text_hash("hello world", "en", "fr"),
            text_hash("hello  world", "en", "fr")
        );
    }

    #[test]
    fn test_hash_format() {
        let hash = text_hash("Hello", "en", "fr");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
