//! Supported locales and display names.
//!
//! Language codes are validated against this set before any cache or
//! provider work happens. Display names are used when building the
//! provider prompt.

/// Language codes the service accepts as source or target.
pub const SUPPORTED_LOCALES: &[&str] = &[
    "en", "fr", "es", "de", "it", "pt", "ja", "ko", "zh", "ar",
];

/// Sentinel source language meaning "let the provider detect it".
pub const AUTO: &str = "auto";

/// Returns true if the given code is a supported locale.
pub fn is_supported(code: &str) -> bool {
    SUPPORTED_LOCALES.contains(&code)
}

/// English display name for a locale, used in provider prompts.
///
/// Falls back to the raw code for anything outside the supported set.
pub fn language_name(code: &str) -> &str {
    match code {
        "en" => "English",
        "fr" => "French",
        "es" => "Spanish",
        "de" => "German",
        "it" => "Italian",
        "pt" => "Portuguese",
        "ja" => "Japanese",
        "ko" => "Korean",
        "zh" => "Chinese (Simplified)",
        "ar" => "Arabic",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_locales() {
        assert!(is_supported("en"));
        assert!(is_supported("fr"));
        assert!(is_supported("ar"));
        assert!(!is_supported("xx"));
        assert!(!is_supported("EN"));
        assert!(!is_supported(""));
    }

    #[test]
    fn test_language_names() {
        assert_eq!(language_name("fr"), "French");
        assert_eq!(language_name("zh"), "Chinese (Simplified)");
        assert_eq!(language_name("xx"), "xx");
    }

    #[test]
    fn test_auto_is_not_a_locale() {
        assert!(!is_supported(AUTO));
    }
}
