//! Request DTOs for the translation server API
//!
//! Defines the structure of incoming HTTP request bodies and query
//! parameters.

use serde::Deserialize;

use crate::cache::MAX_TEXT_LENGTH;
use crate::locale::{self, AUTO};

/// Request body for POST /api/translate
///
/// The caller identity comes from the `x-api-key` header, not the body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    /// Text to translate
    pub text: String,
    /// Source language code, or omitted/"auto" for provider detection
    #[serde(default)]
    pub source_language: Option<String>,
    /// Target language code, must be in the supported set
    pub target_language: String,
}

impl TranslateRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.text.trim().is_empty() {
            return Some("Text cannot be empty".to_string());
        }
        if self.text.chars().count() > MAX_TEXT_LENGTH {
            return Some(format!(
                "Text exceeds maximum length of {MAX_TEXT_LENGTH} characters"
            ));
        }
        if !locale::is_supported(&self.target_language) {
            return Some(format!(
                "Unsupported target language: {}",
                self.target_language
            ));
        }
        if let Some(source) = &self.source_language {
            if source != AUTO && !locale::is_supported(source) {
                return Some(format!("Unsupported source language: {source}"));
            }
        }
        None
    }

    /// Source language to use for cache keys and provider calls.
    pub fn source_language_or_auto(&self) -> &str {
        self.source_language.as_deref().unwrap_or(AUTO)
    }
}

/// Query parameters for GET /api/cache/search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    /// Substring to search for in source and translated text
    pub q: String,
    /// Maximum number of results (default 10, capped at 100)
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Query parameters for DELETE /api/cache
#[derive(Debug, Clone, Deserialize)]
pub struct EvictParams {
    /// Age threshold in days; entries older than this are removed.
    /// Defaults to the configured retention period.
    #[serde(default)]
    pub older_than_days: Option<u32>,
}
