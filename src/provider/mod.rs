//! Translation Provider Module
//!
//! Contract with the external translation system: text plus a language
//! pair in, translated text plus token/cost metrics out. The orchestrator
//! only sees the trait, so tests and deployments without an API key can
//! swap in the demo provider.

pub mod demo;
pub mod openai;

use async_trait::async_trait;

use crate::error::Result;

pub use demo::DemoProvider;
pub use openai::OpenAiProvider;

// == Translation ==
/// A successful provider response.
#[derive(Debug, Clone)]
pub struct Translation {
    /// Translated text
    pub translated_text: String,
    /// Total tokens spent on the call
    pub tokens_used: i64,
    /// Cost of the call in cents
    pub cost: i64,
}

// == Provider Trait ==
/// An external translation backend.
///
/// Implementations must bound their work by a timeout; a timed-out call
/// fails like any other provider error.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Provider name recorded on cache entries and responses.
    fn name(&self) -> &str;

    /// Model recorded on cache entries and responses.
    fn model(&self) -> &str;

    /// Translates `text` from `source_language` (or `auto`) into
    /// `target_language`.
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Translation>;
}
