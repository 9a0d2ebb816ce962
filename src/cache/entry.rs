//! Cache entry records.
//!
//! Entries are immutable once written; there is no update path.

use serde::Serialize;

// == Cache Entry ==
/// A stored translation, as read back from the cache table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// Row identifier, generated on insert
    pub id: i64,
    /// Language the text was translated from
    pub source_language: String,
    /// Language the text was translated to
    pub target_language: String,
    /// Original text as submitted, stored verbatim for display and audit
    pub source_text: String,
    /// Provider output
    pub translated_text: String,
    /// Digest of the normalized (text, source, target) triple
    pub source_hash: String,
    /// External system that produced the translation
    pub provider: String,
    /// Model used by the provider, when reported
    pub model: Option<String>,
    /// Provider-reported token count
    pub tokens_used: Option<i64>,
    /// Provider-reported cost in cents
    pub cost: Option<i64>,
    /// Insertion timestamp, RFC 3339
    pub created_at: String,
}

// == New Cache Entry ==
/// Fields for inserting a translation into the cache.
///
/// The content hash and timestamp are computed at insert time.
#[derive(Debug, Clone)]
pub struct NewCacheEntry {
    pub source_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub provider: String,
    pub model: Option<String>,
    pub tokens_used: Option<i64>,
    pub cost: Option<i64>,
}
