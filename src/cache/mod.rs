//! Translation Cache Module
//!
//! Content-addressed cache over the relational store. Translation
//! results are keyed by a digest of the normalized (text, source
//! language, target language) triple so identical requests reuse the
//! same provider output.

pub mod entry;
pub mod hash;
pub mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheEntry, NewCacheEntry};
pub use hash::text_hash;

// == Public Constants ==
/// Maximum allowed source text length in characters
pub const MAX_TEXT_LENGTH: usize = 10_000;
