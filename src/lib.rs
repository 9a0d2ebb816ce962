//! Lingua Cache - an AI translation server with a content-addressed cache
//!
//! Deduplicates calls to a paid translation provider by keying results on
//! a digest of the normalized (text, source language, target language)
//! triple, and tracks per-caller API usage and rate limits in the same
//! relational store.

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod locale;
pub mod models;
pub mod provider;
pub mod ratelimit;
pub mod stats;
pub mod tasks;
pub mod translate;
pub mod usage;

pub use api::AppState;
pub use config::Config;
pub use db::Db;
pub use tasks::spawn_retention_task;
