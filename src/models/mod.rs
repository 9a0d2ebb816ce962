//! Request and Response models for the translation server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{EvictParams, SearchParams, TranslateRequest};
pub use responses::{
    EvictResponse, HealthResponse, SearchResponse, StatsResponse, TranslateResponse,
};
