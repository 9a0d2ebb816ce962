//! Translation Orchestrator
//!
//! Composes the validator, rate limiter, cache store, provider and usage
//! recorder into one request flow: validate, rate-limit, look up the
//! cache, call the provider on a miss, store the result, record usage.
//!
//! Storage failures degrade rather than fail the request wherever the
//! policy allows: a lookup failure becomes a forced miss, an insert
//! failure loses only the cache write, and usage-recording failures are
//! always swallowed.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::cache::NewCacheEntry;
use crate::config::Config;
use crate::db::Db;
use crate::error::{ApiError, Result};
use crate::models::{TranslateRequest, TranslateResponse};
use crate::provider::TranslationProvider;
use crate::usage::NewUsageRecord;

/// Endpoint path recorded for translation requests.
pub const TRANSLATE_ENDPOINT: &str = "/api/translate";

// == Caller ==
/// Identity and request metadata of the caller, taken from headers.
#[derive(Debug, Clone)]
pub struct Caller {
    /// API key presented in `x-api-key`; the rate-limit and usage scope
    pub api_key: String,
    /// Forwarded client address, for audit only
    pub ip_address: Option<String>,
    /// Client user agent
    pub user_agent: Option<String>,
}

// == Orchestrator ==
/// Handles one translation request end to end.
pub async fn handle_translation(
    db: &Db,
    provider: &dyn TranslationProvider,
    config: &Config,
    caller: &Caller,
    request: &TranslateRequest,
) -> Result<TranslateResponse> {
    // 1. Validate input; terminal, returned immediately
    if let Some(message) = request.validate() {
        return Err(ApiError::InvalidRequest(message));
    }

    let source_language = request.source_language_or_auto();

    // 2. Rate limit per caller identity. Quota exceedance is terminal;
    //    a broken limiter store fails open so translation stays available.
    match db
        .check_rate_limit(
            &caller.api_key,
            TRANSLATE_ENDPOINT,
            config.rate_limit_max_requests,
            config.rate_limit_window_secs,
        )
        .await
    {
        Ok(()) => {}
        Err(limited @ ApiError::RateLimited { .. }) => return Err(limited),
        Err(e) => warn!(error = %e, "rate limiter unavailable, failing open"),
    }

    let started = Instant::now();

    // 3. Cache lookup; a storage failure degrades to a forced miss
    let cached = match db
        .lookup_translation(&request.text, source_language, &request.target_language)
        .await
    {
        Ok(entry) => entry,
        Err(e) => {
            warn!(error = %e, "cache lookup failed, treating as miss");
            None
        }
    };

    if let Some(entry) = cached {
        debug!(hash = %entry.source_hash, "cache hit");
        record_usage(
            db,
            caller,
            200,
            started.elapsed().as_millis() as i64,
            None,
            None,
        )
        .await;
        return Ok(TranslateResponse::from_cache(entry));
    }

    // 4. Miss: call the external provider (timeout-bounded by the provider)
    let translation = match provider
        .translate(&request.text, source_language, &request.target_language)
        .await
    {
        Ok(translation) => translation,
        Err(e) => {
            // 6. Failed calls are never cached but still show up in usage
            record_usage(
                db,
                caller,
                502,
                started.elapsed().as_millis() as i64,
                None,
                None,
            )
            .await;
            return Err(e);
        }
    };

    // 5. Store the result; losing the cache write must not lose the response
    let entry = NewCacheEntry {
        source_text: request.text.clone(),
        translated_text: translation.translated_text.clone(),
        source_language: source_language.to_string(),
        target_language: request.target_language.clone(),
        provider: provider.name().to_string(),
        model: Some(provider.model().to_string()),
        tokens_used: Some(translation.tokens_used),
        cost: Some(translation.cost),
    };
    if let Err(e) = db.insert_translation(entry).await {
        warn!(error = %e, "failed to cache translation");
    }

    info!(
        target_language = %request.target_language,
        tokens = translation.tokens_used,
        cost_cents = translation.cost,
        "translated via provider"
    );

    record_usage(
        db,
        caller,
        200,
        started.elapsed().as_millis() as i64,
        Some(translation.tokens_used),
        Some(translation.cost),
    )
    .await;

    Ok(TranslateResponse::from_provider(
        translation,
        source_language.to_string(),
        request.target_language.clone(),
        provider.name().to_string(),
        provider.model().to_string(),
    ))
}

/// Best-effort usage append; failures are logged and swallowed.
async fn record_usage(
    db: &Db,
    caller: &Caller,
    status_code: u16,
    response_time_ms: i64,
    tokens_used: Option<i64>,
    cost: Option<i64>,
) {
    let record = NewUsageRecord {
        api_key: Some(caller.api_key.clone()),
        user_id: None,
        endpoint: TRANSLATE_ENDPOINT.to_string(),
        method: "POST".to_string(),
        status_code,
        response_time_ms: Some(response_time_ms),
        tokens_used,
        cost,
        ip_address: caller.ip_address.clone(),
        user_agent: caller.user_agent.clone(),
    };

    if let Err(e) = db.record_usage(record).await {
        warn!(error = %e, "failed to record API usage");
    }
}
