//! Rate limiting for the public submission endpoint.
//!
//! Disabled by default (limit 0): submission concurrency is otherwise
//! bounded only by the storage engine's native row-insert atomicity. When an
//! operator opts in, a single shared governor limiter caps accepted
//! submissions per minute across all callers.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovRateLimiter,
};
use serde_json::json;
use std::num::NonZeroU32;

type SubmissionLimiter = GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Shared limiter state for public submissions.
pub struct RateLimiterState {
    limiter: SubmissionLimiter,
    rate_limit_per_minute: u32,
}

impl RateLimiterState {
    /// Create a limiter allowing the given number of submissions per minute.
    pub fn new(rate_limit_per_minute: u32) -> Self {
        let quota = Quota::per_minute(
            NonZeroU32::new(rate_limit_per_minute).unwrap_or(NonZeroU32::new(100).unwrap()),
        );
        Self {
            limiter: GovRateLimiter::direct(quota),
            rate_limit_per_minute,
        }
    }

    /// Check whether another submission is allowed right now.
    /// Returns Err with retry-after seconds when rate limited.
    pub fn check(&self) -> Result<(), u64> {
        match self.limiter.check() {
            Ok(_) => Ok(()),
            Err(not_until) => {
                let wait_time = not_until.wait_time_from(governor::clock::Clock::now(
                    &governor::clock::DefaultClock::default(),
                ));
                Err(wait_time.as_secs().max(1))
            }
        }
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}

/// Middleware that applies the submission rate limit when configured.
pub async fn submission_rate_limit(
    State(state): State<crate::app::AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(ref rate_limiter) = state.rate_limiter {
        if let Err(retry_after) = rate_limiter.check() {
            return rate_limited_response(retry_after);
        }
    }

    next.run(req).await
}

fn rate_limited_response(retry_after: u64) -> Response {
    let body = json!({
        "error": "rate_limit_exceeded",
        "message": "Too many submissions. Please try again later."
    });

    (
        StatusCode::TOO_MANY_REQUESTS,
        [(header::RETRY_AFTER, retry_after.to_string())],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limiter_allows_within_quota() {
        let state = RateLimiterState::new(10);
        for _ in 0..10 {
            assert!(state.check().is_ok());
        }
    }

    #[test]
    fn test_limiter_blocks_beyond_quota() {
        let state = RateLimiterState::new(2);
        assert!(state.check().is_ok());
        assert!(state.check().is_ok());
        let retry_after = state.check().unwrap_err();
        assert!(retry_after >= 1);
    }

    #[test]
    fn test_rate_limited_response_status() {
        let response = rate_limited_response(30);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "30");
    }
}
