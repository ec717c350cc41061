//! Fixed-window rate limiting middleware.
//!
//! One counter per client key, reset at window boundaries. The store is
//! behind a trait so a shared external store can substitute for the
//! process-local map in multi-instance deployments.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::RateLimitConfig;
use crate::http::error::ApiError;
use crate::observability::metrics;

/// Bucket shared by every client whose address cannot be determined.
const FALLBACK_CLIENT_KEY: &str = "unknown";

/// Per-key fixed-window counter state.
#[derive(Debug, Clone)]
struct RateLimitRecord {
    count: u32,
    window_reset_at: Instant,
}

/// Abstract fixed-window counter store.
pub trait RateLimitStore: Send + Sync {
    /// Apply the fixed-window algorithm for `key`: create or reset the
    /// record when the window has lapsed, increment below the limit, deny
    /// at the limit without incrementing. Returns true when allowed.
    fn hit(&self, key: &str, limit: u32, window: Duration) -> bool;
}

/// Process-local store: one record per client key.
///
/// Records are never evicted; state is volatile and per-process. This is
/// advisory throttling, not a security boundary.
pub struct MemoryStore {
    records: Mutex<HashMap<String, RateLimitRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Fixed-window check at an explicit point in time.
    fn hit_at(&self, key: &str, limit: u32, window: Duration, now: Instant) -> bool {
        let mut records = self.records.lock().expect("rate limiter mutex poisoned");
        let record = records
            .entry(key.to_string())
            .or_insert_with(|| RateLimitRecord {
                count: 0,
                window_reset_at: now + window,
            });

        if now >= record.window_reset_at {
            record.count = 1;
            record.window_reset_at = now + window;
            return true;
        }

        if record.count < limit {
            record.count += 1;
            true
        } else {
            false
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimitStore for MemoryStore {
    fn hit(&self, key: &str, limit: u32, window: Duration) -> bool {
        self.hit_at(key, limit, window, Instant::now())
    }
}

/// Fixed-window rate limiter owned by the service instance.
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a limiter backed by the process-local store.
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// Create a limiter over an injected store.
    pub fn with_store(config: RateLimitConfig, store: Arc<dyn RateLimitStore>) -> Self {
        Self { store, config }
    }

    /// Check (and count) a request for the given client key.
    pub fn check(&self, key: &str) -> bool {
        if !self.config.enabled {
            return true;
        }
        self.store.hit(
            key,
            self.config.max_requests,
            Duration::from_secs(self.config.window_secs),
        )
    }
}

/// Derive the client key for rate limiting.
///
/// Prefers the first entry of a proxy-supplied `x-forwarded-for`, then the
/// transport peer address, then a shared fallback bucket.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(first) = value.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }
    }

    match peer {
        Some(addr) => addr.ip().to_string(),
        None => FALLBACK_CLIENT_KEY.to_string(),
    }
}

/// Middleware applying the fixed-window limiter to every API request.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let key = client_key(request.headers(), peer);

    if limiter.check(&key) {
        next.run(request).await
    } else {
        tracing::warn!(client = %key, "Rate limit exceeded");
        metrics::record_rate_limited();
        ApiError::RateLimited.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn test_eleventh_request_in_window_denied() {
        let store = MemoryStore::new();
        let start = Instant::now();

        for i in 0..10 {
            assert!(
                store.hit_at("1.2.3.4", 10, WINDOW, start + Duration::from_secs(i)),
                "request {} should be allowed",
                i + 1
            );
        }
        assert!(!store.hit_at("1.2.3.4", 10, WINDOW, start + Duration::from_secs(30)));
        // denial does not consume the slot for later windows
        assert!(!store.hit_at("1.2.3.4", 10, WINDOW, start + Duration::from_secs(59)));
    }

    #[test]
    fn test_window_expiry_resets_count() {
        let store = MemoryStore::new();
        let start = Instant::now();

        for _ in 0..10 {
            assert!(store.hit_at("k", 10, WINDOW, start));
        }
        assert!(!store.hit_at("k", 10, WINDOW, start + Duration::from_secs(59)));

        // first request past the window starts a fresh count of 1
        assert!(store.hit_at("k", 10, WINDOW, start + Duration::from_secs(61)));
        let records = store.records.lock().unwrap();
        assert_eq!(records.get("k").unwrap().count, 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let store = MemoryStore::new();
        let now = Instant::now();

        for _ in 0..10 {
            assert!(store.hit_at("a", 10, WINDOW, now));
        }
        assert!(!store.hit_at("a", 10, WINDOW, now));
        assert!(store.hit_at("b", 10, WINDOW, now));
    }

    #[test]
    fn test_disabled_limiter_always_allows() {
        let limiter = RateLimiter::new(RateLimitConfig {
            enabled: false,
            max_requests: 1,
            window_secs: 60,
        });
        assert!(limiter.check("k"));
        assert!(limiter.check("k"));
        assert!(limiter.check("k"));
    }

    #[test]
    fn test_client_key_prefers_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());
        let peer: SocketAddr = "127.0.0.1:9999".parse().unwrap();

        assert_eq!(client_key(&headers, Some(peer)), "203.0.113.9");
        assert_eq!(client_key(&HeaderMap::new(), Some(peer)), "127.0.0.1");
        assert_eq!(client_key(&HeaderMap::new(), None), FALLBACK_CLIENT_KEY);
    }
}
