//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Built-in host suffix allowlist, used when nothing is configured.
pub const DEFAULT_ALLOWED_SUFFIXES: &str = "supabase.co,neon.tech";

/// Root configuration for the schema provisioning service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address, body limits).
    pub listener: ListenerConfig,

    /// Connection-string host allowlist.
    pub allowlist: AllowlistConfig,

    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Host allowlist configuration.
///
/// A target database host is permitted iff it ends with one of these
/// suffixes (case-insensitive). Empty entries are rejected by validation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AllowlistConfig {
    /// Permitted host suffixes.
    pub suffixes: Vec<String>,
}

impl Default for AllowlistConfig {
    fn default() -> Self {
        Self {
            suffixes: parse_suffix_list(DEFAULT_ALLOWED_SUFFIXES),
        }
    }
}

impl AllowlistConfig {
    /// Build an allowlist from a comma-separated suffix string.
    ///
    /// Blank segments are dropped; an all-blank input falls back to the
    /// built-in default list.
    pub fn from_suffix_list(raw: &str) -> Self {
        let suffixes = parse_suffix_list(raw);
        if suffixes.is_empty() {
            Self::default()
        } else {
            Self { suffixes }
        }
    }
}

fn parse_suffix_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Rate limiting configuration (fixed window).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting.
    pub enabled: bool,

    /// Maximum accepted requests per client key per window.
    pub max_requests: u32,

    /// Window length in seconds.
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 10,
            window_secs: 60,
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Database connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            request_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.rate_limit.window_secs, 60);
        assert!(config.rate_limit.enabled);
        assert_eq!(
            config.allowlist.suffixes,
            vec!["supabase.co".to_string(), "neon.tech".to_string()]
        );
    }

    #[test]
    fn test_suffix_list_parsing() {
        let allowlist = AllowlistConfig::from_suffix_list(" Supabase.co, ,NEON.tech ,");
        assert_eq!(allowlist.suffixes, vec!["supabase.co", "neon.tech"]);

        // all-blank input falls back to the default list
        let allowlist = AllowlistConfig::from_suffix_list(" , ");
        assert_eq!(allowlist.suffixes, AllowlistConfig::default().suffixes);
    }

    #[test]
    fn test_minimal_toml() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");

        let config: ServiceConfig = toml::from_str(
            r#"
            [rate_limit]
            max_requests = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.rate_limit.max_requests, 3);
        assert_eq!(config.rate_limit.window_secs, 60);
    }
}
