//! Connection-string host allowlist.
//!
//! A target database host is permitted iff it ends with one of the
//! configured suffixes. Anything that cannot be parsed into a credentialed
//! Postgres URL is rejected outright.

use url::Url;

/// Check whether a connection string targets an allowed host.
///
/// Fails closed: returns false for anything that is not a parseable
/// `postgres://` / `postgresql://` URL with credentials and a host.
/// Suffix matching is case-insensitive and matches subdomains, e.g. the
/// suffix `neon.tech` permits `ep-abc.neon.tech`.
pub fn is_host_allowed(connection_string: &str, suffixes: &[String]) -> bool {
    match extract_host(connection_string) {
        Some(host) => suffixes
            .iter()
            .any(|s| host.ends_with(s.to_ascii_lowercase().as_str())),
        None => false,
    }
}

/// Extract the lowercased host from a connection string.
///
/// Requires a Postgres scheme, a non-empty host, and a userinfo section —
/// connection strings without an `@host` segment carry no credentials and
/// are rejected before any permission check.
pub fn extract_host(connection_string: &str) -> Option<String> {
    let url = Url::parse(connection_string).ok()?;

    match url.scheme() {
        "postgres" | "postgresql" => {}
        _ => return None,
    }

    if url.username().is_empty() {
        return None;
    }

    let host = url.host_str()?;
    if host.is_empty() {
        return None;
    }

    Some(host.to_ascii_lowercase())
}
