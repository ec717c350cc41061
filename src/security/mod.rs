//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming API request:
//!     → rate_limit.rs (fixed-window check per client key)
//!     → allowlist.rs (target host suffix check)
//!     → Pass to handler
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject on any security check failure
//! - No trust in client input
//! - The rate limiter is advisory throttling, not a security boundary

pub mod allowlist;
pub mod rate_limit;

pub use allowlist::is_host_allowed;
pub use rate_limit::{MemoryStore, RateLimitStore, RateLimiter};
