//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → server.rs (Axum setup, middleware layers)
//!     → request.rs (assign request ID)
//!     → security::rate_limit (fixed-window check, /api only)
//!     → handlers.rs (validate, allowlist, generate, execute)
//!     → JSON response (error.rs maps failures)
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
