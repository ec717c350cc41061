//! Database Schema Provisioning Service Library

pub mod config;
pub mod db;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod sqlgen;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
