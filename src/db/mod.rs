//! Database access subsystem.
//!
//! The driver is an external collaborator: this service opens one
//! short-lived connection per operation against a caller-supplied URL and
//! never pools. The executor sits behind a trait so tests can substitute a
//! scripted implementation.

pub mod executor;

pub use executor::{ExecutorError, PgExecutor, SchemaExecutor};
