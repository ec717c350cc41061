//! Schema generation subsystem.
//!
//! Maps the closed set of feature modules to canned DDL fragments and
//! renders the companion `.env` text. Everything here is a pure function of
//! the request: no user input is ever interpolated into SQL.

pub mod env_file;
pub mod features;
pub mod fragments;

pub use env_file::render_env_file;
pub use features::{Feature, FeatureSet};
pub use fragments::generate_sql;
