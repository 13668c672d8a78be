//! # Taskboard Shared Library
//!
//! Domain types and business rules for the Taskboard API: users own
//! projects, projects hold tasks and tasks hold todos.
//!
//! ## Module Organization
//!
//! - `models`: Entity types and request inputs
//! - `auth`: Bearer token verification and the ownership guard
//! - `filter`: Typed list predicates built from query parameters
//! - `stats`: Completion figures and dashboard aggregation
//! - `store`: Storage trait with PostgreSQL and in-memory backends
//! - `service`: Owner-scoped operations, cascade deletes, dashboard
//! - `db`: Connection pool and schema migrations

pub mod auth;
pub mod db;
pub mod filter;
pub mod models;
pub mod service;
pub mod stats;
pub mod store;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
