//! # Taskboard API Server Library
//!
//! HTTP surface for Taskboard: JSON endpoints for projects, tasks, todos and
//! dashboard statistics, each scoped to the user named in the bearer token.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration from environment variables
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
