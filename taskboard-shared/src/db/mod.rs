/// Database layer
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with health check
/// - `migrations`: Embedded schema migrations
///
/// Queries against the tables live in [`crate::store::postgres`].

pub mod migrations;
pub mod pool;
