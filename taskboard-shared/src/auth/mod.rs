/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`jwt`]: HS256 token verification for the requester identity
/// - [`middleware`]: Axum middleware that turns a bearer token into an `AuthContext`
/// - [`ownership`]: The single ownership rule applied to every entity

pub mod jwt;
pub mod middleware;
pub mod ownership;
