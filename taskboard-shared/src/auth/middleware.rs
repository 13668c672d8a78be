/// Authentication helpers for Axum middleware
///
/// Validates `Authorization: Bearer <token>` headers and places an
/// [`AuthContext`] carrying the requester identity into request extensions.
/// Everything downstream treats that identity as already verified.
///
/// # Example
///
/// ```no_run
/// use axum::{extract::Request, middleware::Next, response::Response};
/// use taskboard_shared::auth::middleware::{authenticate, AuthError};
///
/// async fn require_user(mut req: Request, next: Next) -> Result<Response, AuthError> {
///     let auth = authenticate(&req, "secret")?;
///     req.extensions_mut().insert(auth);
///     Ok(next.run(req).await)
/// }
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_token, JwtError};

/// Authenticated requester
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates auth context for a verified user
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Error type for authentication middleware
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing authorization header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Invalid authorization header format
    #[error("{0}")]
    InvalidFormat(String),

    /// Token validation failed
    #[error("{0}")]
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::MissingCredentials | AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AuthError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}

/// Extracts and verifies the bearer token on a request
///
/// # Errors
///
/// - `MissingCredentials` if there is no Authorization header
/// - `InvalidFormat` if the header is not a Bearer token
/// - `InvalidToken` if the token fails verification or has expired
pub fn authenticate(req: &Request, secret: &str) -> Result<AuthContext, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_token(token, secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer { .. } => AuthError::InvalidToken("Invalid issuer".to_string()),
        _ => AuthError::InvalidToken(format!("Invalid token: {}", e)),
    })?;

    Ok(AuthContext::new(claims.sub))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{create_token, Claims};
    use axum::body::Body;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn request_with(header_value: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/api/projects");
        if let Some(value) = header_value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_authenticate_valid_token() {
        let user_id = Uuid::new_v4();
        let token = create_token(&Claims::new(user_id), SECRET).unwrap();
        let req = request_with(Some(&format!("Bearer {}", token)));

        let context = authenticate(&req, SECRET).unwrap();
        assert_eq!(context.user_id, user_id);
    }

    #[test]
    fn test_authenticate_missing_header() {
        let req = request_with(None);
        assert!(matches!(
            authenticate(&req, SECRET),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_authenticate_wrong_scheme() {
        let req = request_with(Some("Basic dXNlcjpwYXNz"));
        assert!(matches!(
            authenticate(&req, SECRET),
            Err(AuthError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_auth_error_into_response() {
        let response = AuthError::MissingCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = AuthError::InvalidFormat("test".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
