use super::config::AdminAuthConfig;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
}

/// Reject requests that do not carry the admin bearer token.
///
/// ```ignore
/// let products = domain_products::handlers::router(service)
///     .layer(axum::middleware::from_fn_with_state(auth, admin_auth_middleware));
/// ```
pub async fn admin_auth_middleware(
    State(auth): State<AdminAuthConfig>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer_token(&headers) else {
        tracing::debug!("No bearer token in Authorization header");
        return AppError::Unauthorized("Authentication required".to_string()).into_response();
    };

    if !auth.verify(token) {
        tracing::warn!("Rejected request with invalid admin token");
        return AppError::Unauthorized("Invalid credentials".to_string()).into_response();
    }

    next.run(request).await
}
