//! Bearer token middleware for gated routes.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::{AuthError, TokenClaims};
use crate::error::AppError;
use crate::state::AppState;

/// Require a verified bearer token on the wrapped route.
///
/// Applied per-route according to the auth policy. Handlers behind it
/// can read [`TokenClaims`] from request extensions. Rejections render
/// as the JSON 401 envelope.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = match authenticate(&state, request.headers()).await {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(error = %err, path = %request.uri().path(), "Rejected request");
            return Err(AppError::Unauthorized(err));
        }
    };

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Extract and verify the bearer token on `request`.
///
/// Takes the headers rather than the whole request so the future stays
/// `Send` (`axum::body::Body` is not `Sync`, so holding `&Request`
/// across an await point would make the middleware future `!Send`).
async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<TokenClaims, AuthError> {
    let verifier = state.verifier.as_ref().ok_or(AuthError::NotConfigured)?;

    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedHeader)?;

    verifier.verify(token).await
}
