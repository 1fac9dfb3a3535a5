//! Bearer token authentication middleware.
//!
//! A valid token becomes a [`Principal`] request extension. Requests without an
//! `Authorization` header pass through anonymously; handlers refuse them with
//! 401 through `authorize`.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use common::{AppError, AppResult};
use domain::BEARER_TOKEN_PREFIX;

use crate::state::AppState;

/// Authentication middleware that validates bearer tokens.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let principal = match extract_token(request.headers())? {
        Some(token) => Some(state.tokens.principal(token).map_err(|err| {
            warn!(kind = err.kind(), path = %request.uri().path(), "Rejected bearer token");
            AppError::Unauthorized
        })?),
        None => None,
    };

    if let Some(principal) = principal {
        request.extensions_mut().insert(principal);
    }

    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header.
///
/// `Ok(None)` when the header is absent; an error when it is present but not a
/// non-empty bearer credential.
pub fn extract_token(headers: &HeaderMap) -> AppResult<Option<&str>> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let token = value
        .to_str()
        .ok()
        .and_then(|header| header.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)?;

    Ok(Some(token))
}
