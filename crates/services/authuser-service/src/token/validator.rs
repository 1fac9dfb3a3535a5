//! Token validation.
//!
//! [`check`] keeps every failure mode distinct for diagnostics; [`validate`]
//! collapses them into a fail-closed boolean for callers that only need a
//! yes/no answer.

use chrono::{DateTime, Utc};
use tracing::error;
use uuid::Uuid;

use domain::{split_roles, Principal};

use super::codec::{self, TokenClaims};
use super::TokenError;

/// Verify signature, structure, claims and expiry (`now >= exp` is expired).
pub fn check(token: &str, secret: &[u8], now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
    let claims = codec::parse(token, secret)?;

    if claims.sub.trim().is_empty() || claims.roles.trim().is_empty() {
        return Err(TokenError::EmptyClaims);
    }
    if now.timestamp() >= claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

/// Fail-closed validation. Every failure is logged by kind and reported as `false`.
pub fn validate(token: &str, secret: &[u8], now: DateTime<Utc>) -> bool {
    match check(token, secret, now) {
        Ok(_) => true,
        Err(err) => {
            error!(kind = err.kind(), "Rejected session token: {}", err);
            false
        }
    }
}

/// Signature-verified subject of a token.
pub fn extract_subject(token: &str, secret: &[u8]) -> Result<Uuid, TokenError> {
    let claims = codec::parse(token, secret)?;
    parse_subject(&claims)
}

/// Build the request principal from a token valid at `now`.
pub fn principal(token: &str, secret: &[u8], now: DateTime<Utc>) -> Result<Principal, TokenError> {
    let claims = check(token, secret, now)?;
    let user_id = parse_subject(&claims)?;
    let roles = split_roles(&claims.roles).map_err(|_| TokenError::UnknownRole)?;

    if roles.is_empty() {
        return Err(TokenError::EmptyClaims);
    }

    Ok(Principal { user_id, roles })
}

fn parse_subject(claims: &TokenClaims) -> Result<Uuid, TokenError> {
    if claims.sub.trim().is_empty() {
        return Err(TokenError::EmptyClaims);
    }
    Uuid::parse_str(&claims.sub).map_err(|_| TokenError::Malformed)
}
