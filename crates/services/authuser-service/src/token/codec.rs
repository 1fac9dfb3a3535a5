//! Pure token encoding and decoding.
//!
//! Tokens are compact JWTs (`header.payload.signature`, base64url) signed with
//! HS512. The payload carries `sub`, `roles`, `iat` and `exp`; timestamps are
//! NumericDate seconds.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain::{join_roles, RoleType, MIN_TOKEN_LIFETIME_MS};

use super::TokenError;

/// Signing algorithm accepted and produced by this service.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS512;

/// Token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub roles: String,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Issue a signed token for `user_id` valid from `now` for `lifetime`.
///
/// Identical inputs produce identical tokens.
pub fn issue(
    user_id: Uuid,
    roles: &BTreeSet<RoleType>,
    secret: &[u8],
    lifetime: Duration,
    now: DateTime<Utc>,
) -> Result<String, TokenError> {
    if lifetime < Duration::milliseconds(MIN_TOKEN_LIFETIME_MS as i64) {
        return Err(TokenError::InvalidLifetime);
    }
    if roles.is_empty() {
        return Err(TokenError::EmptyClaims);
    }

    let expires_at = now
        .checked_add_signed(lifetime)
        .ok_or(TokenError::InvalidLifetime)?;

    let claims = TokenClaims {
        sub: user_id.to_string(),
        roles: join_roles(roles),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    encode(
        &Header::new(TOKEN_ALGORITHM),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|_| TokenError::Signing)
}

/// Verify the signature and decode the claims.
///
/// Expiry is not checked here; see [`super::validator::check`].
pub fn parse(token: &str, secret: &[u8]) -> Result<TokenClaims, TokenError> {
    if token.trim().is_empty() {
        return Err(TokenError::EmptyClaims);
    }

    let mut validation = Validation::new(TOKEN_ALGORITHM);
    validation.validate_exp = false;
    validation.set_required_spec_claims(&["sub", "exp"]);

    let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(secret), &validation)?;
    Ok(data.claims)
}
