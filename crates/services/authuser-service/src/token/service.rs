use std::collections::BTreeSet;

use chrono::{Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use common::JwtConfig;
use domain::{Principal, RoleType, TOKEN_TYPE_BEARER};

use super::{codec, validator, TokenError};

/// Token returned after a successful login
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// Binds the codec and validator to the configured secret, lifetime and wall clock.
pub struct TokenService {
    config: JwtConfig,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    /// Configured token lifetime; `InvalidLifetime` if it does not fit a `Duration`.
    pub fn lifetime(&self) -> Result<Duration, TokenError> {
        i64::try_from(self.config.expiration_ms)
            .ok()
            .and_then(Duration::try_milliseconds)
            .ok_or(TokenError::InvalidLifetime)
    }

    /// Issue a token for an account's current role set.
    pub fn issue_for(
        &self,
        user_id: Uuid,
        roles: &BTreeSet<RoleType>,
    ) -> Result<IssuedToken, TokenError> {
        let lifetime = self.lifetime()?;
        let token = codec::issue(
            user_id,
            roles,
            self.config.secret_bytes(),
            lifetime,
            Utc::now(),
        )?;

        Ok(IssuedToken {
            token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: lifetime.num_seconds(),
        })
    }

    pub fn validate(&self, token: &str) -> bool {
        validator::validate(token, self.config.secret_bytes(), Utc::now())
    }

    pub fn principal(&self, token: &str) -> Result<Principal, TokenError> {
        validator::principal(token, self.config.secret_bytes(), Utc::now())
    }

    pub fn subject(&self, token: &str) -> Result<Uuid, TokenError> {
        validator::extract_subject(token, self.config.secret_bytes())
    }
}
