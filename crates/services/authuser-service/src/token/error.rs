use thiserror::Error;

use common::AppError;

/// Reasons a token is refused.
///
/// Messages never include token contents or key material.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token signature")]
    BadSignature,

    #[error("token is malformed")]
    Malformed,

    #[error("token is expired")]
    Expired,

    #[error("token algorithm is not supported")]
    Unsupported,

    #[error("token claims are empty")]
    EmptyClaims,

    #[error("token carries an unknown role")]
    UnknownRole,

    #[error("token lifetime is below the minimum")]
    InvalidLifetime,

    #[error("token could not be signed")]
    Signing,
}

impl TokenError {
    /// Short identifier used in log records.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::BadSignature => "bad_signature",
            TokenError::Malformed => "malformed",
            TokenError::Expired => "expired",
            TokenError::Unsupported => "unsupported",
            TokenError::EmptyClaims => "empty_claims",
            TokenError::UnknownRole => "unknown_role",
            TokenError::InvalidLifetime => "invalid_lifetime",
            TokenError::Signing => "signing",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => TokenError::Unsupported,
            ErrorKind::MissingRequiredClaim(_) => TokenError::EmptyClaims,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidLifetime | TokenError::Signing => AppError::internal(err.to_string()),
            _ => AppError::Unauthorized,
        }
    }
}
