//! Session tokens: issuing, parsing and validation.

pub mod codec;
mod error;
mod service;
pub mod validator;

pub use codec::{issue, parse, TokenClaims, TOKEN_ALGORITHM};
pub use error::TokenError;
pub use service::{IssuedToken, TokenService};
pub use validator::{check, extract_subject, principal, validate};
