//! Shared configuration structures.
//!
//! Built once at startup and treated as read-only afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use domain::{
    DEFAULT_TOKEN_LIFETIME_MS, MAX_TOKEN_LIFETIME_MS, MIN_JWT_SECRET_LENGTH, MIN_TOKEN_LIFETIME_MS,
};

/// Configuration problems detected at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            name,
            reason: reason.into(),
        }
    }
}

/// Base service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "authuser".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8087,
        }
    }
}

impl ServiceConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Session token signing configuration.
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    #[serde(skip_serializing)]
    pub secret: String,
    /// Token lifetime in milliseconds
    pub expiration_ms: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expiration_ms", &self.expiration_ms)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expiration_ms: DEFAULT_TOKEN_LIFETIME_MS,
        }
    }
}

impl JwtConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::invalid(
                "JWT_SECRET",
                format!("must be at least {} characters", MIN_JWT_SECRET_LENGTH),
            ));
        }
        if !(MIN_TOKEN_LIFETIME_MS..=MAX_TOKEN_LIFETIME_MS).contains(&self.expiration_ms) {
            return Err(ConfigError::invalid(
                "JWT_EXPIRATION_MS",
                format!(
                    "must be between {} and {} ms",
                    MIN_TOKEN_LIFETIME_MS, MAX_TOKEN_LIFETIME_MS
                ),
            ));
        }
        Ok(())
    }

    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

/// Bounded retry with backoff.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Wait after the first failed attempt
    pub initial_delay_ms: u64,
    /// Growth factor per attempt; 1.0 gives a fixed interval
    pub multiplier: f64,
    /// Upper bound on a single wait
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 500,
            multiplier: 1.0,
            max_delay_ms: 5000,
        }
    }
}

impl RetryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::invalid("RETRY_MAX_ATTEMPTS", "must be at least 1"));
        }
        if !self.multiplier.is_finite() || self.multiplier < 1.0 {
            return Err(ConfigError::invalid("RETRY_MULTIPLIER", "must be a number >= 1.0"));
        }
        Ok(())
    }
}

/// Remote course service endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CourseServiceConfig {
    /// Base URL, e.g. "http://localhost:8082"
    pub base_url: String,
    /// Per-attempt request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for CourseServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8082".to_string(),
            request_timeout_ms: 5000,
        }
    }
}

impl CourseServiceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "COURSE_SERVICE_URL",
                "must be an http(s) URL",
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::invalid("COURSE_SERVICE_TIMEOUT_MS", "must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_debug_redacts_secret() {
        let config = JwtConfig {
            secret: "super-secret-value-that-is-long-enough".to_string(),
            expiration_ms: 60_000,
        };
        let debug = format!("{:?}", config);

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_jwt_config_validation() {
        let mut config = JwtConfig {
            secret: "short".to_string(),
            expiration_ms: 60_000,
        };
        assert!(config.validate().is_err());

        config.secret = "a".repeat(MIN_JWT_SECRET_LENGTH);
        assert!(config.validate().is_ok());

        config.expiration_ms = 500;
        assert!(config.validate().is_err());

        config.expiration_ms = MAX_TOKEN_LIFETIME_MS;
        assert!(config.validate().is_ok());

        config.expiration_ms = 1_000_000_000_000_000_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_retry_config_validation() {
        assert!(RetryConfig::default().validate().is_ok());

        let zero = RetryConfig {
            max_attempts: 0,
            ..RetryConfig::default()
        };
        assert!(zero.validate().is_err());

        let shrinking = RetryConfig {
            multiplier: 0.5,
            ..RetryConfig::default()
        };
        assert!(shrinking.validate().is_err());
    }

    #[test]
    fn test_course_service_config_validation() {
        assert!(CourseServiceConfig::default().validate().is_ok());

        let bad = CourseServiceConfig {
            base_url: "localhost:8082".to_string(),
            ..CourseServiceConfig::default()
        };
        assert!(bad.validate().is_err());
    }
}
