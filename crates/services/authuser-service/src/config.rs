//! Authuser service configuration.

use std::env;
use std::str::FromStr;

use common::{ConfigError, CourseServiceConfig, JwtConfig, RetryConfig, ServiceConfig};
use domain::DEFAULT_TOKEN_LIFETIME_MS;

const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Process-wide configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct AuthUserConfig {
    pub service: ServiceConfig,
    pub jwt: JwtConfig,
    pub course_service: CourseServiceConfig,
    pub retry: RetryConfig,
    /// Exchange name attached to published user events
    pub user_event_exchange: String,
    /// Optional bootstrap administrator (username, password)
    pub bootstrap_admin: Option<(String, String)>,
}

impl AuthUserConfig {
    /// Load configuration from environment variables (and `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = match lookup("JWT_SECRET") {
            Some(secret) => secret,
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            None => return Err(ConfigError::Missing("JWT_SECRET")),
        };

        let defaults = Self::default();
        let config = Self {
            service: ServiceConfig {
                service_name: lookup("AUTHUSER_SERVICE_NAME")
                    .unwrap_or(defaults.service.service_name),
                host: lookup("AUTHUSER_HOST").unwrap_or(defaults.service.host),
                port: parse_var(&lookup, "AUTHUSER_PORT", defaults.service.port)?,
            },
            jwt: JwtConfig {
                secret,
                expiration_ms: parse_var(&lookup, "JWT_EXPIRATION_MS", DEFAULT_TOKEN_LIFETIME_MS)?,
            },
            course_service: CourseServiceConfig {
                base_url: lookup("COURSE_SERVICE_URL").unwrap_or(defaults.course_service.base_url),
                request_timeout_ms: parse_var(
                    &lookup,
                    "COURSE_SERVICE_TIMEOUT_MS",
                    defaults.course_service.request_timeout_ms,
                )?,
            },
            retry: RetryConfig {
                max_attempts: parse_var(&lookup, "RETRY_MAX_ATTEMPTS", defaults.retry.max_attempts)?,
                initial_delay_ms: parse_var(
                    &lookup,
                    "RETRY_INITIAL_DELAY_MS",
                    defaults.retry.initial_delay_ms,
                )?,
                multiplier: parse_var(&lookup, "RETRY_MULTIPLIER", defaults.retry.multiplier)?,
                max_delay_ms: parse_var(&lookup, "RETRY_MAX_DELAY_MS", defaults.retry.max_delay_ms)?,
            },
            user_event_exchange: lookup("USER_EVENT_EXCHANGE")
                .unwrap_or(defaults.user_event_exchange),
            bootstrap_admin: lookup("AUTHUSER_ADMIN_USERNAME")
                .zip(lookup("AUTHUSER_ADMIN_PASSWORD")),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.validate()?;
        self.retry.validate()?;
        self.course_service.validate()
    }
}

impl Default for AuthUserConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            jwt: JwtConfig::default(),
            course_service: CourseServiceConfig::default(),
            retry: RetryConfig::default(),
            user_event_exchange: "ead.userevent".to_string(),
            bootstrap_admin: None,
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid(name, format!("cannot parse '{}'", raw))),
        None => Ok(default),
    }
}
