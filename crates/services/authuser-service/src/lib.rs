//! Authuser Service Library
//!
//! Account identity for the learning platform: session tokens, role checks,
//! and the account view of a user's course enrollments.

pub mod authorization;
pub mod clients;
pub mod config;
pub mod directory;
pub mod events;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod retry;
pub mod routes;
pub mod state;
pub mod token;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use common::AppResult;
use domain::{Account, Password, RoleType, UserType};

use crate::clients::CourseClient;
use crate::config::AuthUserConfig;
use crate::directory::{AccountDirectory, InMemoryDirectory};
use crate::events::TracingEventPublisher;
use crate::routes::create_router;
use crate::state::AppState;
use crate::token::TokenService;

/// Wire collaborators from configuration.
pub async fn build_state(config: &AuthUserConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    let directory = Arc::new(InMemoryDirectory::new());

    if let Some((username, password)) = &config.bootstrap_admin {
        seed_admin(directory.as_ref(), username, password).await?;
    }

    let courses = CourseClient::from_config(&config.course_service, &config.retry)?;

    Ok(AppState::new(
        Arc::new(TokenService::new(config.jwt.clone())),
        directory.clone(),
        directory,
        Arc::new(courses),
        Arc::new(TracingEventPublisher::new(config.user_event_exchange.clone())),
    ))
}

/// Create an administrator account unless the username is taken.
pub async fn seed_admin(
    accounts: &dyn AccountDirectory,
    username: &str,
    password: &str,
) -> AppResult<()> {
    if accounts.exists_by_username(username).await? {
        return Ok(());
    }

    let password_hash = Password::new(password)?.into_string();
    let mut account = Account::new_student(
        username.to_string(),
        format!("{}@localhost", username),
        password_hash,
        username.to_string(),
    );
    account.user_type = UserType::Admin;
    account.grant_role(RoleType::RoleAdmin);

    let account = accounts.save(account).await?;
    info!(user_id = %account.user_id, username, "Bootstrap administrator created");
    Ok(())
}

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: AuthUserConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(&config).await?;

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.service.addr().parse()?;
    info!(
        service = %config.service.service_name,
        course_service = %config.course_service.base_url,
        "Authuser service listening on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
