//! Signup and login handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{
    Account, AccountResponse, ActionType, LookupOutcome, Password, RoleType, UserEvent,
};

use crate::extractors::ValidatedJson;
use crate::state::AppState;
use crate::token::IssuedToken;

// Verified when the username is unknown so both paths cost one argon2 check
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$ZHVtbXloYXNoMTIzNDU2Nzg5MDEyMzQ1Njc4OTAxMg";

/// Account registration payload
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 4, max = 50, message = "Username must be 4 to 50 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 150, message = "Full name cannot be empty"))]
    pub full_name: String,
}

/// Credentials payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create auth routes (no authentication required).
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Register a new student account.
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    if state.accounts.exists_by_username(&payload.username).await? {
        return Err(AppError::conflict("Username"));
    }
    if state.accounts.exists_by_email(&payload.email).await? {
        return Err(AppError::conflict("Email"));
    }

    match state.roles.find_by_role_type(RoleType::RoleStudent).await? {
        LookupOutcome::Found(_) => {}
        LookupOutcome::NotFound | LookupOutcome::RoleMissing => {
            return Err(AppError::internal("Role ROLE_STUDENT is not provisioned"));
        }
    }

    let password_hash = Password::new(&payload.password)?.into_string();
    let account = Account::new_student(
        payload.username,
        payload.email,
        password_hash,
        payload.full_name,
    );
    let account = state.accounts.save(account).await?;

    state
        .events
        .publish(UserEvent::from_account(&account, ActionType::Create))
        .await;
    info!(user_id = %account.user_id, "Account created");

    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// Exchange credentials for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<IssuedToken>> {
    let account = state
        .accounts
        .find_by_username(&payload.username)
        .await?
        .found();

    let stored = Password::from_hash(
        account
            .as_ref()
            .map(|account| account.password_hash.as_str())
            .unwrap_or(DUMMY_HASH),
    );
    let password_valid = stored.verify(&payload.password);

    let account = match account {
        Some(account) if password_valid && account.is_active() => account,
        _ => return Err(AppError::InvalidCredentials),
    };

    let issued = state.tokens.issue_for(account.user_id, &account.roles)?;
    info!(user_id = %account.user_id, "Login succeeded");

    Ok(Json(issued))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use common::JwtConfig;

    use super::*;
    use crate::clients::{CourseClient, MockCourseTransport};
    use crate::directory::{InMemoryDirectory, MockRoleDirectory};
    use crate::events::MockUserEventPublisher;
    use crate::retry::{Backoff, RetryPolicy};
    use crate::token::TokenService;

    fn state(roles: MockRoleDirectory, events: MockUserEventPublisher) -> AppState {
        let courses = CourseClient::new(
            Arc::new(MockCourseTransport::new()),
            "http://courses.test",
            RetryPolicy::new(1, Backoff::Fixed(Duration::ZERO)),
        );
        AppState::new(
            Arc::new(TokenService::new(JwtConfig {
                secret: "auth-handler-test-secret-32-bytes!!".to_string(),
                expiration_ms: 60_000,
            })),
            Arc::new(InMemoryDirectory::new()),
            Arc::new(roles),
            Arc::new(courses),
            Arc::new(events),
        )
    }

    fn signup_request() -> SignupRequest {
        SignupRequest {
            username: "grace".to_string(),
            email: "grace@example.com".to_string(),
            password: "analytical-engine".to_string(),
            full_name: "Grace Hopper".to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_publishes_create_event() {
        let mut roles = MockRoleDirectory::new();
        roles
            .expect_find_by_role_type()
            .returning(|role| Ok(LookupOutcome::Found(role)));
        let mut events = MockUserEventPublisher::new();
        events
            .expect_publish()
            .withf(|event: &UserEvent| {
                event.action_type == ActionType::Create && event.username == "grace"
            })
            .times(1)
            .returning(|_| ());

        let (status, Json(body)) = signup(
            State(state(roles, events)),
            ValidatedJson(signup_request()),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert!(body.roles.contains(&RoleType::RoleStudent));
    }

    #[tokio::test]
    async fn test_signup_without_student_role_is_internal_error() {
        let mut roles = MockRoleDirectory::new();
        roles
            .expect_find_by_role_type()
            .returning(|_| Ok(LookupOutcome::RoleMissing));
        let mut events = MockUserEventPublisher::new();
        events.expect_publish().never();

        let result = signup(
            State(state(roles, events)),
            ValidatedJson(signup_request()),
        )
        .await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_login_with_unknown_user_is_rejected() {
        let mut events = MockUserEventPublisher::new();
        events.expect_publish().never();

        let result = login(
            State(state(MockRoleDirectory::new(), events)),
            ValidatedJson(LoginRequest {
                username: "nobody".to_string(),
                password: "whatever-it-is".to_string(),
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }
}
