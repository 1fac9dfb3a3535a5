//! Instructor subscription handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{AccountResponse, ActionType, LookupOutcome, Principal, RoleType, UserEvent};

use crate::authorization::{authorize, RequiredRoles};
use crate::state::AppState;

/// Account to promote
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub user_id: Uuid,
}

/// Create instructor routes
pub fn instructor_routes() -> Router<AppState> {
    Router::new().route("/subscription", post(subscribe_instructor))
}

/// Grant `ROLE_INSTRUCTOR` to an existing account (admin only).
pub async fn subscribe_instructor(
    principal: Option<Extension<Principal>>,
    State(state): State<AppState>,
    Json(payload): Json<SubscriptionRequest>,
) -> AppResult<Json<AccountResponse>> {
    authorize(principal.as_deref(), &RequiredRoles::ADMIN)?;

    let mut account = state
        .accounts
        .find_by_id(payload.user_id)
        .await?
        .found()
        .ok_or_not_found()?;

    match state.roles.find_by_role_type(RoleType::RoleInstructor).await? {
        LookupOutcome::Found(_) => {}
        LookupOutcome::NotFound | LookupOutcome::RoleMissing => {
            return Err(AppError::internal("Role ROLE_INSTRUCTOR is not provisioned"));
        }
    }

    account.promote_to_instructor();
    let account = state.accounts.save(account).await?;

    state
        .events
        .publish(UserEvent::from_account(&account, ActionType::Update))
        .await;
    info!(user_id = %account.user_id, "Account promoted to instructor");

    Ok(Json(AccountResponse::from(account)))
}
