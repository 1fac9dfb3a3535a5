//! User handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult, OptionExt};
use domain::{
    AccountResponse, ActionType, CoursePage, PageRequest, Password, Principal, Sort, UserEvent,
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE,
};

use crate::authorization::{authorize, RequiredRoles};
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Paging parameters for a user's course list
#[derive(Debug, Default, Deserialize)]
pub struct CourseQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    /// `field` or `field,ASC|DESC`
    pub sort: Option<String>,
}

impl CourseQuery {
    pub fn into_page_request(self) -> AppResult<PageRequest> {
        let sort = match self.sort.as_deref() {
            Some(raw) => Sort::parse(raw)?,
            None => Sort::default(),
        };

        Ok(PageRequest::new(
            self.page.unwrap_or(DEFAULT_PAGE_NUMBER),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
            sort,
        )?)
    }
}

/// Password change payload
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Plain acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/:id", get(get_user).delete(delete_user))
        .route("/:id/courses", get(get_user_courses))
        .route("/:id/password", put(update_password))
}

/// Students may only act on their own account.
fn ensure_self_or_admin(principal: &Principal, user_id: Uuid) -> AppResult<()> {
    if principal.is_admin() || principal.user_id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Get user by ID (own profile or admin)
pub async fn get_user(
    principal: Option<Extension<Principal>>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AccountResponse>> {
    authorize(principal.as_deref(), &RequiredRoles::ADMIN_OR_STUDENT)?;
    if let Some(principal) = principal.as_deref() {
        ensure_self_or_admin(principal, id)?;
    }

    let account = state.accounts.find_by_id(id).await?.found().ok_or_not_found()?;

    Ok(Json(AccountResponse::from(account)))
}

/// Courses the user is enrolled in. Always answers once authorized; an
/// unreachable course service yields an empty page.
pub async fn get_user_courses(
    principal: Option<Extension<Principal>>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<CourseQuery>,
) -> AppResult<Json<CoursePage>> {
    authorize(principal.as_deref(), &RequiredRoles::ADMIN_OR_STUDENT)?;
    if let Some(principal) = principal.as_deref() {
        ensure_self_or_admin(principal, id)?;
    }

    let page = query.into_page_request()?;
    let courses = state.courses.get_courses_for_user(id, &page).await;

    Ok(Json(courses))
}

/// Replace the account password after checking the current one.
pub async fn update_password(
    principal: Option<Extension<Principal>>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<PasswordChangeRequest>,
) -> AppResult<Json<MessageResponse>> {
    authorize(principal.as_deref(), &RequiredRoles::ADMIN_OR_STUDENT)?;
    if let Some(principal) = principal.as_deref() {
        ensure_self_or_admin(principal, id)?;
    }

    let mut account = state.accounts.find_by_id(id).await?.found().ok_or_not_found()?;

    if !Password::from_hash(account.password_hash.as_str()).verify(&payload.old_password) {
        warn!(user_id = %id, "Mismatched old password");
        return Err(AppError::PasswordMismatch);
    }

    let password_hash = Password::new(&payload.password)?.into_string();
    account.change_password(password_hash);
    let account = state.accounts.save(account).await?;

    state
        .events
        .publish(UserEvent::from_account(&account, ActionType::Update))
        .await;
    info!(user_id = %id, "Password updated");

    Ok(Json(MessageResponse {
        message: "Password updated successfully",
    }))
}

/// Delete user (admin only)
pub async fn delete_user(
    principal: Option<Extension<Principal>>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    authorize(principal.as_deref(), &RequiredRoles::ADMIN)?;

    let account = state.accounts.find_by_id(id).await?.found().ok_or_not_found()?;

    // Enrollment cleanup is best effort; the account goes regardless
    if let Err(err) = state.courses.delete_enrollment_link(id).await {
        warn!(user_id = %id, error = %err, "Failed to delete enrollment link");
    }

    state.accounts.delete(id).await?;
    state
        .events
        .publish(UserEvent::from_account(&account, ActionType::Delete))
        .await;
    info!(user_id = %id, "Account deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use domain::SortDirection;

    use super::*;

    #[test]
    fn test_course_query_defaults() {
        let page = CourseQuery::default().into_page_request().unwrap();

        assert_eq!(page, PageRequest::default());
    }

    #[test]
    fn test_course_query_with_sort() {
        let query = CourseQuery {
            page: Some(2),
            size: Some(25),
            sort: Some("name,desc".to_string()),
        };
        let page = query.into_page_request().unwrap();

        assert_eq!(page.page, 2);
        assert_eq!(page.size, 25);
        assert_eq!(page.sort.field, "name");
        assert_eq!(page.sort.direction, SortDirection::Desc);
    }

    #[test]
    fn test_course_query_rejects_oversized_page() {
        let query = CourseQuery {
            size: Some(10_000),
            ..CourseQuery::default()
        };

        assert!(matches!(
            query.into_page_request(),
            Err(AppError::Validation(_))
        ));
    }
}
