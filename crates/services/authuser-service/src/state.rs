//! Application state for dependency injection.

use std::sync::Arc;

use crate::clients::CourseClient;
use crate::directory::{AccountDirectory, RoleDirectory};
use crate::events::UserEventPublisher;
use crate::token::TokenService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub accounts: Arc<dyn AccountDirectory>,
    pub roles: Arc<dyn RoleDirectory>,
    pub courses: Arc<CourseClient>,
    pub events: Arc<dyn UserEventPublisher>,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        tokens: Arc<TokenService>,
        accounts: Arc<dyn AccountDirectory>,
        roles: Arc<dyn RoleDirectory>,
        courses: Arc<CourseClient>,
        events: Arc<dyn UserEventPublisher>,
    ) -> Self {
        Self {
            tokens,
            accounts,
            roles,
            courses,
            events,
        }
    }
}
