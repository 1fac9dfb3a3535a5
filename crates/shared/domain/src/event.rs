//! User lifecycle facts handed to the event publisher.

use serde::Serialize;
use uuid::Uuid;

use crate::account::{Account, UserStatus, UserType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionType {
    Create,
    Update,
    Delete,
}

/// Snapshot of an account after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEvent {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub user_status: UserStatus,
    pub user_type: UserType,
    pub action_type: ActionType,
}

impl UserEvent {
    pub fn from_account(account: &Account, action_type: ActionType) -> Self {
        Self {
            user_id: account.user_id,
            username: account.username.clone(),
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            user_status: account.user_status,
            user_type: account.user_type,
            action_type,
        }
    }
}
