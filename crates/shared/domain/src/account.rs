//! Account domain entity and related types.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::RoleType;

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserStatus {
    Active,
    Blocked,
}

/// Kind of platform user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserType {
    Admin,
    Student,
    Instructor,
    User,
}

/// Account domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub user_status: UserStatus,
    pub user_type: UserType,
    pub roles: BTreeSet<RoleType>,
    pub creation_date: DateTime<Utc>,
    pub last_update_date: DateTime<Utc>,
}

impl Account {
    /// Create a new active student account holding `ROLE_STUDENT`.
    pub fn new_student(
        username: String,
        email: String,
        password_hash: String,
        full_name: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            full_name,
            user_status: UserStatus::Active,
            user_type: UserType::Student,
            roles: BTreeSet::from([RoleType::RoleStudent]),
            creation_date: now,
            last_update_date: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.user_status == UserStatus::Active
    }

    /// Grant a role; touches the update timestamp.
    pub fn grant_role(&mut self, role: RoleType) {
        self.roles.insert(role);
        self.last_update_date = Utc::now();
    }

    /// Replace the stored password hash.
    pub fn change_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.last_update_date = Utc::now();
    }

    /// Promote to instructor.
    pub fn promote_to_instructor(&mut self) {
        self.user_type = UserType::Instructor;
        self.grant_role(RoleType::RoleInstructor);
    }
}

/// Account view safe to return to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub user_status: UserStatus,
    pub user_type: UserType,
    pub roles: BTreeSet<RoleType>,
    pub creation_date: DateTime<Utc>,
    pub last_update_date: DateTime<Utc>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            user_id: account.user_id,
            username: account.username.clone(),
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            user_status: account.user_status,
            user_type: account.user_type,
            roles: account.roles.clone(),
            creation_date: account.creation_date,
            last_update_date: account.last_update_date,
        }
    }
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        AccountResponse::from(&account)
    }
}
