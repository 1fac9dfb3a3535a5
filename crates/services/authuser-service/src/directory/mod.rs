//! Account and role lookup collaborators.
//!
//! Persistence is owned elsewhere; the service only depends on these traits.

mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;
use domain::{Account, LookupOutcome, RoleType};

pub use memory::InMemoryDirectory;

/// Account lookups and mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn find_by_id(&self, user_id: Uuid) -> AppResult<LookupOutcome<Account>>;

    async fn find_by_username(&self, username: &str) -> AppResult<LookupOutcome<Account>>;

    async fn find_by_email(&self, email: &str) -> AppResult<LookupOutcome<Account>>;

    async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        Ok(self.find_by_username(username).await?.is_found())
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self.find_by_email(email).await?.is_found())
    }

    /// Insert or replace an account
    async fn save(&self, account: Account) -> AppResult<Account>;

    async fn delete(&self, user_id: Uuid) -> AppResult<()>;
}

/// Provisioned roles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// `RoleMissing` when the role has not been provisioned
    async fn find_by_role_type(&self, role: RoleType) -> AppResult<LookupOutcome<RoleType>>;
}
