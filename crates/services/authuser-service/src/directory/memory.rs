//! In-memory directory used by the standalone binary and tests.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Account, LookupOutcome, RoleType};

use super::{AccountDirectory, RoleDirectory};

pub struct InMemoryDirectory {
    accounts: RwLock<HashMap<Uuid, Account>>,
    roles: HashSet<RoleType>,
}

impl InMemoryDirectory {
    /// Directory with every role provisioned.
    pub fn new() -> Self {
        Self::with_roles(RoleType::ALL)
    }

    pub fn with_roles(roles: impl IntoIterator<Item = RoleType>) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            roles: roles.into_iter().collect(),
        }
    }

    async fn find_where(&self, predicate: impl Fn(&Account) -> bool) -> LookupOutcome<Account> {
        let accounts = self.accounts.read().await;
        accounts.values().find(|a| predicate(a)).cloned().into()
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountDirectory for InMemoryDirectory {
    async fn find_by_id(&self, user_id: Uuid) -> AppResult<LookupOutcome<Account>> {
        Ok(self.accounts.read().await.get(&user_id).cloned().into())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<LookupOutcome<Account>> {
        Ok(self.find_where(|a| a.username == username).await)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<LookupOutcome<Account>> {
        Ok(self.find_where(|a| a.email.eq_ignore_ascii_case(email)).await)
    }

    async fn save(&self, account: Account) -> AppResult<Account> {
        let mut accounts = self.accounts.write().await;

        let clash = accounts.values().any(|existing| {
            existing.user_id != account.user_id
                && (existing.username == account.username
                    || existing.email.eq_ignore_ascii_case(&account.email))
        });
        if clash {
            return Err(AppError::conflict("Account"));
        }

        accounts.insert(account.user_id, account.clone());
        Ok(account)
    }

    async fn delete(&self, user_id: Uuid) -> AppResult<()> {
        match self.accounts.write().await.remove(&user_id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound),
        }
    }
}

#[async_trait]
impl RoleDirectory for InMemoryDirectory {
    async fn find_by_role_type(&self, role: RoleType) -> AppResult<LookupOutcome<RoleType>> {
        if self.roles.contains(&role) {
            Ok(LookupOutcome::Found(role))
        } else {
            Ok(LookupOutcome::RoleMissing)
        }
    }
}
