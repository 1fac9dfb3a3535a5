//! Authenticated principal.

use std::collections::BTreeSet;

use serde::Serialize;
use uuid::Uuid;

use crate::role::RoleType;

/// Identity and role set derived from a validated session token.
///
/// Lives for the duration of one request and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub user_id: Uuid,
    pub roles: BTreeSet<RoleType>,
}

impl Principal {
    pub fn new(user_id: Uuid, roles: impl IntoIterator<Item = RoleType>) -> Self {
        Self {
            user_id,
            roles: roles.into_iter().collect(),
        }
    }

    pub fn has_role(&self, role: RoleType) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(RoleType::RoleAdmin)
    }
}
