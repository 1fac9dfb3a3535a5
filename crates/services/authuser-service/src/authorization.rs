//! Role-based access decisions.
//!
//! Each protected operation declares a [`RequiredRoles`] set; access is
//! granted when the principal holds at least one of them.

use std::collections::BTreeSet;

use thiserror::Error;

use common::AppError;
use domain::{Principal, RoleType};

/// Why a request was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    /// No valid principal on the request
    #[error("Authentication required")]
    Unauthenticated,

    /// Principal present but holds none of the required roles
    #[error("Forbidden")]
    Forbidden,
}

impl From<AccessDenied> for AppError {
    fn from(denied: AccessDenied) -> Self {
        match denied {
            AccessDenied::Unauthenticated => AppError::Unauthorized,
            AccessDenied::Forbidden => AppError::Forbidden,
        }
    }
}

/// Roles that may invoke an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredRoles(&'static [RoleType]);

impl RequiredRoles {
    pub const ADMIN: RequiredRoles = RequiredRoles(&[RoleType::RoleAdmin]);
    pub const STUDENT: RequiredRoles = RequiredRoles(&[RoleType::RoleStudent]);
    pub const INSTRUCTOR: RequiredRoles = RequiredRoles(&[RoleType::RoleInstructor]);
    pub const ADMIN_OR_STUDENT: RequiredRoles =
        RequiredRoles(&[RoleType::RoleAdmin, RoleType::RoleStudent]);

    pub const fn any_of(roles: &'static [RoleType]) -> Self {
        RequiredRoles(roles)
    }

    pub fn roles(&self) -> &'static [RoleType] {
        self.0
    }
}

/// True iff `held` and `required` share at least one role.
pub fn is_authorized(held: &BTreeSet<RoleType>, required: &[RoleType]) -> bool {
    required.iter().any(|role| held.contains(role))
}

/// Gate an operation on the request principal.
pub fn authorize(principal: Option<&Principal>, required: &RequiredRoles) -> Result<(), AccessDenied> {
    let principal = principal.ok_or(AccessDenied::Unauthenticated)?;

    if is_authorized(&principal.roles, required.roles()) {
        Ok(())
    } else {
        Err(AccessDenied::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn roles(items: &[RoleType]) -> BTreeSet<RoleType> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_intersection_grants_access() {
        assert!(is_authorized(
            &roles(&[RoleType::RoleStudent]),
            &[RoleType::RoleAdmin, RoleType::RoleStudent]
        ));
        assert!(!is_authorized(&roles(&[RoleType::RoleStudent]), &[RoleType::RoleAdmin]));
    }

    #[test]
    fn test_empty_sets_never_authorize() {
        assert!(!is_authorized(&roles(&[]), &[RoleType::RoleAdmin]));
        assert!(!is_authorized(&roles(&[RoleType::RoleAdmin]), &[]));
    }

    #[test]
    fn test_authorize_distinguishes_outcomes() {
        let student = Principal::new(Uuid::new_v4(), [RoleType::RoleStudent]);

        assert_eq!(authorize(None, &RequiredRoles::ADMIN), Err(AccessDenied::Unauthenticated));
        assert_eq!(authorize(Some(&student), &RequiredRoles::ADMIN), Err(AccessDenied::Forbidden));
        assert_eq!(authorize(Some(&student), &RequiredRoles::ADMIN_OR_STUDENT), Ok(()));
    }

    #[test]
    fn test_access_denied_maps_to_distinct_http_errors() {
        assert!(matches!(AppError::from(AccessDenied::Unauthenticated), AppError::Unauthorized));
        assert!(matches!(AppError::from(AccessDenied::Forbidden), AppError::Forbidden));
    }
}
