//! Role types.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{ROLES_DELIMITER, ROLE_ADMIN, ROLE_INSTRUCTOR, ROLE_STUDENT, ROLE_USER};
use crate::error::DomainError;

/// Closed set of roles a user may hold.
///
/// Ordering follows declaration order, which is also the order roles appear
/// in a flattened role claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoleType {
    #[serde(rename = "ROLE_ADMIN")]
    RoleAdmin,
    #[serde(rename = "ROLE_INSTRUCTOR")]
    RoleInstructor,
    #[serde(rename = "ROLE_STUDENT")]
    RoleStudent,
    #[serde(rename = "ROLE_USER")]
    RoleUser,
}

impl RoleType {
    pub const ALL: [RoleType; 4] = [
        RoleType::RoleAdmin,
        RoleType::RoleInstructor,
        RoleType::RoleStudent,
        RoleType::RoleUser,
    ];

    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleType::RoleAdmin => ROLE_ADMIN,
            RoleType::RoleInstructor => ROLE_INSTRUCTOR,
            RoleType::RoleStudent => ROLE_STUDENT,
            RoleType::RoleUser => ROLE_USER,
        }
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(RoleType::RoleAdmin),
            ROLE_INSTRUCTOR => Ok(RoleType::RoleInstructor),
            ROLE_STUDENT => Ok(RoleType::RoleStudent),
            ROLE_USER => Ok(RoleType::RoleUser),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

/// Flatten a role set into the delimited form carried by tokens.
pub fn join_roles<'a>(roles: impl IntoIterator<Item = &'a RoleType>) -> String {
    roles
        .into_iter()
        .map(RoleType::as_str)
        .collect::<Vec<_>>()
        .join(ROLES_DELIMITER)
}

/// Parse a delimited role string. Empty segments are ignored; any unknown
/// name fails the whole parse.
pub fn split_roles(raw: &str) -> Result<BTreeSet<RoleType>, DomainError> {
    raw.split(ROLES_DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(RoleType::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_and_split_roles() {
        let roles: BTreeSet<_> = [RoleType::RoleStudent, RoleType::RoleAdmin].into_iter().collect();
        let joined = join_roles(&roles);

        assert_eq!(joined, "ROLE_ADMIN,ROLE_STUDENT");
        assert_eq!(split_roles(&joined).unwrap(), roles);
    }

    #[test]
    fn test_split_rejects_unknown_role() {
        let result = split_roles("ROLE_STUDENT,ROLE_ROOT");
        assert_eq!(result, Err(DomainError::UnknownRole("ROLE_ROOT".to_string())));
    }

    #[test]
    fn test_split_empty_is_empty_set() {
        assert!(split_roles("").unwrap().is_empty());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&RoleType::RoleInstructor).unwrap();
        assert_eq!(json, "\"ROLE_INSTRUCTOR\"");
    }
}
