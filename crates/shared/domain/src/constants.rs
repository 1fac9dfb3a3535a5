//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
pub const ROLE_INSTRUCTOR: &str = "ROLE_INSTRUCTOR";
pub const ROLE_STUDENT: &str = "ROLE_STUDENT";
pub const ROLE_USER: &str = "ROLE_USER";

/// Delimiter used when a role set is flattened into a single token claim
pub const ROLES_DELIMITER: &str = ",";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Authentication
// =============================================================================

/// Default session token lifetime (4 hours)
pub const DEFAULT_TOKEN_LIFETIME_MS: u64 = 14_400_000;

/// Shortest lifetime a token may be issued with; NumericDate claims have
/// one-second resolution.
pub const MIN_TOKEN_LIFETIME_MS: u64 = 1_000;

/// Longest configurable token lifetime (365 days)
pub const MAX_TOKEN_LIFETIME_MS: u64 = 31_536_000_000;

/// Minimum signing secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// Token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// Pagination
// =============================================================================

pub const DEFAULT_PAGE_NUMBER: u32 = 0;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_COURSE_SORT_FIELD: &str = "courseId";
