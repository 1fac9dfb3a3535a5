//! Explicit lookup outcomes returned by collaborator queries.

/// Result of looking something up in a directory.
///
/// `RoleMissing` is reported when a role the caller depends on has not been
/// provisioned; `NotFound` when the requested entity does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome<T> {
    Found(T),
    NotFound,
    RoleMissing,
}

impl<T> LookupOutcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }

    /// Convert to `Option`, discarding which kind of absence occurred.
    pub fn found(self) -> Option<T> {
        match self {
            LookupOutcome::Found(value) => Some(value),
            LookupOutcome::NotFound | LookupOutcome::RoleMissing => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LookupOutcome<U> {
        match self {
            LookupOutcome::Found(value) => LookupOutcome::Found(f(value)),
            LookupOutcome::NotFound => LookupOutcome::NotFound,
            LookupOutcome::RoleMissing => LookupOutcome::RoleMissing,
        }
    }
}

impl<T> From<Option<T>> for LookupOutcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => LookupOutcome::Found(value),
            None => LookupOutcome::NotFound,
        }
    }
}
