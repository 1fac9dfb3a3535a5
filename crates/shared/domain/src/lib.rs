//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod account;
pub mod constants;
pub mod course;
pub mod error;
pub mod event;
pub mod lookup;
pub mod password;
pub mod principal;
pub mod role;

pub use account::{Account, AccountResponse, UserStatus, UserType};
pub use constants::*;
pub use course::{CoursePage, CourseSummary, PageRequest, Sort, SortDirection};
pub use error::{DomainError, DomainResult};
pub use event::{ActionType, UserEvent};
pub use lookup::LookupOutcome;
pub use password::Password;
pub use principal::Principal;
pub use role::{join_roles, split_roles, RoleType};
