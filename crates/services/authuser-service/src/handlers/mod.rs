//! HTTP handlers grouped by resource.

mod auth_handler;
mod health_handler;
mod instructor_handler;
mod user_handler;

pub use auth_handler::{auth_routes, LoginRequest, SignupRequest};
pub use health_handler::{health_routes, HealthResponse};
pub use instructor_handler::{instructor_routes, SubscriptionRequest};
pub use user_handler::{user_routes, CourseQuery, MessageResponse, PasswordChangeRequest};
