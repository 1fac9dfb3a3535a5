//! Clients for remote services.

mod course_client;
mod error;
mod transport;

pub use course_client::{CourseClient, RetryClassifier};
pub use error::CourseClientError;
pub use transport::{CourseTransport, HttpCourseTransport};

#[cfg(test)]
pub use transport::MockCourseTransport;
