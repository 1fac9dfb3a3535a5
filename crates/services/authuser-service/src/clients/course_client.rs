//! Resilient client for the course service.
//!
//! Course lookups go through a [`RetryPolicy`] and degrade to an empty page
//! when the service cannot answer. Unlinking enrollments is a single attempt
//! whose failure is returned to the caller unchanged.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;

use common::{CourseServiceConfig, RetryConfig};
use domain::{CoursePage, PageRequest};

use super::{CourseClientError, CourseTransport, HttpCourseTransport};
use crate::retry::RetryPolicy;

/// Decides which course service failures are retried.
pub type RetryClassifier = fn(&CourseClientError) -> bool;

pub struct CourseClient {
    transport: Arc<dyn CourseTransport>,
    base_url: String,
    retry: RetryPolicy,
    is_retryable: RetryClassifier,
}

impl CourseClient {
    pub fn new(
        transport: Arc<dyn CourseTransport>,
        base_url: impl Into<String>,
        retry: RetryPolicy,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
            retry,
            is_retryable: CourseClientError::is_retryable,
        }
    }

    /// Build an HTTP-backed client from startup configuration.
    pub fn from_config(
        service: &CourseServiceConfig,
        retry: &RetryConfig,
    ) -> Result<Self, CourseClientError> {
        let transport = HttpCourseTransport::new(Duration::from_millis(service.request_timeout_ms))?;
        Ok(Self::new(
            Arc::new(transport),
            service.base_url.clone(),
            RetryPolicy::from(retry),
        ))
    }

    /// Replace the default failure classification.
    pub fn with_retry_classifier(mut self, is_retryable: RetryClassifier) -> Self {
        self.is_retryable = is_retryable;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/courses/users/{userId}?page={n}&size={n}&sort={field},{dir}`
    pub fn courses_for_user_url(&self, user_id: Uuid, page: &PageRequest) -> String {
        format!(
            "{}?page={}&size={}&sort={}",
            self.enrollment_url(user_id),
            page.page,
            page.size,
            page.sort
        )
    }

    /// `{base}/courses/users/{userId}`
    pub fn enrollment_url(&self, user_id: Uuid) -> String {
        format!("{}/courses/users/{}", self.base_url, user_id)
    }

    /// Fetch the courses a user is enrolled in.
    ///
    /// Never fails: once retries are exhausted, or on a failure the
    /// classifier refuses to retry, an empty page for the requested
    /// page number and size is returned.
    pub async fn get_courses_for_user(&self, user_id: Uuid, page: &PageRequest) -> CoursePage {
        let url = self.courses_for_user_url(user_id, page);
        info!(%user_id, url = %url, "Requesting courses for user");

        let transport = &self.transport;
        let result = self
            .retry
            .execute(
                "get_courses_for_user",
                move || transport.get_page(url.clone()),
                self.is_retryable,
                |exhausted| {
                    warn!(
                        %user_id,
                        attempts = exhausted.attempt_number,
                        error = %exhausted.last_error,
                        "Course lookup failed, returning empty page"
                    );
                    CoursePage::empty(page)
                },
            )
            .await;

        info!(%user_id, elements = result.content.len(), "Finished course request");
        result
    }

    /// Remove the user's enrollment link in the course service. Single attempt.
    pub async fn delete_enrollment_link(&self, user_id: Uuid) -> Result<(), CourseClientError> {
        let url = self.enrollment_url(user_id);
        info!(%user_id, url = %url, "Deleting enrollment link");

        self.transport.delete(url).await
    }
}
