//! HTTP transport to the course service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use domain::CoursePage;

use super::CourseClientError;

/// One request/response exchange with the course service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseTransport: Send + Sync {
    /// GET a course page
    async fn get_page(&self, url: String) -> Result<CoursePage, CourseClientError>;

    /// DELETE a resource; no body expected
    async fn delete(&self, url: String) -> Result<(), CourseClientError>;
}

/// `reqwest` transport with a bounded per-request timeout.
pub struct HttpCourseTransport {
    client: Client,
}

impl HttpCourseTransport {
    pub fn new(request_timeout: Duration) -> Result<Self, CourseClientError> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CourseTransport for HttpCourseTransport {
    async fn get_page(&self, url: String) -> Result<CoursePage, CourseClientError> {
        let response = check_status(self.client.get(&url).send().await?)?;
        let page = response.json::<CoursePage>().await?;

        debug!(elements = page.content.len(), "Course page received");
        Ok(page)
    }

    async fn delete(&self, url: String) -> Result<(), CourseClientError> {
        check_status(self.client.delete(&url).send().await?)?;
        Ok(())
    }
}

fn check_status(response: Response) -> Result<Response, CourseClientError> {
    let status = response.status();

    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        Err(CourseClientError::Unavailable(format!("status {}", status.as_u16())))
    } else if status.is_client_error() {
        Err(CourseClientError::Rejected {
            status: status.as_u16(),
        })
    } else {
        Ok(response)
    }
}
