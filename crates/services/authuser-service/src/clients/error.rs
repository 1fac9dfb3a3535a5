use thiserror::Error;

/// Failures talking to the course service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CourseClientError {
    /// Connection failure, timeout, or a 5xx/429 answer
    #[error("course service unavailable: {0}")]
    Unavailable(String),

    /// The service refused the request (4xx other than 429)
    #[error("course service rejected the request with status {status}")]
    Rejected { status: u16 },

    /// Response body could not be read as a course page
    #[error("course service response could not be decoded: {0}")]
    Decode(String),

    /// Request could not be built
    #[error("invalid course service request: {0}")]
    InvalidRequest(String),
}

impl CourseClientError {
    /// Default classification: only availability problems are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CourseClientError::Unavailable(_))
    }
}

impl From<reqwest::Error> for CourseClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CourseClientError::Decode(err.to_string())
        } else if err.is_builder() {
            CourseClientError::InvalidRequest(err.to_string())
        } else {
            CourseClientError::Unavailable(err.to_string())
        }
    }
}
