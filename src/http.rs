//! Services for communicating with APIs using HTTP.

use reqwest::{Client, ClientBuilder, StatusCode};
use thiserror::Error;

/// Longest slice of an error response body carried in an [`HTTPError`].
const BODY_SNIPPET_LEN: usize = 200;

/// A general service for making HTTP calls.
///
/// It might be a bit odd to refer to this trait as a "service", since
/// it appears to be more of a _client_ implementation, but think of
/// this as a proxy for a remote _service_ (even though a _client_ is used
/// to communicate with that remote service).
pub trait HTTPService {
    /// Default HTTP client that can be used to make HTTP requests.
    fn client() -> Client {
        ClientBuilder::new()
            .user_agent(Self::user_agent())
            .build()
            // build() only fails if a TLS backend or DNS resolver cannot
            // be initialized, neither of which we can recover from.
            .expect("could not create a new HTTP client")
    }

    /// An appropriate user agent to use when making HTTP requests.
    fn user_agent() -> String {
        format!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

/// The result of an HTTP request.
pub type HTTPResult<T> = Result<T, HTTPError>;

/// Indicates an error has occurred when making an HTTP call.
#[derive(Debug, Error)]
pub enum HTTPError {
    /// An error that occurred while making an HTTP request.
    #[error("Error while making HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    /// An unsuccessful HTTP status code in an HTTP response, with the
    /// leading slice of the response body.
    #[error("API {}: {}", .status.as_u16(), .body)]
    Status { status: StatusCode, body: String },
}

impl HTTPError {
    /// Builds a status error carrying at most the first 200 characters
    /// of `body`.
    pub fn status(status: StatusCode, body: &str) -> Self {
        let body = body.chars().take(BODY_SNIPPET_LEN).collect();
        HTTPError::Status { status, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[allow(dead_code)]
    struct UserAgentTestService {}
    impl HTTPService for UserAgentTestService {}

    #[test]
    fn it_returns_user_agent_with_version_number() {
        let user_agent = UserAgentTestService::user_agent();
        let version_re = Regex::new(r"^[a-z]+ v\d+\.\d+\.\d+(-(alpha|beta)\.\d+)?$").unwrap();
        assert!(
            version_re.is_match(&user_agent),
            "{} does not match {}",
            user_agent,
            version_re,
        );
    }

    #[test]
    fn it_truncates_status_error_bodies() {
        let body = "x".repeat(500);
        let error = HTTPError::status(StatusCode::TOO_MANY_REQUESTS, &body);
        let HTTPError::Status { status, body } = error else {
            panic!("expected a status error");
        };
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body.chars().count(), 200);
    }

    #[test]
    fn it_describes_status_errors_with_code_and_body() {
        let error = HTTPError::status(StatusCode::NOT_FOUND, "{\"title\":\"Not Found\"}");
        assert_eq!(error.to_string(), "API 404: {\"title\":\"Not Found\"}");
    }
}
