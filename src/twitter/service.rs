// SPDX-License-Identifier: Apache-2.0

//! HTTPS connector for the X API.
//!
//! Service structures in this module provide a low-level way to interact
//! with the X v2 API over HTTPS, essentially a specialized HTTPS client
//! specifically for X.

use crate::http::{HTTPError, HTTPResult, HTTPService};
use log::debug;
use reqwest::Client;

/// Base URL of the X v2 API.
pub const API_BASE: &str = "https://api.x.com/2";

/// A service for retrieving data from the X API.
///
/// Using this trait, clients can implement different ways of connecting
/// to the X API, such as an actual connector for production code, and a
/// mocked connector for testing purposes.
pub trait Service {
    /// Performs an authenticated GET request for `path` (a path and query
    /// string relative to the API base) and returns the raw response body.
    fn get(&self, path: &str) -> impl Future<Output = HTTPResult<String>> + Send;
}

/// A service that contacts the X API directly.
pub struct XService {
    token: String,
    client: Client,
}

impl XService {
    /// Creates a new X service that authenticates with the given bearer
    /// `token`.
    ///
    /// The token is passed in explicitly rather than read from the
    /// environment at call time; see [`crate::conf::bearer_token`].
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client: Self::client(),
        }
    }

    fn uri(&self, path: &str) -> String {
        format!("{API_BASE}{path}")
    }
}

impl HTTPService for XService {}

impl Service for XService {
    /// Sends a GET request to an X API endpoint and returns the raw body.
    ///
    /// A response with a non-success status fails with the status code and
    /// the leading slice of the response body. There are no retries; any
    /// failure propagates to the caller.
    async fn get(&self, path: &str) -> HTTPResult<String> {
        let uri = self.uri(path);
        debug!("GET {uri}");

        let resp = self.client.get(&uri).bearer_auth(&self.token).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            Err(HTTPError::status(status, &body))
        } else {
            Ok(resp.text().await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_returns_a_uri_for_tweet_lookups() {
        let service = XService::new("test-token");
        let actual_uri = service.uri("/tweets/123?tweet.fields=created_at");
        let expected_uri = "https://api.x.com/2/tweets/123?tweet.fields=created_at";
        assert_eq!(actual_uri, expected_uri);
    }

    #[test]
    fn it_returns_a_uri_for_user_lookups() {
        let service = XService::new("test-token");
        let actual_uri = service.uri("/users/by/username/rustlang");
        let expected_uri = "https://api.x.com/2/users/by/username/rustlang";
        assert_eq!(actual_uri, expected_uri);
    }
}
