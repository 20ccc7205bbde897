// SPDX-License-Identifier: Apache-2.0

//! Typed views of the X v2 wire format.
//!
//! The v2 API wraps every payload in an envelope: the requested objects
//! under `data`, expanded side-channel objects (here, the authors of the
//! returned posts) under `includes`, and pagination state under `meta`.
//! The structures in this module parse those envelopes and nothing more;
//! presentation lives in [`crate::view`].

use crate::clock::{DateTime, HasAge, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// An error parsing an API response.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not parse API response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Engagement counters attached to a post.
///
/// Counters the API omits are treated as zero.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Metrics {
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub impression_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub reply_count: u64,
}

/// A single post.
#[derive(Clone, Debug, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub author_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Groups a root post and all of its replies; a root post's
    /// conversation id is its own id.
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub public_metrics: Metrics,
}

impl Tweet {
    /// The web permalink for this post, routed through the author's
    /// `handle`.
    pub fn permalink(&self, handle: &str) -> String {
        format!("https://x.com/{handle}/status/{}", self.id)
    }
}

impl HasAge for Tweet {
    fn created_utc(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Follower counters attached to an account.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UserMetrics {
    #[serde(default)]
    pub followers_count: u64,
}

/// An account, as returned by user lookup or expanded in the
/// `includes.users` side channel of a search.
#[derive(Clone, Debug, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub public_metrics: UserMetrics,
    pub description: Option<String>,
}

/// An index of accounts by id, used to resolve the `author_id` on a post
/// to the account that wrote it.
///
/// Lookups are constant-time; the index imposes no ordering. A duplicate
/// id replaces the earlier entry.
#[derive(Clone, Debug, Default)]
pub struct Authors {
    users: HashMap<String, User>,
}

impl Authors {
    /// The handle of the account with the given id, if it is known.
    pub fn handle(&self, id: &str) -> Option<&str> {
        self.users.get(id).map(|user| user.username.as_str())
    }

    /// Adds an account to the index.
    pub fn insert(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    /// Absorbs every account from `other`.
    pub fn merge(&mut self, other: Authors) {
        self.users.extend(other.users);
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Extend<User> for Authors {
    fn extend<T: IntoIterator<Item = User>>(&mut self, iter: T) {
        for user in iter {
            self.insert(user);
        }
    }
}

impl FromIterator<User> for Authors {
    fn from_iter<T: IntoIterator<Item = User>>(iter: T) -> Self {
        let mut authors = Authors::default();
        authors.extend(iter);
        authors
    }
}

/// Accounts expanded alongside a page of results.
#[derive(Debug, Default, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub users: Vec<User>,
}

/// Pagination state for a page of search results.
///
/// The continuation token is an opaque cursor; its absence means the end
/// of the result set.
#[derive(Debug, Default, Deserialize)]
pub struct Meta {
    pub next_token: Option<String>,
    pub result_count: Option<u64>,
}

/// One page of search results.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<Tweet>,
    #[serde(default)]
    pub includes: Includes,
    #[serde(default)]
    pub meta: Meta,
}

impl SearchResponse {
    /// Parses a text response from the search endpoint.
    pub fn parse(body: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(body)?)
    }
}

/// A single-post lookup response.
#[derive(Debug, Deserialize)]
pub struct TweetResponse {
    pub data: Tweet,
    #[serde(default)]
    pub includes: Includes,
}

impl TweetResponse {
    /// Parses a text response from the tweet lookup endpoint.
    pub fn parse(body: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(body)?)
    }
}

/// A user lookup response.
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub data: User,
}

impl UserResponse {
    /// Parses a text response from the user lookup endpoint.
    pub fn parse(body: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(body)?)
    }
}
