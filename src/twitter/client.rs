// SPDX-License-Identifier: Apache-2.0

//! Clients for reading posts, profiles, and threads from the X API.

use crate::cli::SortKey;
use crate::clock::{self, Clock};
use crate::http::HTTPError;
use crate::twitter::service::{Service, XService};
use crate::twitter::thing::{
    self, Authors, SearchResponse, Tweet, TweetResponse, User, UserResponse,
};
use itertools::Itertools;
use log::debug;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

/// Tweet fields requested with every lookup.
const TWEET_FIELDS: &str = "tweet.fields=created_at,public_metrics,author_id,conversation_id";

/// Expansions requested with every lookup.
const EXPANSIONS: &str = "expansions=author_id";

/// User fields requested with every lookup.
const USER_FIELDS: &str = "user.fields=username,name,public_metrics";

/// Number of results requested per search page.
const PAGE_SIZE: u32 = 100;

/// Pause between successive search pages, as a courtesy to the rate limiter.
const PAGE_DELAY: Duration = Duration::from_millis(350);

/// A client error.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the underlying HTTP service.
    #[error("Service error: {0}")]
    Service(#[from] HTTPError),

    /// An error parsing data.
    #[error("Parse error: {0}")]
    Parse(#[from] thing::Error),
}

/// Options controlling a keyword search.
#[derive(Clone, Debug)]
pub struct SearchOptions {
    /// Upstream ranking: recency for [`SortKey::Recent`], relevancy otherwise.
    pub sort: SortKey,

    /// Lower bound on post creation time, as a relative window (`3h`, `7d`)
    /// or an absolute timestamp.
    pub since: String,

    /// Number of result pages to fetch, at most.
    pub pages: u32,

    /// Exclude replies from the results.
    pub no_replies: bool,

    /// Restrict results to posts with at least ten likes.
    pub quality: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            sort: SortKey::default(),
            since: String::from("7d"),
            pages: 1,
            no_replies: false,
            quality: false,
        }
    }
}

/// A batch of posts along with the authors needed to present them.
#[derive(Debug, Default)]
pub struct Posts {
    pub tweets: Vec<Tweet>,
    pub authors: Authors,
}

/// A client for reading data from the X API.
pub struct Client<T: Service> {
    service: T,
}

impl Client<XService> {
    /// Creates a client that talks to the live X API, authenticating with
    /// the given bearer `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_service(XService::new(token))
    }
}

impl<T: Service> Client<T> {
    /// Creates a client backed by the given service implementation.
    pub(crate) fn with_service(service: T) -> Self {
        Self { service }
    }

    async fn get_page(&self, path: &str) -> Result<SearchResponse, Error> {
        let body = self.service.get(path).await?;
        Ok(SearchResponse::parse(&body)?)
    }

    /// Searches recent posts matching `query`.
    ///
    /// Retweets are always excluded; replies and low-engagement posts are
    /// excluded according to `opts`. Up to `opts.pages` pages are fetched,
    /// following the continuation token the API returns with each page;
    /// retrieval stops as soon as a page comes back without a token, even
    /// when the page cap has not been reached. Posts and authors from all
    /// pages are accumulated into one batch.
    ///
    /// Any request failure aborts the whole search.
    pub async fn search<C: Clock>(
        &self,
        query: &str,
        opts: &SearchOptions,
        clock: &C,
    ) -> Result<Posts, Error> {
        let query = build_query(query, opts.no_replies, opts.quality);
        let sort_order = sort_order(opts.sort);
        let start_time = clock::window_start(&opts.since, clock);

        let mut posts = Posts::default();
        let mut next_token: Option<String> = None;

        for page in 0..opts.pages {
            let mut path = format!(
                "/tweets/search/recent?query={}&max_results={PAGE_SIZE}&{TWEET_FIELDS}&{EXPANSIONS}&{USER_FIELDS}&sort_order={sort_order}&start_time={start_time}",
                urlencoding::encode(&query),
            );
            if let Some(token) = &next_token {
                path.push_str("&next_token=");
                path.push_str(token);
            }

            let result = self.get_page(&path).await?;
            debug!("page {}: {} posts", page + 1, result.data.len());
            posts.tweets.extend(result.data);
            posts.authors.extend(result.includes.users);

            next_token = result.meta.next_token;
            if next_token.is_none() {
                break;
            }
            if page + 1 < opts.pages {
                sleep(PAGE_DELAY).await;
            }
        }

        Ok(posts)
    }

    /// Looks up an account by username.
    pub async fn user(&self, username: &str) -> Result<User, Error> {
        let path = format!("/users/by/username/{username}?{USER_FIELDS},description");
        let body = self.service.get(&path).await?;
        Ok(UserResponse::parse(&body)?.data)
    }

    /// The user's recent original posts (retweets excluded), from a single
    /// page of results.
    ///
    /// `limit` is how many posts the caller intends to display; the fetch
    /// size is clamped to the range the search endpoint accepts.
    pub async fn recent_posts<C: Clock>(
        &self,
        username: &str,
        limit: usize,
        clock: &C,
    ) -> Result<Posts, Error> {
        let query = format!("from:{username} -is:retweet");
        let start_time = clock::window_start("7d", clock);
        let fetch = limit.clamp(10, 100);
        let path = format!(
            "/tweets/search/recent?query={}&max_results={fetch}&{TWEET_FIELDS}&{EXPANSIONS}&{USER_FIELDS}&start_time={start_time}",
            urlencoding::encode(&query),
        );

        let result = self.get_page(&path).await?;
        Ok(Posts {
            tweets: result.data,
            authors: result.includes.users.into_iter().collect(),
        })
    }

    /// Fetches a single post by id.
    pub async fn tweet(&self, id: &str) -> Result<Posts, Error> {
        let body = self.service.get(&tweet_path(id)).await?;
        let result = TweetResponse::parse(&body)?;
        Ok(Posts {
            tweets: vec![result.data],
            authors: result.includes.users.into_iter().collect(),
        })
    }

    /// Reconstructs the conversation thread containing the post `id`.
    ///
    /// Fetches the root post, then one page of posts sharing its
    /// conversation id, and merges the two: duplicates are dropped (first
    /// occurrence wins, so the root survives being found again by the
    /// search), posts are ordered oldest first, and the author tables from
    /// both responses are combined.
    pub async fn thread(&self, id: &str) -> Result<Posts, Error> {
        let body = self.service.get(&tweet_path(id)).await?;
        let root = TweetResponse::parse(&body)?;

        let conversation_id = root
            .data
            .conversation_id
            .clone()
            .unwrap_or_else(|| root.data.id.clone());
        let query = format!("conversation_id:{conversation_id}");
        let path = format!(
            "/tweets/search/recent?query={}&max_results={PAGE_SIZE}&{TWEET_FIELDS}&{EXPANSIONS}&{USER_FIELDS}",
            urlencoding::encode(&query),
        );
        let result = self.get_page(&path).await?;
        debug!("conversation {conversation_id}: {} posts", result.data.len());

        let mut tweets: Vec<Tweet> = std::iter::once(root.data)
            .chain(result.data)
            .unique_by(|tweet| tweet.id.clone())
            .collect();
        tweets.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let mut authors: Authors = root.includes.users.into_iter().collect();
        authors.extend(result.includes.users);

        Ok(Posts { tweets, authors })
    }
}

fn tweet_path(id: &str) -> String {
    format!("/tweets/{id}?{TWEET_FIELDS}&{EXPANSIONS}&{USER_FIELDS}")
}

/// Appends the standing exclusion clauses to a user query.
fn build_query(query: &str, no_replies: bool, quality: bool) -> String {
    let mut query = format!("{query} -is:retweet");
    if no_replies {
        query.push_str(" -is:reply");
    }
    if quality {
        query.push_str(" min_faves:10");
    }
    query
}

fn sort_order(sort: SortKey) -> &'static str {
    match sort {
        SortKey::Recent => "recency",
        _ => "relevancy",
    }
}
