use crate::clock::{Clock, DateTime, Utc};
use crate::http::HTTPResult;
use crate::twitter::client::Posts;
use crate::twitter::service::Service;
use crate::twitter::thing::{Authors, Metrics, Tweet, User, UserMetrics};
use std::fs;
use std::sync::Mutex;

pub fn load_data(file: &str) -> String {
    fs::read_to_string(format!("tests/data/{file}.json")).expect("could not find test data")
}

/// A service that replays canned responses from `tests/data` and records
/// the paths it was asked for.
pub struct TestService {
    responses: Mutex<Vec<String>>,
    requests: Mutex<Vec<String>>,
}

impl TestService {
    /// Replays the named fixtures in order, one per request, repeating the
    /// last one if more requests arrive.
    pub fn new(fixtures: &[&str]) -> Self {
        let responses = fixtures.iter().map(|fixture| load_data(fixture)).collect();
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// The paths requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Service for TestService {
    async fn get(&self, path: &str) -> HTTPResult<String> {
        self.requests.lock().unwrap().push(path.to_string());
        let mut responses = self.responses.lock().unwrap();
        let body = if responses.len() > 1 {
            responses.remove(0)
        } else {
            responses[0].clone()
        };
        Ok(body)
    }
}

pub struct FrozenClock {
    datetime: DateTime<Utc>,
}

impl FrozenClock {
    pub fn new(datetime: DateTime<Utc>) -> Self {
        FrozenClock { datetime }
    }
}

impl Default for FrozenClock {
    fn default() -> Self {
        Self::new(timestamp("2025-07-01T12:00:00Z"))
    }
}

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        self.datetime
    }
}

/// Parses an RFC 3339 timestamp that is known to be valid.
pub fn timestamp(datetime: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(datetime)
        .expect("invalid date supplied")
        .with_timezone(&Utc)
}

/// A post by the test author `alice`, created two hours before the
/// [`FrozenClock`] default now.
pub fn tweet(id: &str, likes: u64) -> Tweet {
    Tweet {
        id: String::from(id),
        author_id: String::from("100"),
        text: format!("Post number {id}"),
        created_at: timestamp("2025-07-01T10:00:00Z"),
        conversation_id: Some(String::from(id)),
        public_metrics: Metrics {
            like_count: likes,
            ..Metrics::default()
        },
    }
}

pub fn user(
    id: &str,
    name: &str,
    username: &str,
    followers: u64,
    description: Option<&str>,
) -> User {
    User {
        id: String::from(id),
        name: String::from(name),
        username: String::from(username),
        public_metrics: UserMetrics {
            followers_count: followers,
        },
        description: description.map(String::from),
    }
}

/// A batch of posts by `alice` with the given ids and like counts.
pub fn posts_with_likes(likes: &[(&str, u64)]) -> Posts {
    let tweets = likes.iter().map(|(id, likes)| tweet(id, *likes)).collect();
    let mut authors = Authors::default();
    authors.insert(user("100", "Alice", "alice", 1_000, None));
    Posts { tweets, authors }
}
