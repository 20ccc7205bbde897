//! Draws viewable objects into a terminal window.

use crate::cli::SortKey;
use crate::clock::{Clock, HasAge};
use crate::count;
use crate::text;
use crate::twitter::client::Posts;
use crate::twitter::thing::{Authors, Tweet, User};
use indoc::formatdoc;
use itertools::Itertools;

/// Longest post excerpt included in a listing.
const EXCERPT_LEN: usize = 300;

/// Estimated API cost per post read, in dollars.
const COST_PER_TWEET: f64 = 0.005;

/// Placeholder handle for posts whose author was not expanded.
const UNKNOWN_AUTHOR: &str = "unknown";

/// Message printed when a command produced no posts at all.
const NO_RESULTS: &str = "No tweets found.";

/// View renderer options.
#[derive(Debug)]
pub struct ViewOptions {
    sort: SortKey,
    limit: usize,
    min_likes: u64,
    chronological: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            sort: SortKey::default(),
            limit: 15,
            min_likes: 0,
            chronological: false,
        }
    }
}

impl ViewOptions {
    /// Incrementally builds a new set of view options.
    ///
    /// # Examples
    ///
    /// ```
    /// use birdwatch::view::ViewOptions;
    /// let opts = ViewOptions::build().limit(50).min_likes(10).build();
    /// ```
    pub fn build() -> ViewOptionsBuilder {
        ViewOptionsBuilder::default()
    }
}

/// A builder for view options.
///
/// You probably don't want to use this directly; call [`ViewOptions::build()`]
/// and construct it incrementally instead.
#[derive(Debug, Default)]
#[must_use]
pub struct ViewOptionsBuilder {
    opts: ViewOptions,
}

impl ViewOptionsBuilder {
    /// Sets the sort key for the listing.
    pub fn sort(mut self, sort: SortKey) -> Self {
        self.opts.sort = sort;
        self
    }

    /// Sets the number of posts displayed.
    pub fn limit(mut self, limit: usize) -> Self {
        self.opts.limit = limit;
        self
    }

    /// Hides posts with fewer than `min_likes` likes.
    pub fn min_likes(mut self, min_likes: u64) -> Self {
        self.opts.min_likes = min_likes;
        self
    }

    /// Renders posts in the order given instead of re-sorting, for
    /// listings that are already chronological.
    pub fn chronological(mut self, chronological: bool) -> Self {
        self.opts.chronological = chronological;
        self
    }

    /// Finalizes the [`ViewOptions`].
    pub fn build(self) -> ViewOptions {
        self.opts
    }
}

/// Marks an item that can be converted into a string for display on a terminal.
pub trait Viewable {
    /// Converts the item into a string for display on a terminal.
    ///
    /// `clock` supplies the current time for relative ages.
    fn view<C: Clock>(&self, opts: &ViewOptions, clock: &C) -> String;
}

impl Viewable for Posts {
    /// Renders a ranked listing of posts.
    ///
    /// Posts below the minimum-likes threshold are dropped, the remainder
    /// are sorted (metric sorts descending, anything else newest first),
    /// and the top `limit` entries are printed with a rank, the author's
    /// handle, compact engagement counts, a relative age, an excerpt, and
    /// a permalink. The trailing summary counts every post that was
    /// fetched, not just those displayed.
    fn view<C: Clock>(&self, opts: &ViewOptions, clock: &C) -> String {
        if self.tweets.is_empty() {
            return String::from(NO_RESULTS);
        }

        let mut tweets: Vec<&Tweet> = self
            .tweets
            .iter()
            .filter(|tweet| tweet.public_metrics.like_count >= opts.min_likes)
            .collect();

        if !opts.chronological {
            match opts.sort {
                SortKey::Likes => {
                    tweets.sort_by(|a, b| b.public_metrics.like_count.cmp(&a.public_metrics.like_count))
                }
                SortKey::Impressions => tweets.sort_by(|a, b| {
                    b.public_metrics.impression_count.cmp(&a.public_metrics.impression_count)
                }),
                SortKey::Retweets => tweets.sort_by(|a, b| {
                    b.public_metrics.retweet_count.cmp(&a.public_metrics.retweet_count)
                }),
                // Anything that is not a metric falls back to newest first.
                _ => tweets.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            }
        }

        let listing = tweets
            .iter()
            .take(opts.limit)
            .enumerate()
            .map(|(i, tweet)| entry(i + 1, tweet, &self.authors, clock))
            .join("\n\n");

        let total = self.tweets.len();
        formatdoc! {"
            {listing}

            ---
            📊 {total} tweets read · est. cost ~${cost:.3}",
            cost = total as f64 * COST_PER_TWEET,
        }
    }
}

impl Viewable for User {
    /// Renders a profile header: display name, handle, compact follower
    /// count, and the bio when the account has one.
    fn view<C: Clock>(&self, _: &ViewOptions, _: &C) -> String {
        let mut header = formatdoc! {"
            👤 {name} (@{handle})
               Followers: {followers}",
            name = self.name,
            handle = self.username,
            followers = count::compact(self.public_metrics.followers_count),
        };
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            header.push_str("\n   ");
            header.push_str(description);
        }
        header
    }
}

fn entry<C: Clock>(rank: usize, tweet: &Tweet, authors: &Authors, clock: &C) -> String {
    let handle = authors.handle(&tweet.author_id).unwrap_or(UNKNOWN_AUTHOR);
    let metrics = &tweet.public_metrics;
    formatdoc! {"
        {rank}. @{handle} ({likes}❤️  {views}👁  · {age})
           {excerpt}
           {link}",
        likes = count::compact(metrics.like_count),
        views = count::compact(metrics.impression_count),
        age = tweet.relative_age(clock),
        excerpt = excerpt(&tweet.text),
        link = tweet.permalink(handle),
    }
}

/// Re-indents continuation lines to line up under the rank and truncates
/// to [`EXCERPT_LEN`] characters.
fn excerpt(text: &str) -> String {
    text::convert_html_entities(text)
        .replace('\n', "\n   ")
        .chars()
        .take(EXCERPT_LEN)
        .collect()
}
