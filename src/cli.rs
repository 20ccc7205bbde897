//! Drives the command-line program.

pub use crate::twitter::client::Error;
use crate::clock::SystemClock;
use crate::conf;
use crate::twitter::client::{Client, SearchOptions};
use crate::twitter::service::XService;
use crate::view::{ViewOptions, Viewable};
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::Verbosity;
use std::process;

/// Minimum-likes threshold applied when the quality flag is set.
const QUALITY_MIN_LIKES: u64 = 10;

pub fn die(error_code: i32, message: &str) {
    eprintln!("{}", message);
    process::exit(error_code);
}

/// Program configuration.
#[derive(Debug, Parser)]
#[command(version)]
#[command(about = "Search X (Twitter) and read posts, profiles, and threads in the terminal", long_about = None)]
pub struct Config {
    #[command(flatten)]
    verbosity: Verbosity,

    #[command(subcommand)]
    command: Command,
}

impl Config {
    pub fn verbosity(&self) -> &Verbosity {
        &self.verbosity
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search recent posts
    Search {
        /// Search query, in the X search syntax
        query: String,

        /// Rank results by an engagement metric, or newest first
        #[arg(long, value_enum, default_value = "likes")]
        sort: SortKey,

        /// Only include posts newer than this window (e.g. 1h, 12h, 7d)
        #[arg(long, default_value = "7d")]
        since: String,

        /// Only show 'n' posts
        #[arg(short = 'n', long, default_value_t = 15)]
        limit: usize,

        /// Fetch up to this many pages of results
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=5))]
        pages: u32,

        /// Hide posts with fewer than N likes
        #[arg(long, value_name = "N", default_value_t = 0)]
        min_likes: u64,

        /// Exclude replies
        #[arg(long, default_value_t = false)]
        no_replies: bool,

        /// Shortcut for a minimum of 10 likes
        #[arg(long, default_value_t = false)]
        quality: bool,
    },

    /// Show a user's profile and recent posts
    Profile {
        /// X username, without the leading @
        username: String,

        /// Only show 'n' posts
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },

    /// Fetch a single post
    Tweet {
        /// Post id
        id: String,
    },

    /// Reconstruct the conversation thread containing a post
    Thread {
        /// Post id
        id: String,
    },
}

/// Ranks search results by an engagement metric or by recency.
#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum SortKey {
    /// Most-liked first.
    #[default]
    Likes,

    /// Most-viewed first.
    Impressions,

    /// Most-retweeted first.
    Retweets,

    /// Newest first.
    Recent,
}

/// Runs the command-line program.
///
/// Initializes logging, reads the bearer credential from the environment
/// (the only place the environment is consulted), and dispatches to the
/// requested command. Exits with status 1 when the credential is missing
/// or a command fails.
pub async fn run(config: Config) {
    env_logger::Builder::new()
        .filter_level(config.verbosity().log_level_filter())
        .init();

    let token = match conf::bearer_token() {
        Some(token) => token,
        None => {
            die(1, &conf::setup_hint());
            return;
        }
    };

    let runner = Runner::new(config, token);
    if let Err(error) = runner.run().await {
        die(1, &error.to_string());
    }
}

/// Runs the command-line program using its stored configuration options.
pub struct Runner {
    config: Config,
    client: Client<XService>,
}

impl Runner {
    /// Creates a new program runner using the given `config` and bearer
    /// `token`.
    pub fn new(config: Config, token: String) -> Runner {
        let client = Client::new(token);
        Self { config, client }
    }

    /// Dispatches to the configured command.
    pub async fn run(&self) -> Result<(), Error> {
        match &self.config.command {
            Command::Search {
                query,
                sort,
                since,
                limit,
                pages,
                min_likes,
                no_replies,
                quality,
            } => {
                self.run_search(
                    query, *sort, since, *limit, *pages, *min_likes, *no_replies, *quality,
                )
                .await
            }
            Command::Profile { username, limit } => self.run_profile(username, *limit).await,
            Command::Tweet { id } => self.run_tweet(id).await,
            Command::Thread { id } => self.run_thread(id).await,
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn run_search(
        &self,
        query: &str,
        sort: SortKey,
        since: &str,
        limit: usize,
        pages: u32,
        min_likes: u64,
        no_replies: bool,
        quality: bool,
    ) -> Result<(), Error> {
        let opts = SearchOptions {
            sort,
            since: since.to_string(),
            pages,
            no_replies,
            quality,
        };
        let posts = self.client.search(query, &opts, &SystemClock::default()).await?;

        // The quality flag wins over an explicitly passed threshold.
        let min_likes = if quality { QUALITY_MIN_LIKES } else { min_likes };
        let opts = ViewOptions::build()
            .sort(sort)
            .limit(limit)
            .min_likes(min_likes)
            .build();
        println!("{}", posts.view(&opts, &SystemClock::default()));
        Ok(())
    }

    async fn run_profile(&self, username: &str, limit: usize) -> Result<(), Error> {
        let clock = SystemClock::default();
        let user = self.client.user(username).await?;
        println!("{}", user.view(&ViewOptions::default(), &clock));
        println!();

        let posts = self.client.recent_posts(username, limit, &clock).await?;
        let opts = ViewOptions::build().sort(SortKey::Recent).limit(limit).build();
        println!("{}", posts.view(&opts, &clock));
        Ok(())
    }

    async fn run_tweet(&self, id: &str) -> Result<(), Error> {
        let posts = self.client.tweet(id).await?;
        let opts = ViewOptions::build().limit(1).build();
        println!("{}", posts.view(&opts, &SystemClock::default()));
        Ok(())
    }

    async fn run_thread(&self, id: &str) -> Result<(), Error> {
        let posts = self.client.thread(id).await?;
        let opts = ViewOptions::build().limit(50).chronological(true).build();
        println!("{}", posts.view(&opts, &SystemClock::default()));
        Ok(())
    }
}
