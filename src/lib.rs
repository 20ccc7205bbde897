// SPDX-License-Identifier: Apache-2.0

//! birdwatch is a command-line tool for searching X (formerly Twitter)
//! from the terminal. It can run keyword searches over recent posts, list
//! a user's latest posts, look up a single post, and reconstruct the
//! conversation thread a post belongs to, presenting everything as a
//! ranked, compact listing with engagement counts and permalinks.
//!
//! # Examples
//!
//! Search recent posts, most-liked first:
//!
//! ```bash
//! birdwatch search "async rust"
//! ```
//!
//! The same search, restricted to the last 12 hours and to posts with at
//! least 50 likes, fetching up to three pages of results:
//!
//! ```bash
//! birdwatch search "async rust" --since 12h --min-likes 50 --pages 3
//! ```
//!
//! Show a user's profile and their recent posts:
//!
//! ```bash
//! birdwatch profile rustlang
//! ```
//!
//! Look up a single post by id:
//!
//! ```bash
//! birdwatch tweet 1800000000000000001
//! ```
//!
//! Reconstruct the thread containing a post, oldest first:
//!
//! ```bash
//! birdwatch thread 1800000000000000001
//! ```
//!
//! # API Setup
//!
//! birdwatch talks to the X v2 API, which requires a bearer token. To set
//! one up:
//!
//! 1. Create a project and app in the [X developer portal].
//! 2. Generate a bearer token for the app.
//! 3. Store the token in your shell's `$X_BEARER_TOKEN` environment
//!    variable. Follow your shell's procedure for configuring environment
//!    variables, but generally this involves running
//!
//!    ```bash
//!    $ export X_BEARER_TOKEN='copied bearer token'
//!    ```
//!
//!    in your shell session or in your shell's configuration ("rc") file
//!    (e.g., `~/.bashrc` or `~/.zshrc`).
//!
//! **You are solely responsible for the cost of your use of the X API!**
//! Each listing ends with an estimate of what the posts it read cost.
//!
//! [X developer portal]: https://developer.x.com/

pub mod cli;
pub mod clock;
pub mod conf;
pub mod count;
pub mod http;
pub mod text;
pub mod twitter;
pub mod view;

#[cfg(test)]
mod test_utils;
