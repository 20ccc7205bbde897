// SPDX-License-Identifier: Apache-2.0

//! X API clients and services for communicating with X over HTTP.

pub mod client;
pub mod service;
pub mod thing;

pub use client::Client;
