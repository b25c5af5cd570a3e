//! HTTP client for the remote catalog feed.
//!
//! The feed is a read-only JSON API with two collection endpoints:
//! `GetCategories` and `GetAllContent`. This crate fetches and decodes them
//! into [`records`] and converts those into the input types the ingest
//! pipeline hands to a store.

pub mod client;
pub mod error;
pub mod records;

pub use client::FeedClient;
pub use error::{Error, Result};
