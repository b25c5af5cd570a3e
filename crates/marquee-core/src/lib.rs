//! Core types and trait definitions for the Marquee catalog store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing heavier than
//! `chrono`, `serde`, and `tracing`.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod category;
pub mod content;
pub mod error;
pub mod license;
pub mod person;
pub mod runtime;
pub mod store;

pub use error::{Error, Result};
