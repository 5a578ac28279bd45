//! TVRage Feed Client Core Library
//!
//! This crate provides a read-only client for the TVRage XML feeds
//! (shows, seasons, episodes).
//!
//! # Features
//! - Find shows by id, by name, by country or by search term
//! - Lazy attribute loading: one detail fetch per show, on first access
//! - Greedy mode: one consolidated fetch covering attributes and seasons
//! - Uniform handling of the feeds' single-vs-list cardinality ambiguity
//! - Rate-limited HTTP client to avoid server overload

pub mod client;
pub mod error;
pub mod feed;
pub mod parser;
pub mod show;
pub mod tvrage;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, RateLimiter, TvRageClient};
pub use error::{Result, TvRageError};
pub use feed::{listify, Value};
pub use show::{Show, ShowOptions};
pub use tvrage::TvRage;
pub use types::{Episode, Season, ShowInfo};
