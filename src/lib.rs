//! Feed composition and recommendation core for Wicket.
//!
//! Storage, auth and change delivery belong to the hosted backend. This crate
//! turns what it returns into the views a viewer sees: their feed (own posts
//! plus their connections' posts) and the users suggested as new connections.

pub mod backend;
pub mod config;
pub mod context;
pub mod core;
pub mod feed;
pub mod follow;
pub mod handlers;
pub mod models;
pub mod posts;
pub mod recommend;
pub mod search;

pub use backend::{Backend, ChangeEvent, InMemoryBackend};
pub use context::FeedContext;
pub use crate::core::errors::{FeedError, FeedResult};
pub use feed::{compose_feed, PlaceholderSlot};
pub use models::models::{AuthorMetadata, Connections, FeedItem, FeedSnapshot, FeedView, FullName, Post, User};
pub use recommend::{filter_recommendations, RecommendationLayout};
pub use search::{filter_page, search_path, SearchField};
