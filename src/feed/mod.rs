//! Feed fetching: the crate's only network read of earthquake data

pub mod source;

pub use source::{fetch_feed, FeedSource, HttpFeedSource, StaticFeedSource};
