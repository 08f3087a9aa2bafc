//! RSS retrieval and decoding.
//!
//! - [`fetcher`] - single HTTP GET of the feed with a body size cap
//! - [`parser`] - streaming RSS 2.0 decoding into [`FeedItem`]s using `quick-xml`
//!
//! # Example
//!
//! ```ignore
//! use medium_posts::feed::{fetch_feed, parse_feed};
//!
//! let bytes = fetch_feed(&client, "https://medium.com/feed/rapids-ai").await?;
//! let items = parse_feed(&bytes)?;
//! ```

mod fetcher;
mod parser;

pub use fetcher::{fetch_feed, FetchError};
pub use parser::{parse_feed, FeedItem, ParseError};
