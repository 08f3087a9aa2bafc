//! Utility functions for common operations.
//!
//! - **Text processing**: character-based truncation and URL query stripping
//!
//! # Examples
//!
//! ```
//! use medium_posts::util::{strip_query, truncate_chars};
//!
//! assert_eq!(strip_query("https://medium.com/p/abc?source=rss"), "https://medium.com/p/abc");
//! assert_eq!(truncate_chars("Hello World", 5), "Hello");
//! ```

mod text;

pub use text::{strip_query, truncate_chars};
