//! Generates the Hugo data file listing the RAPIDS Medium posts.
//!
//! The pipeline is a straight line:
//!
//! 1. [`feed::fetch_feed`] downloads the RSS document
//! 2. [`feed::parse_feed`] decodes its items
//! 3. [`Post::from`] strips the link query and summarizes the HTML body
//! 4. [`output::render_posts`] and [`output::write_posts`] produce the YAML file
//!
//! [`sync_posts`] runs all of it; every failure aborts the run.

pub mod config;
pub mod content;
pub mod feed;
pub mod output;
pub mod post;
pub mod util;

use anyhow::{Context, Result};

pub use config::Config;
pub use post::Post;

/// Downloads the feed and converts its items, in feed order.
pub async fn fetch_posts(client: &reqwest::Client, feed_url: &str) -> Result<Vec<Post>> {
    let bytes = feed::fetch_feed(client, feed_url)
        .await
        .with_context(|| format!("Failed to fetch feed '{}'", feed_url))?;

    let items = feed::parse_feed(&bytes).context("Failed to parse feed")?;
    tracing::info!(items = items.len(), "Parsed feed");

    let posts: Vec<Post> = items.into_iter().map(Post::from).collect();
    for post in &posts {
        tracing::debug!(title = %post.title, chars = post.text.chars().count(), "Summarized post");
    }
    Ok(posts)
}

/// Runs the whole pipeline and overwrites `config.output`.
///
/// Returns the number of posts written.
pub async fn sync_posts(client: &reqwest::Client, config: &Config) -> Result<usize> {
    let posts = fetch_posts(client, &config.feed_url).await?;

    let rendered =
        output::render_posts(&posts, &config.generator).context("Failed to render posts")?;
    output::write_posts(&config.output, &rendered)
        .with_context(|| format!("Failed to write '{}'", config.output.display()))?;

    Ok(posts.len())
}
