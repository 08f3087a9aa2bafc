use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use medium_posts::Config;

#[derive(Parser, Debug)]
#[command(
    name = "get_medium",
    about = "Write the latest RAPIDS Medium posts to data/posts/medium.yaml"
)]
struct Args {
    /// TOML file with feed_url, output and generator settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Feed to fetch instead of the configured one
    #[arg(long, value_name = "URL")]
    feed_url: Option<String>,

    /// File to write instead of the configured one
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => Config::default(),
    }
    .with_overrides(args.feed_url, args.output);

    let client = reqwest::Client::builder()
        .user_agent(concat!("medium-posts/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let count = medium_posts::sync_posts(&client, &config).await?;
    tracing::info!(posts = count, path = %config.output.display(), "Done");

    Ok(())
}
