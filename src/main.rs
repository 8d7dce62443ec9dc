//! webext-publish - ship a browser extension to its stores
//!
//! CLI binary that uploads a packaged extension to the Chrome Web Store and
//! submits it as a new version on addons.mozilla.org. Everything is driven
//! by environment variables; a store is skipped when its credentials are
//! absent.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use webext_publish::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "webext-publish")]
#[command(about = "Publish a browser extension to the Chrome and Firefox stores")]
#[command(version)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {} = Cli::parse();

    // .env is a local-dev convenience; CI sets the environment directly.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    cli::run_chrome(&config).await?;
    cli::run_firefox(&config).await?;

    cli::style::banner("🎉 Both finished without error! 🎉");
    Ok(())
}
