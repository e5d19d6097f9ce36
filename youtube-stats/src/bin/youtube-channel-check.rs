//! Checks that channel ids are valid and that the configured API key can reach them.
//!
//! ```text
//! youtube-channel-check Groww=UCvedphyZFjsd2M_RSbuBbDA UC9rkzHvKH92S7tPW8W5j8Zg
//! ```

use eyre::Context;
use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_stats::config::Config;
use youtube_stats::youtube_api::YouTubeClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stdout().is_terminal())
        .init();

    let channels: Vec<(String, String)> = std::env::args().skip(1).map(channel_arg).collect();
    if channels.is_empty() {
        eyre::bail!("usage: youtube-channel-check [NAME=]CHANNEL_ID...");
    }

    let config = Config::from_env().context("load configuration")?;
    let yt = YouTubeClient::with_base_url(&config.api_key, &config.api_base_url);

    for (name, id) in &channels {
        match yt.channel_exists(id).await {
            Ok(true) => println!("✓ {name}: VALID"),
            Ok(false) => println!("✗ {name}: INVALID - No items returned"),
            Err(e) => println!("✗ {name}: ERROR - {e:#}"),
        }
    }

    Ok(())
}

/// Splits `NAME=ID` into its parts; a bare id is also its own name.
fn channel_arg(arg: String) -> (String, String) {
    match arg.split_once('=') {
        Some((name, id)) => (name.trim().to_string(), id.trim().to_string()),
        None => (arg.clone(), arg.clone()),
    }
}
