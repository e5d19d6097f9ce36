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
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stdout().is_terminal())
        .init();

    let config = Config::from_env().context("load configuration")?;
    let client = YouTubeClient::with_base_url(&config.api_key, &config.api_base_url);

    tokio::select! {
        result = youtube_stats::run(&client, &config) => {
            if result.context("collect channel statistics")?.is_some() {
                tracing::info!("done; copy the JSON file into the dashboard's data folder");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("scraping interrupted by user; nothing was written");
        }
    }

    Ok(())
}
