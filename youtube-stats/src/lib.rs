//! Collects recent video statistics for a list of YouTube channels, writes them out as JSON, and
//! prints a short analysis.

use crate::config::Config;
use crate::report::{RunSummary, analyze};
use crate::scrape::{ScrapeOutcome, scrape_channels};
use crate::source::VideoSource;
use jiff::Timestamp;
use std::path::PathBuf;

pub mod config;
pub mod duration;
pub mod output;
pub mod record;
pub mod report;
pub mod scrape;
pub mod source;
pub mod youtube_api;

/// Rough quota cost of one channel: a 100-unit search plus a handful of 1-unit list calls.
const QUOTA_UNITS_PER_CHANNEL: usize = 102;

/// Runs a full collection against `source` and reports on it.
///
/// Returns the path of the written file, or `None` if nothing was collected (in which case no
/// file is written).
pub async fn run<S: VideoSource>(source: &S, config: &Config) -> eyre::Result<Option<PathBuf>> {
    tracing::info!(
        channels = config.channels.len(),
        videos_per_channel = config.max_videos_per_channel,
        expected_videos = config.channels.len() * config.max_videos_per_channel,
        estimated_quota = config.channels.len() * QUOTA_UNITS_PER_CHANNEL,
        "starting collection"
    );

    if !config.start_delay.is_zero() {
        tracing::info!(
            "starting in {} seconds... (press Ctrl+C to cancel)",
            config.start_delay.as_secs()
        );
        tokio::time::sleep(config.start_delay).await;
    }

    let outcome = scrape_channels(
        source,
        &config.channels,
        config.max_videos_per_channel,
        &config.pacing,
    )
    .await;

    finish(&outcome, config)
}

fn finish(outcome: &ScrapeOutcome, config: &Config) -> eyre::Result<Option<PathBuf>> {
    let Some(analysis) = analyze(&outcome.records) else {
        tracing::error!(
            failed_channels = ?outcome.failed_channels,
            "no data collected; check the API key and network connection"
        );
        return Ok(None);
    };

    let path = output::write_records(
        &config.output_dir,
        &config.output_prefix,
        Timestamp::now(),
        &outcome.records,
    )?;

    if !outcome.failed_channels.is_empty() {
        tracing::warn!(
            failed = outcome.failed_channels.len(),
            "failed channels: {}",
            outcome.failed_channels.join(", ")
        );
    }

    println!(
        "{}",
        RunSummary {
            outcome,
            output: &path,
        }
    );
    println!("{analysis}");

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Pacing;
    use crate::record::VideoRecord;
    use crate::scrape::tests::FakeSource;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn config(dir: &std::path::Path, channels: &[&str]) -> Config {
        Config {
            api_key: "unused".to_string(),
            api_base_url: "http://unused".to_string(),
            channels: channels.iter().map(|c| c.to_string()).collect(),
            max_videos_per_channel: 60,
            output_dir: dir.to_path_buf(),
            output_prefix: "test_run".to_string(),
            start_delay: Duration::ZERO,
            pacing: Pacing::none(),
        }
    }

    #[tokio::test]
    async fn writes_what_was_collected() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::paged(50).with_channel("A", "Resolved A", 3);

        let path = run(&source, &config(dir.path(), &["A", "B"]))
            .await
            .unwrap()
            .expect("records were collected");

        assert_eq!(path.parent(), Some(dir.path()));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("test_run_") && name.ends_with(".json"), "{name}");

        let records: Vec<VideoRecord> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.channel == "Resolved A"));
    }

    #[tokio::test(start_paused = true)]
    async fn waits_out_the_start_delay() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::paged(50).with_channel("A", "Resolved A", 1);
        let config = Config {
            start_delay: Duration::from_secs(3),
            ..config(dir.path(), &["A"])
        };

        let start = tokio::time::Instant::now();
        run(&source, &config).await.unwrap();
        let elapsed = start.elapsed();
        let delay = config.start_delay;
        assert!(
            elapsed >= delay && elapsed < delay + Duration::from_millis(10),
            "{elapsed:?}"
        );
    }

    #[tokio::test]
    async fn nothing_collected_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::paged(50);

        let path = run(&source, &config(dir.path(), &["A", "B"])).await.unwrap();

        assert_eq!(path, None);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
