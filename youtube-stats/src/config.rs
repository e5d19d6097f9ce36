//! Run configuration, read from the environment.
//!
//! # Environment variables
//!
//! | Variable                 | Required | Default                  | Description                              |
//! |--------------------------|----------|--------------------------|------------------------------------------|
//! | `YOUTUBE_API_KEY`        | yes      | --                       | YouTube Data API v3 key                  |
//! | `YOUTUBE_CHANNELS`       | no       | [`DEFAULT_CHANNELS`]     | Comma-separated channel names to collect |
//! | `MAX_VIDEOS_PER_CHANNEL` | no       | `60`                     | Most recent uploads to fetch per channel |
//! | `OUTPUT_DIR`             | no       | `.`                      | Where the JSON file is written           |
//! | `OUTPUT_PREFIX`          | no       | `finance_content_data`   | File name prefix before the timestamp    |
//! | `START_DELAY_SECS`       | no       | `3`                      | Grace period before the first request    |
//! | `YOUTUBE_API_BASE_URL`   | no       | [`DEFAULT_BASE_URL`]     | API root, for pointing at a mock server  |
//!
//! A `.env` file in the working directory is honored by the binaries.

use crate::youtube_api::DEFAULT_BASE_URL;
use eyre::Context;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// The channels collected when `YOUTUBE_CHANNELS` is not set.
pub const DEFAULT_CHANNELS: &[&str] = &[
    "Groww",
    "Finance with Sharan",
    "Akshat Shrivastava",
    "Pranjal Kamra",
    "CA Rachana Ranade",
    "Labour Law Advisor",
    "Ankur Warikoo",
    "ETMONEY",
    "Zerodha",
    "Nikhil Kamath",
    "Sahil Bloom India",
    "Power of Stocks",
    "Parimal Ade",
    "Investment Insights",
    "FinnovationZ",
];

pub const DEFAULT_MAX_VIDEOS_PER_CHANNEL: usize = 60;
pub const DEFAULT_OUTPUT_PREFIX: &str = "finance_content_data";
const DEFAULT_START_DELAY_SECS: u64 = 3;

/// Fixed pauses between successive requests.
///
/// These keep the request rate polite. They are not backoff: nothing is ever retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Before each playlist page after the first.
    pub page: Duration,
    /// Between video detail batches of the same channel.
    pub batch: Duration,
    /// Between channels.
    pub channel: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            page: Duration::from_millis(300),
            batch: Duration::from_millis(500),
            channel: Duration::from_secs(2),
        }
    }
}

impl Pacing {
    /// No pauses at all.
    pub const fn none() -> Self {
        Self {
            page: Duration::ZERO,
            batch: Duration::ZERO,
            channel: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base_url: String,
    pub channels: Vec<String>,
    pub max_videos_per_channel: usize,
    pub output_dir: PathBuf,
    pub output_prefix: String,
    pub start_delay: Duration,
    pub pacing: Pacing,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let Some(api_key) = var("YOUTUBE_API_KEY") else {
            eyre::bail!(
                "YOUTUBE_API_KEY is not set; put it in the environment or in a .env file \
                (keys are issued through the Google Cloud Console)"
            );
        };

        let channels = match var("YOUTUBE_CHANNELS") {
            Some(list) => {
                let channels: Vec<String> = list
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(String::from)
                    .collect();
                if channels.is_empty() {
                    eyre::bail!("YOUTUBE_CHANNELS does not name any channel");
                }
                channels
            }
            None => DEFAULT_CHANNELS.iter().map(|&name| name.to_string()).collect(),
        };

        let max_videos_per_channel = parse_var(&var, "MAX_VIDEOS_PER_CHANNEL")?
            .unwrap_or(DEFAULT_MAX_VIDEOS_PER_CHANNEL);
        let start_delay_secs =
            parse_var(&var, "START_DELAY_SECS")?.unwrap_or(DEFAULT_START_DELAY_SECS);

        Ok(Self {
            api_key: api_key.trim().to_string(),
            api_base_url: var("YOUTUBE_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            channels,
            max_videos_per_channel,
            output_dir: var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            output_prefix: var("OUTPUT_PREFIX")
                .unwrap_or_else(|| DEFAULT_OUTPUT_PREFIX.to_string()),
            start_delay: Duration::from_secs(start_delay_secs),
            pacing: Pacing::default(),
        })
    }
}

fn parse_var<T>(var: impl Fn(&str) -> Option<String>, key: &str) -> eyre::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .with_context(|| format!("{key} must be a non-negative integer, got {value:?}"))
        })
        .transpose()
}
