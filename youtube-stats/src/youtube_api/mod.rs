//! YouTube Data API v3 client library.
//!
//! Covers the read-only, API-key-authorized calls needed to collect public video statistics
//! for a channel:
//!
//! 1. [`search`]: resolve a free-text channel name to a channel id (`search.list`)
//! 2. [`channels`]: look up a channel's uploads playlist (`channels.list`)
//! 3. [`playlist_items`]: page through a playlist (`playlistItems.list`)
//! 4. [`videos`]: fetch statistics and metadata for up to 50 videos at once (`videos.list`)
//!
//! The client implements [`crate::source::VideoSource`], which is how the rest of the crate
//! uses it.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use youtube_stats::source::VideoSource;
//! use youtube_stats::youtube_api::YouTubeClient;
//!
//! # async fn example() -> eyre::Result<()> {
//! let client = YouTubeClient::new(std::env::var("YOUTUBE_API_KEY")?);
//! if let Some(channel) = client.find_channel("Zerodha").await? {
//!     println!("{} is {}", channel.display_name, channel.channel_id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod channels;
pub mod client;
pub mod playlist_items;
pub mod search;
pub mod types;
pub mod videos;

// Re-export main types for convenience
pub use client::{DEFAULT_BASE_URL, YouTubeClient};
pub use types::{MAX_PAGE_SIZE, Page, PageInfo, PagedStream};

pub use videos::{Video, VideoStatistics};
