//! The boundary between the collection pipeline and the video platform.
//!
//! The pipeline in [`crate::scrape`] only ever talks to the platform through [`VideoSource`].
//! [`crate::youtube_api::YouTubeClient`] is the real implementation; tests plug in fakes.

use crate::youtube_api::types::Page;
use std::future::Future;

/// A channel name that search resolved to a concrete channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChannel {
    pub channel_id: String,
    /// The title the platform reports, which may differ from the name that was searched for.
    pub display_name: String,
}

/// The four remote calls the collection pipeline needs.
///
/// Every method is a single request. Pagination, batching and pacing are the caller's job.
pub trait VideoSource: Sync {
    /// Search for a channel by free-text name, returning at most the single best match.
    fn find_channel(
        &self,
        query: &str,
    ) -> impl Future<Output = eyre::Result<Option<ResolvedChannel>>> + Send;

    /// Look up the id of the playlist holding the channel's uploads.
    ///
    /// Returns `Ok(None)` if the platform has no data for the channel.
    fn uploads_playlist_id(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = eyre::Result<Option<String>>> + Send;

    /// Fetch one page of video ids from a playlist.
    ///
    /// `max_results` must be between 1 and [`crate::youtube_api::types::MAX_PAGE_SIZE`].
    fn playlist_video_ids(
        &self,
        playlist_id: &str,
        max_results: usize,
        page_token: Option<String>,
    ) -> impl Future<Output = eyre::Result<Page<String>>> + Send;

    /// Fetch statistics, content details and snippet for up to
    /// [`crate::youtube_api::types::MAX_PAGE_SIZE`] videos at once.
    ///
    /// Items are returned as raw JSON in whatever order the platform sends them.
    fn video_details(
        &self,
        video_ids: &[String],
    ) -> impl Future<Output = eyre::Result<Vec<serde_json::Value>>> + Send;
}
