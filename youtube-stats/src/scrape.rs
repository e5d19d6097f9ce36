//! The collection pipeline: resolve each channel, list its uploads, fetch their details, and
//! flatten them into [`VideoRecord`]s.
//!
//! Failures are contained to the smallest unit of work. A channel that cannot be resolved, has
//! no uploads or yields no details is recorded as failed and the run moves on; a detail batch
//! that fails keeps whatever earlier batches of the same channel returned.

use crate::config::Pacing;
use crate::record::VideoRecord;
use crate::source::{ResolvedChannel, VideoSource};
use crate::youtube_api::types::{MAX_PAGE_SIZE, PagedStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_stream::{Stream, StreamExt};

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct ScrapeOutcome {
    /// Records from every channel that worked, in channel order then upstream order.
    pub records: Vec<VideoRecord>,
    /// Names (as configured) of the channels that contributed nothing.
    pub failed_channels: Vec<String>,
    pub successful_channels: usize,
    /// How many channels were attempted.
    pub total_channels: usize,
}

/// Runs the pipeline over `channels` in order, pausing between channels.
pub async fn scrape_channels<S: VideoSource>(
    source: &S,
    channels: &[String],
    max_videos_per_channel: usize,
    pacing: &Pacing,
) -> ScrapeOutcome {
    let mut outcome = ScrapeOutcome {
        total_channels: channels.len(),
        ..Default::default()
    };

    for (idx, name) in channels.iter().enumerate() {
        tracing::info!(
            channel = %name,
            "[{}/{}] processing channel",
            idx + 1,
            channels.len()
        );

        match scrape_channel(source, name, max_videos_per_channel, pacing).await {
            Some(records) => {
                outcome.successful_channels += 1;
                outcome.records.extend(records);
                tracing::info!(
                    channel = %name,
                    running_total = outcome.records.len(),
                    "channel done"
                );
            }
            None => outcome.failed_channels.push(name.clone()),
        }

        if idx + 1 < channels.len() {
            pause(pacing.channel).await;
        }
    }

    outcome
}

/// Collects one channel, or returns `None` if it should be counted as failed.
async fn scrape_channel<S: VideoSource>(
    source: &S,
    name: &str,
    max_videos: usize,
    pacing: &Pacing,
) -> Option<Vec<VideoRecord>> {
    let Some(channel) = resolve_channel(source, name).await else {
        tracing::warn!(channel = %name, "could not find channel");
        return None;
    };
    tracing::info!(
        channel = %name,
        resolved = %channel.display_name,
        channel_id = %channel.channel_id,
        "found channel"
    );

    tracing::info!(channel = %name, max_videos, "fetching uploads");
    let video_ids = list_channel_videos(source, &channel.channel_id, max_videos, pacing.page).await;
    if video_ids.is_empty() {
        tracing::warn!(channel = %name, "no videos found");
        return None;
    }

    tracing::info!(channel = %name, videos = video_ids.len(), "fetching video statistics");
    let details = fetch_video_details(source, &video_ids, pacing.batch).await;
    if details.is_empty() {
        tracing::warn!(channel = %name, "could not fetch video statistics");
        return None;
    }

    let (records, skipped) = normalize(&channel.display_name, details);
    tracing::info!(
        channel = %name,
        added = records.len(),
        skipped,
        "added videos"
    );
    Some(records)
}

/// Resolves a channel name through search.
///
/// Remote errors are logged and treated the same as finding nothing.
pub async fn resolve_channel<S: VideoSource>(source: &S, name: &str) -> Option<ResolvedChannel> {
    match source.find_channel(name).await {
        Ok(channel) => channel,
        Err(e) => {
            tracing::error!(channel = %name, "error finding channel: {e:#}");
            None
        }
    }
}

/// A lazy stream over the ids in a channel's uploads playlist, most recent first.
///
/// Each page asks for no more than the ids still needed to reach `max_videos`, and every page
/// after the first is preceded by `page_delay`. The stream may still yield more than
/// `max_videos` ids if the platform overshoots, so callers should bound it.
pub fn upload_ids<'a, S: VideoSource>(
    source: &'a S,
    playlist_id: &'a str,
    max_videos: usize,
    page_delay: Duration,
) -> impl Stream<Item = eyre::Result<String>> + 'a {
    let fetched = Arc::new(AtomicUsize::new(0));
    PagedStream::new(move |page_token: Option<String>| {
        let fetched = Arc::clone(&fetched);
        async move {
            if page_token.is_some() {
                pause(page_delay).await;
            }
            let remaining = max_videos.saturating_sub(fetched.load(Ordering::Relaxed));
            let page_size = remaining.clamp(1, MAX_PAGE_SIZE);
            let (ids, next_page_token) = source
                .playlist_video_ids(playlist_id, page_size, page_token)
                .await?;
            fetched.fetch_add(ids.len(), Ordering::Relaxed);
            eyre::Ok((ids, next_page_token))
        }
    })
}

/// Collects up to `max_videos` ids from the channel's uploads.
///
/// Any failure along the way is logged and yields an empty list.
pub async fn list_channel_videos<S: VideoSource>(
    source: &S,
    channel_id: &str,
    max_videos: usize,
    page_delay: Duration,
) -> Vec<String> {
    if max_videos == 0 {
        return Vec::new();
    }

    let playlist_id = match source.uploads_playlist_id(channel_id).await {
        Ok(Some(playlist_id)) => playlist_id,
        Ok(None) => {
            tracing::warn!(channel_id, "no channel data found");
            return Vec::new();
        }
        Err(e) => {
            tracing::error!(channel_id, "error fetching channel details: {e:#}");
            return Vec::new();
        }
    };

    let uploads = upload_ids(source, &playlist_id, max_videos, page_delay).take(max_videos);
    let mut uploads = std::pin::pin!(uploads);
    let mut video_ids = Vec::with_capacity(max_videos.min(MAX_PAGE_SIZE));
    while let Some(video_id) = uploads.next().await {
        match video_id {
            Ok(video_id) => video_ids.push(video_id),
            Err(e) => {
                tracing::error!(channel_id, "error fetching videos: {e:#}");
                return Vec::new();
            }
        }
    }
    video_ids
}

/// Fetches details for `video_ids` in batches of [`MAX_PAGE_SIZE`], pausing between batches.
///
/// If a batch fails, the remaining batches are skipped and whatever was already fetched is
/// returned.
pub async fn fetch_video_details<S: VideoSource>(
    source: &S,
    video_ids: &[String],
    batch_delay: Duration,
) -> Vec<serde_json::Value> {
    let mut details = Vec::with_capacity(video_ids.len());
    for (i, batch) in video_ids.chunks(MAX_PAGE_SIZE).enumerate() {
        if i > 0 {
            pause(batch_delay).await;
        }
        match source.video_details(batch).await {
            Ok(items) => details.extend(items),
            Err(e) => {
                tracing::error!(
                    batch = i,
                    collected = details.len(),
                    "error fetching video statistics: {e:#}"
                );
                break;
            }
        }
    }
    details
}

/// Turns raw detail items into records, returning them along with how many were skipped.
pub fn normalize(channel: &str, details: Vec<serde_json::Value>) -> (Vec<VideoRecord>, usize) {
    let mut skipped = 0;
    let mut records = Vec::with_capacity(details.len());
    for raw in details {
        match VideoRecord::from_raw(channel, raw) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::debug!(channel, "skipping video: {e:#}");
                skipped += 1;
            }
        }
    }
    (records, skipped)
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
