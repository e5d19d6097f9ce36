//! Core YouTube API client functionality.

use crate::source::{ResolvedChannel, VideoSource};
use crate::youtube_api::{
    channels::ChannelListResponse,
    playlist_items::PlaylistItemListResponse,
    search::SearchListResponse,
    types::{MAX_PAGE_SIZE, Page},
    videos::VideoListResponse,
};
use eyre::Context;
use std::fmt;
use tracing::instrument;

/// Where the YouTube Data API v3 lives unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Client for the public, read-only parts of the YouTube Data API v3.
///
/// Requests are authorized with an API key passed as the `key` query parameter, so only public
/// data is reachable. Each call costs quota according to YouTube's own accounting; notably a
/// `search.list` call costs 100 units where the list calls used here cost 1.
#[derive(Clone)]
pub struct YouTubeClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl YouTubeClient {
    /// Creates a client that talks to [`DEFAULT_BASE_URL`].
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a client that talks to an API-compatible server at `base_url`.
    ///
    /// `base_url` should not end with a `/`.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Makes a keyed GET request to the YouTube API with common error handling.
    ///
    /// Any non-2xx status is turned into an error carrying the response body, which is where
    /// YouTube puts the reason (e.g., `quotaExceeded`). The API key is stripped from transport
    /// errors so it never ends up in logs.
    #[instrument(skip(self), level = tracing::Level::TRACE)]
    async fn make_request(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> eyre::Result<reqwest::Response> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(query_params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("send request to YouTube API: {}", url))?;

        let status_code = response.status();
        if !status_code.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(eyre::eyre!(
                "YouTube API {} request failed with status {}: {}",
                endpoint,
                status_code,
                error_text
            ));
        }

        Ok(response)
    }

    /// Calls the `search.list` API restricted to channels.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    #[instrument(skip(self))]
    pub async fn search_channels(
        &self,
        query: &str,
        max_results: usize,
    ) -> eyre::Result<SearchListResponse> {
        let max_results_string = max_results.to_string();
        let query_params = [
            ("part", "id,snippet"),
            ("type", "channel"),
            ("q", query),
            ("maxResults", max_results_string.as_str()),
        ];

        let response = self.make_request("search", &query_params).await?;

        let results: SearchListResponse = response
            .json()
            .await
            .context("parse YouTube search API response as JSON")?;

        tracing::debug!(
            total_results = results.page_info.total_results,
            returned_items = results.items.len(),
            "searched channels"
        );

        Ok(results)
    }

    /// Calls the `channels.list` API for a single channel id.
    ///
    /// `part` selects which parts of the channel resource are returned, e.g.
    /// `"snippet,contentDetails"`.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self))]
    pub async fn get_channel(
        &self,
        channel_id: &str,
        part: &str,
    ) -> eyre::Result<ChannelListResponse> {
        let query_params = [("part", part), ("id", channel_id)];

        let response = self.make_request("channels", &query_params).await?;

        let channels: ChannelListResponse = response
            .json()
            .await
            .context("parse YouTube channels API response as JSON")?;

        tracing::debug!(
            channel_id,
            returned_items = channels.items.len(),
            "fetched channel"
        );

        Ok(channels)
    }

    /// Returns whether the platform knows about a channel with this id.
    pub async fn channel_exists(&self, channel_id: &str) -> eyre::Result<bool> {
        let channels = self
            .get_channel(channel_id, "snippet,contentDetails")
            .await?;
        Ok(!channels.items.is_empty())
    }

    /// Calls the `playlistItems.list` API for one page of a playlist.
    ///
    /// # Arguments
    ///
    /// * `max_results` - Maximum number of items to return (1-50)
    /// * `page_token` - Optional page token for pagination
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlistItems/list>
    #[instrument(skip(self))]
    async fn list_playlist_items_internal(
        &self,
        playlist_id: &str,
        max_results: usize,
        page_token: Option<String>,
    ) -> eyre::Result<PlaylistItemListResponse> {
        let max_results_string = max_results.to_string();
        let mut query_params = vec![
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", max_results_string.as_str()),
        ];

        if let Some(ref token) = page_token {
            query_params.push(("pageToken", token.as_str()));
        }

        let response = self.make_request("playlistItems", &query_params).await?;

        let items: PlaylistItemListResponse = response
            .json()
            .await
            .context("parse YouTube playlistItems API response as JSON")?;

        tracing::debug!(
            total_results = items.page_info.total_results,
            returned_items = items.items.len(),
            has_next_page = items.next_page_token.is_some(),
            "fetched playlist items"
        );

        Ok(items)
    }

    /// Calls the `videos.list` API for a batch of video ids.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self, video_ids), fields(batch_size = video_ids.len()))]
    async fn list_videos_internal(&self, video_ids: &[String]) -> eyre::Result<VideoListResponse> {
        if video_ids.len() > MAX_PAGE_SIZE {
            eyre::bail!(
                "videos.list accepts at most {} ids per call, got {}",
                MAX_PAGE_SIZE,
                video_ids.len()
            );
        }

        let ids = video_ids.join(",");
        let query_params = [
            ("part", "statistics,contentDetails,snippet"),
            ("id", ids.as_str()),
        ];

        let response = self.make_request("videos", &query_params).await?;

        let videos: VideoListResponse = response
            .json()
            .await
            .context("parse YouTube videos API response as JSON")?;

        tracing::debug!(returned_items = videos.items.len(), "fetched video details");

        Ok(videos)
    }
}

impl VideoSource for YouTubeClient {
    async fn find_channel(&self, query: &str) -> eyre::Result<Option<ResolvedChannel>> {
        let results = self.search_channels(query, 1).await?;
        let Some(first) = results.items.into_iter().next() else {
            return Ok(None);
        };
        let channel_id = first
            .id
            .channel_id
            .ok_or_else(|| eyre::eyre!("channel search result has no channelId"))?;
        Ok(Some(ResolvedChannel {
            channel_id,
            display_name: first.snippet.title,
        }))
    }

    async fn uploads_playlist_id(&self, channel_id: &str) -> eyre::Result<Option<String>> {
        let channels = self.get_channel(channel_id, "contentDetails").await?;
        let Some(channel) = channels.items.into_iter().next() else {
            return Ok(None);
        };
        let details = channel
            .content_details
            .ok_or_else(|| eyre::eyre!("channel {} has no contentDetails", channel_id))?;
        Ok(Some(details.related_playlists.uploads))
    }

    async fn playlist_video_ids(
        &self,
        playlist_id: &str,
        max_results: usize,
        page_token: Option<String>,
    ) -> eyre::Result<Page<String>> {
        let page = self
            .list_playlist_items_internal(playlist_id, max_results, page_token)
            .await?;
        let ids = page
            .items
            .into_iter()
            .map(|item| item.snippet.resource_id.video_id)
            .collect();
        Ok((ids, page.next_page_token))
    }

    async fn video_details(&self, video_ids: &[String]) -> eyre::Result<Vec<serde_json::Value>> {
        let videos = self.list_videos_internal(video_ids).await?;
        Ok(videos.items.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::body::Bytes;
    use hyper::service::service_fn;
    use hyper::{Request, Response, StatusCode, body};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::convert::Infallible;
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Vec<(String, HashMap<String, String>)>>>;

    /// Spins up a local HTTP server that answers every request with `respond(path)` and records
    /// the path and query of each request it sees.
    async fn mock_api(respond: fn(&str) -> (u16, &'static str)) -> (YouTubeClient, Seen) {
        let socket = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let seen = Seen::default();
        let recorder = Arc::clone(&seen);
        tokio::spawn(async move {
            while let Ok((conn, _)) = socket.accept().await {
                let conn = hyper_util::rt::TokioIo::new(conn);
                let recorder = Arc::clone(&recorder);
                let service = service_fn(move |req: Request<body::Incoming>| {
                    let recorder = Arc::clone(&recorder);
                    async move {
                        let path = req.uri().path().to_string();
                        let query: HashMap<String, String> =
                            form_urlencoded::parse(req.uri().query().unwrap_or("").as_bytes())
                                .into_owned()
                                .collect();
                        recorder.lock().unwrap().push((path.clone(), query));
                        let (status, body) = respond(&path);
                        let mut response = Response::new(Full::<Bytes>::from(body));
                        *response.status_mut() = StatusCode::from_u16(status).unwrap();
                        Ok::<_, Infallible>(response)
                    }
                });
                tokio::spawn(
                    hyper::server::conn::http1::Builder::new().serve_connection(conn, service),
                );
            }
        });
        let client =
            YouTubeClient::with_base_url("test-key", format!("http://{addr}/youtube/v3/"));
        (client, seen)
    }

    #[tokio::test]
    async fn find_channel_searches_for_one_channel() {
        let (client, seen) = mock_api(|_| {
            (
                200,
                r#"{
                    "kind": "youtube#searchListResponse",
                    "pageInfo": {"totalResults": 7, "resultsPerPage": 1},
                    "items": [{
                        "id": {"kind": "youtube#channel", "channelId": "UC123"},
                        "snippet": {"title": "Groww", "description": "ignored"}
                    }]
                }"#,
            )
        })
        .await;

        let channel = client.find_channel("groww").await.unwrap();
        assert_eq!(
            channel,
            Some(ResolvedChannel {
                channel_id: "UC123".to_string(),
                display_name: "Groww".to_string(),
            })
        );

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (path, query) = &seen[0];
        assert_eq!(path, "/youtube/v3/search");
        assert_eq!(query["q"], "groww");
        assert_eq!(query["type"], "channel");
        assert_eq!(query["maxResults"], "1");
        assert_eq!(query["key"], "test-key");
    }

    #[tokio::test]
    async fn find_channel_without_results() {
        let (client, _) = mock_api(|_| {
            (200, r#"{"kind": "youtube#searchListResponse", "items": []}"#)
        })
        .await;
        assert_eq!(client.find_channel("nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn uploads_playlist_for_unknown_channel() {
        // channels.list omits `items` entirely when nothing matches
        let (client, seen) = mock_api(|_| {
            (
                200,
                r#"{
                    "kind": "youtube#channelListResponse",
                    "pageInfo": {"totalResults": 0, "resultsPerPage": 5}
                }"#,
            )
        })
        .await;
        assert_eq!(client.uploads_playlist_id("UCnope").await.unwrap(), None);
        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].0, "/youtube/v3/channels");
        assert_eq!(seen[0].1["part"], "contentDetails");
        assert_eq!(seen[0].1["id"], "UCnope");
    }

    #[tokio::test]
    async fn uploads_playlist_is_read_from_content_details() {
        let (client, _) = mock_api(|_| {
            (
                200,
                r#"{"items": [{
                    "id": "UC123",
                    "contentDetails": {"relatedPlaylists": {"likes": "", "uploads": "UU123"}}
                }]}"#,
            )
        })
        .await;
        assert_eq!(
            client.uploads_playlist_id("UC123").await.unwrap().as_deref(),
            Some("UU123")
        );
    }

    #[tokio::test]
    async fn playlist_page_carries_token_and_size() {
        let (client, seen) = mock_api(|_| {
            (
                200,
                r#"{
                    "items": [
                        {"snippet": {
                            "title": "a",
                            "resourceId": {"kind": "youtube#video", "videoId": "v1"}
                        }},
                        {"snippet": {
                            "title": "b",
                            "resourceId": {"kind": "youtube#video", "videoId": "v2"}
                        }}
                    ],
                    "nextPageToken": "CAIQAA"
                }"#,
            )
        })
        .await;

        let (ids, next) = client
            .playlist_video_ids("UU123", 2, Some("CAEQAA".to_string()))
            .await
            .unwrap();
        assert_eq!(Vec::from(ids), vec!["v1".to_string(), "v2".to_string()]);
        assert_eq!(next.as_deref(), Some("CAIQAA"));

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].0, "/youtube/v3/playlistItems");
        assert_eq!(seen[0].1["playlistId"], "UU123");
        assert_eq!(seen[0].1["maxResults"], "2");
        assert_eq!(seen[0].1["pageToken"], "CAEQAA");
    }

    #[tokio::test]
    async fn malformed_playlist_page_is_an_error() {
        let (client, _) = mock_api(|_| {
            (200, r#"{"items": [{"snippet": {"title": "no resource id"}}]}"#)
        })
        .await;
        assert!(client.playlist_video_ids("UU123", 50, None).await.is_err());
    }

    #[tokio::test]
    async fn video_details_joins_ids_and_keeps_items_raw() {
        let (client, seen) = mock_api(|_| {
            (200, r#"{"items": [{"id": "v1"}, {"id": "v2", "snippet": {}}]}"#)
        })
        .await;

        let ids = vec!["v1".to_string(), "v2".to_string()];
        let items = client.video_details(&ids).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["id"], "v2");

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].0, "/youtube/v3/videos");
        assert_eq!(seen[0].1["id"], "v1,v2");
        assert_eq!(seen[0].1["part"], "statistics,contentDetails,snippet");
    }

    #[tokio::test]
    async fn video_details_refuses_oversized_batches() {
        let (client, seen) = mock_api(|_| (200, r#"{"items": []}"#)).await;
        let ids: Vec<String> = (0..51).map(|i| format!("v{i}")).collect();
        assert!(client.video_details(&ids).await.is_err());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn error_status_is_reported_without_the_key() {
        let (client, _) = mock_api(|_| {
            (403, r#"{"error": {"errors": [{"reason": "quotaExceeded"}]}}"#)
        })
        .await;
        let err = client.find_channel("groww").await.unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("403"), "{message}");
        assert!(message.contains("quotaExceeded"), "{message}");
        assert!(!message.contains("test-key"), "{message}");
    }

    #[tokio::test]
    async fn channel_exists_checks_for_items() {
        let (client, _) = mock_api(|_| {
            (200, r#"{"items": [{"id": "UC1", "snippet": {"title": "One"}}]}"#)
        })
        .await;
        assert!(client.channel_exists("UC1").await.unwrap());
    }

    #[test]
    fn debug_output_hides_the_key() {
        let client = YouTubeClient::new("super-secret");
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret"), "{debug}");
        assert!(debug.contains(DEFAULT_BASE_URL), "{debug}");
    }
}
