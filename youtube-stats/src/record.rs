//! The flat, persisted form of a video and how it is derived from API data.

use crate::duration::parse_duration;
use crate::youtube_api::videos::Video;
use eyre::Context;
use serde::{Deserialize, Serialize};

/// Descriptions are cut to this many characters.
pub const DESCRIPTION_LIMIT: usize = 200;

/// One collected video, as written to the output file.
///
/// Field names and order are the output format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    /// The channel's display name as resolved by search.
    pub channel: String,
    pub title: String,
    pub description: String,
    /// ISO 8601, exactly as the API reported it.
    pub published_at: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub duration_seconds: u64,
    pub thumbnail: String,
    pub url: String,
}

impl VideoRecord {
    /// Builds a record from one raw `videos.list` item.
    ///
    /// Fails if the item lacks any required field or carries a counter that is not a
    /// non-negative integer. Absent counters are zero.
    pub fn from_raw(channel: &str, raw: serde_json::Value) -> eyre::Result<Self> {
        let video: Video = serde_json::from_value(raw).context("video item is missing fields")?;
        Self::from_video(channel, video)
    }

    pub fn from_video(channel: &str, video: Video) -> eyre::Result<Self> {
        let stats = &video.statistics;
        let views = parse_count(stats.view_count.as_deref()).context("viewCount")?;
        let likes = parse_count(stats.like_count.as_deref()).context("likeCount")?;
        let comments = parse_count(stats.comment_count.as_deref()).context("commentCount")?;

        Ok(Self {
            url: watch_url(&video.id),
            channel: channel.to_string(),
            title: video.snippet.title,
            description: video
                .snippet
                .description
                .chars()
                .take(DESCRIPTION_LIMIT)
                .collect(),
            published_at: video.snippet.published_at,
            views,
            likes,
            comments,
            duration_seconds: parse_duration(&video.content_details.duration),
            thumbnail: video.snippet.thumbnails.high.url,
            video_id: video.id,
        })
    }

    /// `(likes + comments) / views` as a percentage, and zero for unwatched videos.
    pub fn engagement_rate(&self) -> f64 {
        if self.views == 0 {
            return 0.0;
        }
        (self.likes + self.comments) as f64 / self.views as f64 * 100.0
    }
}

fn parse_count(count: Option<&str>) -> eyre::Result<u64> {
    match count {
        None => Ok(0),
        Some(count) => count
            .parse()
            .with_context(|| format!("invalid count {count:?}")),
    }
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://youtube.com/watch?v={video_id}")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    pub(crate) fn raw_video(id: &str) -> serde_json::Value {
        json!({
            "kind": "youtube#video",
            "id": id,
            "snippet": {
                "publishedAt": "2024-03-01T10:15:00Z",
                "title": format!("Video {id}"),
                "description": "About money",
                "thumbnails": {
                    "default": {"url": format!("https://i.ytimg.com/vi/{id}/default.jpg")},
                    "high": {"url": format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg")}
                }
            },
            "contentDetails": {"duration": "PT12M5S"},
            "statistics": {"viewCount": "1000", "likeCount": "50", "commentCount": "7"}
        })
    }

    pub(crate) fn record(
        views: u64,
        likes: u64,
        comments: u64,
        duration_seconds: u64,
    ) -> VideoRecord {
        VideoRecord {
            video_id: "abc".to_string(),
            channel: "Channel".to_string(),
            title: "Title".to_string(),
            description: String::new(),
            published_at: "2024-01-01T00:00:00Z".to_string(),
            views,
            likes,
            comments,
            duration_seconds,
            thumbnail: String::new(),
            url: watch_url("abc"),
        }
    }

    #[test]
    fn builds_record_from_raw_item() {
        let record = VideoRecord::from_raw("Groww", raw_video("v1")).unwrap();
        assert_eq!(
            record,
            VideoRecord {
                video_id: "v1".to_string(),
                channel: "Groww".to_string(),
                title: "Video v1".to_string(),
                description: "About money".to_string(),
                published_at: "2024-03-01T10:15:00Z".to_string(),
                views: 1000,
                likes: 50,
                comments: 7,
                duration_seconds: 725,
                thumbnail: "https://i.ytimg.com/vi/v1/hqdefault.jpg".to_string(),
                url: "https://youtube.com/watch?v=v1".to_string(),
            }
        );
    }

    #[test]
    fn absent_counters_default_to_zero() {
        let mut raw = raw_video("v1");
        raw["statistics"] = json!({"viewCount": "12"});
        let record = VideoRecord::from_raw("Groww", raw).unwrap();
        assert_eq!((record.views, record.likes, record.comments), (12, 0, 0));
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        let mut raw = raw_video("v1");
        raw["snippet"]["thumbnails"]
            .as_object_mut()
            .unwrap()
            .remove("high");
        assert!(VideoRecord::from_raw("Groww", raw).is_err());

        let mut raw = raw_video("v1");
        raw.as_object_mut().unwrap().remove("contentDetails");
        assert!(VideoRecord::from_raw("Groww", raw).is_err());

        let mut raw = raw_video("v1");
        raw.as_object_mut().unwrap().remove("statistics");
        assert!(VideoRecord::from_raw("Groww", raw).is_err());
    }

    #[test]
    fn garbage_counters_are_rejected() {
        let mut raw = raw_video("v1");
        raw["statistics"]["viewCount"] = json!("-4");
        assert!(VideoRecord::from_raw("Groww", raw).is_err());
    }

    #[test]
    fn published_at_is_kept_verbatim() {
        for published_at in ["2024-03-01T10:15:00.000Z", "2024-03-01T10:15:00"] {
            let mut raw = raw_video("v1");
            raw["snippet"]["publishedAt"] = json!(published_at);
            let record = VideoRecord::from_raw("Groww", raw).unwrap();
            assert_eq!(record.published_at, published_at);
        }
    }

    #[test]
    fn description_is_cut_by_characters() {
        let mut raw = raw_video("v1");
        raw["snippet"]["description"] = json!("₹".repeat(250));
        let record = VideoRecord::from_raw("Groww", raw).unwrap();
        assert_eq!(record.description.chars().count(), DESCRIPTION_LIMIT);
        assert_eq!(record.description, "₹".repeat(200));
    }

    #[test]
    fn engagement_of_unwatched_video_is_zero() {
        assert_eq!(record(0, 10, 5, 60).engagement_rate(), 0.0);
        assert_eq!(record(0, 0, 0, 60).engagement_rate(), 0.0);
    }

    #[test]
    fn engagement_rate() {
        assert_approx_eq!(f64, record(200, 10, 5, 60).engagement_rate(), 7.5);
        assert_approx_eq!(f64, record(3, 1, 0, 60).engagement_rate(), 100.0 / 3.0);
    }

    #[test]
    fn serializes_fields_in_output_order() {
        let json = serde_json::to_string(&record(1, 2, 3, 4)).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"video_id":"abc","channel":"Channel","title":"Title","description":"","#,
                r#""published_at":"2024-01-01T00:00:00Z","views":1,"likes":2,"comments":3,"#,
                r#""duration_seconds":4,"thumbnail":"","url":"https://youtube.com/watch?v=abc"}"#,
            )
        );
    }
}
