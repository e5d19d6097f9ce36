//! Summary statistics over the collected records, rendered as plain-text tables.

use crate::record::VideoRecord;
use crate::scrape::ScrapeOutcome;
use std::fmt;
use std::path::Path;

const TOP_N: usize = 10;
const TITLE_PREVIEW: usize = 65;
const RULE_WIDTH: usize = 70;

/// Statistics over a non-empty collection of records.
#[derive(Debug)]
pub struct Analysis<'a> {
    pub total: usize,
    pub top_by_views: Vec<&'a VideoRecord>,
    pub top_by_engagement: Vec<&'a VideoRecord>,
    pub averages: Averages,
    pub durations: DurationHistogram,
}

/// Arithmetic means across the whole collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Averages {
    pub views: f64,
    pub likes: f64,
    pub comments: f64,
    pub duration_seconds: f64,
    pub engagement_rate: f64,
}

/// Counts of videos per length bucket.
///
/// The buckets are the half-open ranges in [`DurationHistogram::BUCKETS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationHistogram {
    pub counts: [usize; 4],
}

/// Computes the analysis, or `None` if there is nothing to analyze.
pub fn analyze(records: &[VideoRecord]) -> Option<Analysis<'_>> {
    if records.is_empty() {
        return None;
    }

    // sorts are stable, so ties keep collection order
    let mut top_by_views: Vec<&VideoRecord> = records.iter().collect();
    top_by_views.sort_by(|a, b| b.views.cmp(&a.views));
    top_by_views.truncate(TOP_N);

    let mut top_by_engagement: Vec<&VideoRecord> = records.iter().collect();
    top_by_engagement.sort_by(|a, b| b.engagement_rate().total_cmp(&a.engagement_rate()));
    top_by_engagement.truncate(TOP_N);

    Some(Analysis {
        total: records.len(),
        top_by_views,
        top_by_engagement,
        averages: Averages::of(records),
        durations: DurationHistogram::from_durations(records.iter().map(|r| r.duration_seconds)),
    })
}

impl Averages {
    fn of(records: &[VideoRecord]) -> Self {
        let n = records.len() as f64;
        let mean = |f: fn(&VideoRecord) -> f64| records.iter().map(f).sum::<f64>() / n;
        Self {
            views: mean(|r| r.views as f64),
            likes: mean(|r| r.likes as f64),
            comments: mean(|r| r.comments as f64),
            duration_seconds: mean(|r| r.duration_seconds as f64),
            engagement_rate: mean(VideoRecord::engagement_rate),
        }
    }
}

impl DurationHistogram {
    /// Bucket labels and their `[start, end)` bounds in seconds.
    pub const BUCKETS: [(&'static str, u64, Option<u64>); 4] = [
        ("0-5 minutes", 0, Some(300)),
        ("5-10 minutes", 300, Some(600)),
        ("10-15 minutes", 600, Some(900)),
        ("15+ minutes", 900, None),
    ];

    pub fn from_durations(durations: impl IntoIterator<Item = u64>) -> Self {
        let mut histogram = Self::default();
        for seconds in durations {
            let bucket = Self::BUCKETS
                .iter()
                .position(|&(_, start, end)| {
                    seconds >= start && end.is_none_or(|end| seconds < end)
                })
                .unwrap_or(Self::BUCKETS.len() - 1);
            histogram.counts[bucket] += 1;
        }
        histogram
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Share of videos in `bucket`, in percent.
    pub fn percentage(&self, bucket: usize) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.counts[bucket] as f64 / total as f64 * 100.0,
        }
    }
}

impl fmt::Display for DurationHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (label, _, _)) in Self::BUCKETS.iter().enumerate() {
            writeln!(
                f,
                "  {label}: {} ({:.1}%)",
                self.counts[i],
                self.percentage(i)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Analysis<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "QUICK ANALYSIS")?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;

        section(f, &format!("TOP {TOP_N} VIDEOS BY VIEWS:"))?;
        for (i, video) in self.top_by_views.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "{}. {}", i + 1, title_preview(&video.title))?;
            writeln!(f, "   Channel: {}", video.channel)?;
            writeln!(
                f,
                "   Views: {} | Likes: {}",
                thousands(video.views),
                thousands(video.likes)
            )?;
            writeln!(f, "   Duration: {}", minutes_seconds(video.duration_seconds as f64))?;
        }

        writeln!(f)?;
        section(f, &format!("TOP {TOP_N} VIDEOS BY ENGAGEMENT RATE:"))?;
        for (i, video) in self.top_by_engagement.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "{}. {}", i + 1, title_preview(&video.title))?;
            writeln!(f, "   Channel: {}", video.channel)?;
            writeln!(f, "   Engagement Rate: {:.2}%", video.engagement_rate())?;
            writeln!(
                f,
                "   Views: {} | Likes: {}",
                thousands(video.views),
                thousands(video.likes)
            )?;
        }

        writeln!(f)?;
        section(f, "OVERALL STATISTICS:")?;
        let avg = &self.averages;
        writeln!(f, "  Total Videos: {}", self.total)?;
        writeln!(f, "  Average Views: {}", thousands(avg.views.round() as u64))?;
        writeln!(f, "  Average Likes: {}", thousands(avg.likes.round() as u64))?;
        writeln!(f, "  Average Comments: {}", thousands(avg.comments.round() as u64))?;
        writeln!(f, "  Average Duration: {}", minutes_seconds(avg.duration_seconds))?;
        writeln!(f, "  Average Engagement Rate: {:.2}%", avg.engagement_rate)?;

        writeln!(f)?;
        section(f, "VIDEO LENGTH DISTRIBUTION:")?;
        write!(f, "{}", self.durations)
    }
}

/// Record counts per channel, most records first; ties keep the order channels first appear in.
pub fn channel_counts(records: &[VideoRecord]) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|(channel, _)| *channel == record.channel) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.channel.as_str(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// The end-of-run banner: how many channels worked, where the data went, and what is in it.
#[derive(Debug)]
pub struct RunSummary<'a> {
    pub outcome: &'a ScrapeOutcome,
    pub output: &'a Path,
}

impl fmt::Display for RunSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.outcome;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "SCRAPING COMPLETE")?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(
            f,
            "Successful channels: {}/{}",
            outcome.successful_channels, outcome.total_channels
        )?;
        writeln!(f, "Total videos collected: {}", outcome.records.len())?;
        writeln!(f, "Data saved to: {}", self.output.display())?;
        if !outcome.failed_channels.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "Failed channels ({}): {}",
                outcome.failed_channels.len(),
                outcome.failed_channels.join(", ")
            )?;
        }
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;

        writeln!(f)?;
        section(f, "SUMMARY BY CHANNEL:")?;
        for (channel, count) in channel_counts(&outcome.records) {
            writeln!(f, "  {channel}: {count} videos")?;
        }
        Ok(())
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(RULE_WIDTH))
}

fn title_preview(title: &str) -> String {
    let preview: String = title.chars().take(TITLE_PREVIEW).collect();
    format!("{preview}...")
}

/// `Xm Ys`, with whole minutes and seconds rounded.
fn minutes_seconds(seconds: f64) -> String {
    format!("{:.0}m {:.0}s", (seconds / 60.0).floor(), seconds % 60.0)
}

/// Formats a count with `,` between groups of three digits.
fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
