use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::{Transcript, TranscriptError, TranscriptSegment, TranscriptSource};
use crate::VideoId;

static CAPTION_TRACKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""captionTracks":(\[.*?\]),""#).unwrap());

static TEXT_SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<text start="([^"]*)" dur="([^"]*)"[^>]*>([^<]*)</text>"#).unwrap()
});

/// Fetches transcripts by scraping the caption track metadata that YouTube
/// embeds in its watch pages, then downloading the referenced timed-text
/// document. No API key required.
pub struct YtTranscriptClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode")]
    language_code: Option<String>,
}

impl YtTranscriptClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: "https://www.youtube.com".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_watch_page(&self, video_id: &VideoId) -> Result<String, TranscriptError> {
        let html = self
            .client
            .get(format!("{}/watch?v={}", self.base_url, video_id))
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await?
            .text()
            .await?;

        Ok(html)
    }
}

impl Default for YtTranscriptClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptSource for YtTranscriptClient {
    async fn fetch_transcript(&self, video_id: &VideoId) -> Result<Transcript, TranscriptError> {
        let html = self
            .fetch_watch_page(video_id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to fetch watch page"))?;

        let tracks = extract_caption_tracks(&html, video_id)?;
        let track = select_track(&tracks)
            .ok_or_else(|| TranscriptError::NotAvailable(video_id.to_string()))?;

        let xml = self.client.get(&track.base_url).send().await?.text().await?;

        let segments = parse_timedtext(&xml);
        if segments.is_empty() {
            return Err(TranscriptError::NotAvailable(video_id.to_string()));
        }

        tracing::debug!(%video_id, segments = segments.len(), "Fetched transcript");
        Ok(Transcript::new(segments))
    }
}

fn extract_caption_tracks(
    html: &str,
    video_id: &VideoId,
) -> Result<Vec<CaptionTrack>, TranscriptError> {
    if !html.contains(r#""captionTracks":"#) {
        return Err(TranscriptError::TranscriptsDisabled(video_id.to_string()));
    }

    let raw = CAPTION_TRACKS_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .ok_or(TranscriptError::Parse("malformed captionTracks payload"))?;

    let tracks: Vec<CaptionTrack> = serde_json::from_str(raw.as_str()).map_err(|e| {
        tracing::error!(error = %e, "Failed to deserialize caption tracks");
        TranscriptError::Parse("invalid captionTracks JSON")
    })?;

    if tracks.is_empty() {
        return Err(TranscriptError::NotAvailable(video_id.to_string()));
    }

    Ok(tracks)
}

/// Prefers an English track when one exists, otherwise takes the first.
fn select_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    tracks
        .iter()
        .find(|track| {
            track
                .language_code
                .as_deref()
                .is_some_and(|code| code.starts_with("en"))
        })
        .or_else(|| tracks.first())
}

fn parse_timedtext(xml: &str) -> Vec<TranscriptSegment> {
    TEXT_SEGMENT_RE
        .captures_iter(xml)
        .filter_map(|caps| {
            let start = caps.get(1)?.as_str().parse().ok()?;
            let duration = caps.get(2)?.as_str().parse().ok()?;
            let text = decode_entities(caps.get(3)?.as_str());
            Some(TranscriptSegment {
                start,
                duration,
                text,
            })
        })
        .collect()
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;#39;", "'")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
