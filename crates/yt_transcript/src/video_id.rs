use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::transcript::TranscriptError;

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?|shorts|live)/|.*[?&]v=)|youtu\.be/)([0-9A-Za-z_-]{11})",
    )
    .unwrap()
});

/// An 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Extracts a video id from a watch URL, a short URL, an embed URL,
    /// or a bare 11-character id.
    ///
    /// # Examples of accepted input
    /// - `https://www.youtube.com/watch?v=dQw4w9WgXcQ`
    /// - `https://youtu.be/dQw4w9WgXcQ`
    /// - `https://www.youtube.com/embed/dQw4w9WgXcQ`
    /// - `dQw4w9WgXcQ`
    pub fn parse(input: &str) -> Result<Self, TranscriptError> {
        let input = input.trim();

        if input.len() == 11 && input.bytes().all(Self::is_id_byte) {
            return Ok(Self(input.to_string()));
        }

        VIDEO_ID_RE
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
            .ok_or(TranscriptError::InvalidUrl)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_id_byte(b: u8) -> bool {
        b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_watch_url() {
        let id = VideoId::parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn parses_watch_url_with_extra_params() {
        let id = VideoId::parse("https://www.youtube.com/watch?app=desktop&v=dQw4w9WgXcQ&t=42s")
            .unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn parses_short_url() {
        let id = VideoId::parse("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn parses_embed_url() {
        let id = VideoId::parse("https://www.youtube.com/embed/dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn parses_shorts_url() {
        let id = VideoId::parse("https://www.youtube.com/shorts/dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn parses_bare_id() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn rejects_url_without_id() {
        let result = VideoId::parse("https://example.com/watch?v=tooshort");
        assert!(matches!(result, Err(TranscriptError::InvalidUrl)));
    }

    #[test]
    fn rejects_garbage() {
        let result = VideoId::parse("not a youtube url at all");
        assert!(matches!(result, Err(TranscriptError::InvalidUrl)));
    }

    #[test]
    fn rejects_empty() {
        let result = VideoId::parse("");
        assert!(matches!(result, Err(TranscriptError::InvalidUrl)));
    }
}
