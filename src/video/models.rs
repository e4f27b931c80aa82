//! Data models for videos and their transcripts.

use crate::error::{NotesError, Result};
use url::Url;

/// Metadata about a video.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    url: Url,
    title: Option<String>,
    duration: Option<u32>,
    transcript_available: bool,
    language: Option<String>,
}

impl VideoInfo {
    /// Create video info for an absolute URL.
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url.trim())
            .map_err(|e| NotesError::NoVideoId(format!("{} ({})", url, e)))?;
        Ok(Self {
            url,
            title: None,
            duration: None,
            transcript_available: false,
            language: None,
        })
    }

    /// Set the video title.
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title.filter(|t| !t.trim().is_empty());
        self
    }

    /// Set the video duration in seconds.
    pub fn with_duration(mut self, duration: Option<u32>) -> Self {
        self.duration = duration;
        self
    }

    /// Mark the transcript as available in the given language.
    pub fn with_transcript(mut self, language: Option<String>) -> Self {
        self.transcript_available = true;
        self.language = language;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Duration in seconds, if known.
    pub fn duration(&self) -> Option<u32> {
        self.duration
    }

    pub fn transcript_available(&self) -> bool {
        self.transcript_available
    }

    /// ISO language code of the transcript, if one was fetched.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

/// A single timed snippet of spoken text.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    text: String,
    start: f64,
    duration: f64,
}

impl TranscriptSegment {
    /// Create a segment. Returns `None` for blank text; negative times are clamped to zero.
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            text,
            start: non_negative(start),
            duration: non_negative(duration),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Start offset in seconds.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// A complete video transcript.
#[derive(Debug, Clone)]
pub struct VideoTranscript {
    video_info: VideoInfo,
    segments: Vec<TranscriptSegment>,
    full_text: String,
}

impl VideoTranscript {
    /// Create a transcript whose full text is derived from its segments.
    pub fn new(video_info: VideoInfo, segments: Vec<TranscriptSegment>) -> Self {
        Self::with_full_text(video_info, segments, String::new())
    }

    /// Create a transcript with an explicit full text.
    ///
    /// An empty `full_text` falls back to the space-joined segment texts.
    pub fn with_full_text(
        video_info: VideoInfo,
        segments: Vec<TranscriptSegment>,
        full_text: String,
    ) -> Self {
        let full_text = if full_text.is_empty() {
            segments
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            full_text
        };

        Self {
            video_info,
            segments,
            full_text,
        }
    }

    pub fn video_info(&self) -> &VideoInfo {
        &self.video_info
    }

    pub fn segments(&self) -> &[TranscriptSegment] {
        &self.segments
    }

    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// Render the transcript as `[MM:SS] text` lines.
    pub fn timestamped_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| format!("[{}] {}", format_timestamp(s.start), s.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Format seconds as `MM:SS`, truncating fractional seconds.
///
/// Minutes are not wrapped into hours, so long videos yield e.g. `125:00`.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = non_negative(seconds);
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{:02}:{:02}", minutes, secs)
}
