//! Transcript retrieval.
//!
//! A [`TranscriptSource`] lists and downloads caption tracks; the
//! [`TranscriptFetcher`] picks a track by language preference and assembles
//! a [`VideoTranscript`].

mod youtube;

pub use youtube::YoutubeTranscriptSource;

use crate::error::{NotesError, Result};
use crate::video::{extract_video_id, TranscriptSegment, VideoInfo, VideoTranscript};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Errors reported by a transcript source.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptSourceError {
    #[error("{0}")]
    Provider(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

impl TranscriptSourceError {
    /// Whether the failure may go away when the request is repeated.
    pub fn is_transient(&self) -> bool {
        matches!(self, TranscriptSourceError::Timeout(_))
    }
}

/// One caption track offered for a video.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptTrack {
    pub video_id: String,
    /// Language code, e.g. `de` or `en`.
    pub language_code: String,
    /// Whether the track was produced by speech recognition.
    pub is_generated: bool,
}

/// The caption tracks available for one video, plus whatever metadata the source returned.
#[derive(Debug, Clone, Default)]
pub struct TranscriptList {
    pub video_id: String,
    pub title: Option<String>,
    pub duration: Option<u32>,
    pub tracks: Vec<TranscriptTrack>,
}

impl TranscriptList {
    /// Find a manually-created track for the first matching language code.
    pub fn find_manually_created_transcript(
        &self,
        language_codes: &[&str],
    ) -> Option<&TranscriptTrack> {
        self.find(language_codes, false)
    }

    /// Find an auto-generated track for the first matching language code.
    pub fn find_generated_transcript(&self, language_codes: &[&str]) -> Option<&TranscriptTrack> {
        self.find(language_codes, true)
    }

    fn find(&self, language_codes: &[&str], generated: bool) -> Option<&TranscriptTrack> {
        language_codes.iter().find_map(|code| {
            self.tracks
                .iter()
                .find(|t| t.is_generated == generated && t.language_code == *code)
        })
    }

    /// Select a track: every language as a manual track first, then every
    /// language as a generated one.
    pub fn select(&self, languages: &[String]) -> Option<&TranscriptTrack> {
        languages
            .iter()
            .find_map(|lang| self.find_manually_created_transcript(&[lang.as_str()]))
            .or_else(|| {
                languages
                    .iter()
                    .find_map(|lang| self.find_generated_transcript(&[lang.as_str()]))
            })
    }
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// List the caption tracks available for a video id.
    async fn list(
        &self,
        video_id: &str,
    ) -> std::result::Result<TranscriptList, TranscriptSourceError>;

    /// Download a track as `(text, start, duration)` entries in source order.
    async fn fetch(
        &self,
        track: &TranscriptTrack,
    ) -> std::result::Result<Vec<(String, f64, f64)>, TranscriptSourceError>;
}

/// Fetches a transcript for a video URL using a language-preference chain.
pub struct TranscriptFetcher {
    source: Arc<dyn TranscriptSource>,
    languages: Vec<String>,
}

impl TranscriptFetcher {
    /// Create a fetcher with the given source and preferred languages (most preferred first).
    pub fn new(source: Arc<dyn TranscriptSource>, languages: Vec<String>) -> Self {
        Self { source, languages }
    }

    /// Fetch the transcript for a YouTube URL.
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<VideoTranscript> {
        let video_id =
            extract_video_id(url).ok_or_else(|| NotesError::NoVideoId(url.to_string()))?;
        let info = VideoInfo::new(url)?;

        let list = self
            .source
            .list(&video_id)
            .await
            .map_err(|e| NotesError::TranscriptUnavailable(e.to_string()))?;
        debug!("{} caption track(s) for {}", list.tracks.len(), video_id);

        let track = list.select(&self.languages).ok_or_else(|| {
            NotesError::TranscriptUnavailable(format!(
                "no transcript in [{}] for video {}",
                self.languages.join(", "),
                video_id
            ))
        })?;
        info!(
            "Using {} transcript ({})",
            if track.is_generated { "generated" } else { "manual" },
            track.language_code
        );

        let entries = self
            .source
            .fetch(track)
            .await
            .map_err(|e| NotesError::TranscriptUnavailable(e.to_string()))?;

        let segments: Vec<TranscriptSegment> = entries
            .into_iter()
            .filter_map(|(text, start, duration)| TranscriptSegment::new(text, start, duration))
            .collect();

        if segments.is_empty() {
            return Err(NotesError::TranscriptUnavailable(format!(
                "transcript for video {} is empty",
                video_id
            )));
        }

        let info = info
            .with_title(list.title.clone())
            .with_duration(list.duration)
            .with_transcript(Some(track.language_code.clone()));

        Ok(VideoTranscript::new(info, segments))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn track(code: &str, generated: bool) -> TranscriptTrack {
        TranscriptTrack {
            video_id: "abc".to_string(),
            language_code: code.to_string(),
            is_generated: generated,
        }
    }

    struct FakeSource {
        list: std::result::Result<TranscriptList, String>,
        entries: Vec<(String, f64, f64)>,
        fetched: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn with_tracks(tracks: Vec<TranscriptTrack>) -> Self {
            Self {
                list: Ok(TranscriptList {
                    video_id: "abc".to_string(),
                    title: Some("A talk".to_string()),
                    duration: Some(120),
                    tracks,
                }),
                entries: vec![
                    ("Hallo".to_string(), 0.0, 1.5),
                    ("Welt".to_string(), 1.5, 2.0),
                ],
                fetched: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TranscriptSource for FakeSource {
        async fn list(
            &self,
            _video_id: &str,
        ) -> std::result::Result<TranscriptList, TranscriptSourceError> {
            match &self.list {
                Ok(list) => Ok(list.clone()),
                Err(msg) => Err(TranscriptSourceError::Provider(msg.clone())),
            }
        }

        async fn fetch(
            &self,
            track: &TranscriptTrack,
        ) -> std::result::Result<Vec<(String, f64, f64)>, TranscriptSourceError> {
            self.fetched
                .lock()
                .unwrap()
                .push(format!("{}/{}", track.language_code, track.is_generated));
            Ok(self.entries.clone())
        }
    }

    fn languages() -> Vec<String> {
        vec!["de".to_string(), "en".to_string()]
    }

    #[test]
    fn test_preference_chain() {
        let list = |tracks| TranscriptList {
            tracks,
            ..Default::default()
        };

        let all = list(vec![
            track("en", true),
            track("de", true),
            track("en", false),
            track("de", false),
        ]);
        assert_eq!(all.select(&languages()), Some(&track("de", false)));

        let manual_en = list(vec![track("de", true), track("en", false)]);
        assert_eq!(manual_en.select(&languages()), Some(&track("en", false)));

        let generated = list(vec![track("en", true), track("de", true)]);
        assert_eq!(generated.select(&languages()), Some(&track("de", true)));

        let only_generated_en = list(vec![track("en", true), track("fr", false)]);
        assert_eq!(
            only_generated_en.select(&languages()),
            Some(&track("en", true))
        );

        let none = list(vec![track("fr", false)]);
        assert_eq!(none.select(&languages()), None);
    }

    #[test]
    fn test_find_by_kind() {
        let list = TranscriptList {
            tracks: vec![track("de", true), track("en", false)],
            ..Default::default()
        };
        assert_eq!(
            list.find_manually_created_transcript(&["de", "en"]),
            Some(&track("en", false))
        );
        assert_eq!(
            list.find_generated_transcript(&["en", "de"]),
            Some(&track("de", true))
        );
        assert_eq!(list.find_generated_transcript(&["en"]), None);
    }

    #[test]
    fn test_only_timeouts_are_transient() {
        assert!(TranscriptSourceError::Timeout(Duration::from_secs(30)).is_transient());
        let disabled = TranscriptSourceError::Provider("Subtitles are disabled".to_string());
        assert!(!disabled.is_transient());
    }

    #[tokio::test]
    async fn test_fetch_selects_generated_english() {
        let source = Arc::new(FakeSource::with_tracks(vec![track("en", true)]));
        let fetcher = TranscriptFetcher::new(source.clone(), languages());

        let transcript = fetcher
            .fetch("https://www.youtube.com/watch?v=abc")
            .await
            .unwrap();

        assert_eq!(*source.fetched.lock().unwrap(), vec!["en/true".to_string()]);
        assert_eq!(transcript.segments().len(), 2);
        assert_eq!(transcript.full_text(), "Hallo Welt");
        let info = transcript.video_info();
        assert!(info.transcript_available());
        assert_eq!(info.language(), Some("en"));
        assert_eq!(info.title(), Some("A talk"));
        assert_eq!(info.duration(), Some(120));
    }

    #[tokio::test]
    async fn test_fetch_without_video_id() {
        let source = Arc::new(FakeSource::with_tracks(vec![]));
        let fetcher = TranscriptFetcher::new(source, languages());
        let err = fetcher.fetch("https://vimeo.com/1").await.unwrap_err();
        assert!(matches!(err, NotesError::NoVideoId(_)));
    }

    #[tokio::test]
    async fn test_fetch_without_matching_language() {
        let source = Arc::new(FakeSource::with_tracks(vec![track("fr", false)]));
        let fetcher = TranscriptFetcher::new(source.clone(), languages());
        let err = fetcher.fetch("https://youtu.be/abc").await.unwrap_err();
        assert!(matches!(err, NotesError::TranscriptUnavailable(_)));
        assert!(source.fetched.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_source_errors_become_unavailable() {
        let mut source = FakeSource::with_tracks(vec![]);
        source.list = Err("transcripts disabled".to_string());
        let fetcher = TranscriptFetcher::new(Arc::new(source), languages());
        let err = fetcher.fetch("https://youtu.be/abc").await.unwrap_err();
        match err {
            NotesError::TranscriptUnavailable(msg) => assert!(msg.contains("disabled")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_entries_are_dropped() {
        let mut source = FakeSource::with_tracks(vec![track("de", false)]);
        source.entries = vec![(" ".to_string(), 0.0, 1.0)];
        let fetcher = TranscriptFetcher::new(Arc::new(source), languages());
        let err = fetcher.fetch("https://youtu.be/abc").await.unwrap_err();
        assert!(matches!(err, NotesError::TranscriptUnavailable(_)));
    }
}
