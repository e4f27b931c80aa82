//! YouTube caption source built on `yt-transcript-rs`.

use super::{TranscriptList, TranscriptSource, TranscriptSourceError, TranscriptTrack};
use crate::retry::retry_once;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, instrument};
use yt_transcript_rs::api::YouTubeTranscriptApi;

type SourceResult<T> = std::result::Result<T, TranscriptSourceError>;

/// Transcript source backed by YouTube's public caption endpoints.
///
/// Tracks are only reported for the configured languages, since those are
/// the only ones the fetcher will ever select.
pub struct YoutubeTranscriptSource {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
    timeout: Duration,
}

impl YoutubeTranscriptSource {
    /// Create a source whose requests time out after `timeout`.
    pub fn new(timeout: Duration, languages: Vec<String>) -> SourceResult<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(provider_error)?;
        Ok(Self {
            api,
            languages,
            timeout,
        })
    }

    async fn bounded<T, E, Fut>(&self, request: Fut) -> SourceResult<T>
    where
        Fut: Future<Output = std::result::Result<T, E>>,
        E: std::fmt::Display,
    {
        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| TranscriptSourceError::Timeout(self.timeout))?
            .map_err(provider_error)
    }

    async fn list_once(&self, video_id: &str) -> SourceResult<TranscriptList> {
        let tracks = {
            let available = self.bounded(self.api.list_transcripts(video_id)).await?;
            self.matching_tracks(video_id, |codes, generated| {
                if generated {
                    available.find_generated_transcript(codes).is_ok()
                } else {
                    available.find_manually_created_transcript(codes).is_ok()
                }
            })
        };

        // Title and length only feed the prompt, so a failure here is not fatal.
        let details = self
            .bounded(self.api.fetch_video_details(video_id))
            .await
            .inspect_err(|e| debug!("No video details for {}: {}", video_id, e))
            .ok();

        Ok(TranscriptList {
            video_id: video_id.to_string(),
            title: details.as_ref().map(|d| d.title.clone()),
            duration: details.as_ref().map(|d| d.length_seconds),
            tracks,
        })
    }

    /// Tracks of the configured languages for which `has_track` holds,
    /// manual before generated within each language.
    fn matching_tracks<F>(&self, video_id: &str, has_track: F) -> Vec<TranscriptTrack>
    where
        F: Fn(&[&str], bool) -> bool,
    {
        self.languages
            .iter()
            .flat_map(|code| [(code, false), (code, true)])
            .filter(|(code, generated)| has_track(&[code.as_str()][..], *generated))
            .map(|(code, is_generated)| TranscriptTrack {
                video_id: video_id.to_string(),
                language_code: code.clone(),
                is_generated,
            })
            .collect()
    }

    async fn fetch_once(&self, track: &TranscriptTrack) -> SourceResult<Vec<(String, f64, f64)>> {
        // A generated track is only selected when no manual one exists for its
        // language, so the API's manual-first lookup returns the same track.
        let codes = [track.language_code.as_str()];
        let fetched = self
            .bounded(self.api.fetch_transcript(&track.video_id, &codes, false))
            .await?;

        Ok(fetched
            .snippets
            .into_iter()
            .map(|s| (s.text, s.start, s.duration))
            .collect())
    }
}

fn provider_error(e: impl std::fmt::Display) -> TranscriptSourceError {
    TranscriptSourceError::Provider(e.to_string())
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    #[instrument(skip(self))]
    async fn list(&self, video_id: &str) -> SourceResult<TranscriptList> {
        let list = retry_once(
            "Transcript listing",
            || self.list_once(video_id),
            TranscriptSourceError::is_transient,
        )
        .await?;
        debug!("{} matching caption track(s)", list.tracks.len());
        Ok(list)
    }

    #[instrument(skip(self, track), fields(language = %track.language_code))]
    async fn fetch(&self, track: &TranscriptTrack) -> SourceResult<Vec<(String, f64, f64)>> {
        let entries = retry_once(
            "Transcript download",
            || self.fetch_once(track),
            TranscriptSourceError::is_transient,
        )
        .await?;
        debug!("Fetched {} caption snippets", entries.len());
        Ok(entries)
    }
}
