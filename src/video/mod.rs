//! Video metadata, transcript models and URL parsing.

mod id;
mod models;

pub use id::extract_video_id;
pub use models::{format_timestamp, TranscriptSegment, VideoInfo, VideoTranscript};
