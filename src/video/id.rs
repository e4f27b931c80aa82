//! YouTube video id extraction.

use url::Url;

/// Extract the video id from a YouTube URL.
///
/// Recognizes `youtube.com/watch?v=<id>` (with or without `www.`) and
/// `youtu.be/<id>`. Any other shape yields `None`.
pub fn extract_video_id(input: &str) -> Option<String> {
    let url = Url::parse(input.trim()).ok()?;

    match url.host_str()? {
        "youtube.com" | "www.youtube.com" if url.path() == "/watch" => url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .filter(|id| !id.is_empty()),
        "youtu.be" => {
            let id = url.path().trim_start_matches('/');
            if id.is_empty() {
                None
            } else {
                Some(id.to_string())
            }
        }
        _ => None,
    }
}
