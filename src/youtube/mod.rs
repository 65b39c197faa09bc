pub mod metadata;
pub mod transcript;

pub use metadata::MetadataFetcher;
pub use transcript::TranscriptFetcher;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// YouTube video metadata, fetched once per request and never persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
    pub published_at: String,
    pub thumbnail: String,
}

/// Extract an 11-character video identifier from a YouTube URL.
///
/// Accepts watch-query (`youtube.com/watch?v=ID`), short-link
/// (`youtu.be/ID`), embed (`/embed/ID`), bare-path (`/v/ID`, `/shorts/ID`)
/// forms, and a raw identifier. Returns `None` for anything else; callers
/// treat that as invalid input, not a system failure.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    if is_valid_id(input) {
        return Some(input.to_string());
    }

    let url = parse_url(input)?;
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");

    let candidate = match host {
        "youtu.be" => url.path_segments()?.next().map(str::to_string),
        "youtube.com" | "music.youtube.com" | "youtube-nocookie.com" => {
            let mut segments = url.path_segments()?;
            match segments.next() {
                Some("watch") => url
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned()),
                Some("embed") | Some("v") | Some("shorts") | Some("live") => {
                    segments.next().map(str::to_string)
                }
                _ => None,
            }
        }
        _ => None,
    }?;

    is_valid_id(&candidate).then(|| candidate)
}

/// A video identifier is exactly 11 characters of `[A-Za-z0-9_-]`
fn is_valid_id(candidate: &str) -> bool {
    Regex::new(r"^[A-Za-z0-9_-]{11}$")
        .map(|re| re.is_match(candidate))
        .unwrap_or(false)
}

/// Parse a URL string, tolerating a missing scheme
fn parse_url(input: &str) -> Option<Url> {
    if let Ok(url) = Url::parse(input) {
        return Some(url);
    }
    if input.contains("youtube.com") || input.contains("youtu.be") || input.contains("youtube-nocookie.com") {
        return Url::parse(&format!("https://{}", input)).ok();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn test_extract_from_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some(ID.to_string())
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"),
            Some(ID.to_string())
        );
    }

    #[test]
    fn test_extract_from_short_link() {
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ"), Some(ID.to_string()));
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ?si=abc123"),
            Some(ID.to_string())
        );
    }

    #[test]
    fn test_extract_from_embed_and_bare_paths() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some(ID.to_string())
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/v/dQw4w9WgXcQ"),
            Some(ID.to_string())
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/dQw4w9WgXcQ"),
            Some(ID.to_string())
        );
    }

    #[test]
    fn test_extract_without_scheme() {
        assert_eq!(extract_video_id("youtube.com/watch?v=dQw4w9WgXcQ"), Some(ID.to_string()));
        assert_eq!(extract_video_id("youtu.be/dQw4w9WgXcQ"), Some(ID.to_string()));
    }

    #[test]
    fn test_extract_raw_id() {
        assert_eq!(extract_video_id("dQw4w9WgXcQ"), Some(ID.to_string()));
    }

    #[test]
    fn test_all_shapes_agree() {
        let shapes = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "dQw4w9WgXcQ",
        ];
        for shape in shapes {
            assert_eq!(extract_video_id(shape), Some(ID.to_string()), "shape: {}", shape);
        }
    }

    #[test]
    fn test_malformed_inputs() {
        assert_eq!(extract_video_id(""), None);
        assert_eq!(extract_video_id("not a url"), None);
        assert_eq!(extract_video_id("https://example.com/watch?v=dQw4w9WgXcQ"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/watch"), None);
        // Wrong identifier length
        assert_eq!(extract_video_id("https://youtu.be/short"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=tooLongIdentifier"), None);
        // Invalid characters
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9Wg!cQ"), None);
    }
}
