use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::VideoInfo;
use crate::config::YouTubeConfig;
use crate::error::{Error, Result};

/// Fetches video metadata from the YouTube Data API.
///
/// A single failed call propagates immediately; there are no retries.
#[derive(Clone)]
pub struct MetadataFetcher {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: VideoSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoSnippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: String,
    #[serde(default)]
    thumbnails: HashMap<String, Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl MetadataFetcher {
    pub fn new(config: &YouTubeConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: config.api_endpoint.clone(),
        }
    }

    /// Fetch title, description, channel, publish date and thumbnail for a
    /// video identifier.
    pub async fn fetch(&self, video_id: &str) -> Result<VideoInfo> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| Error::Configuration("YOUTUBE_API_KEY is not configured".to_string()))?;

        let url = format!(
            "{}/videos?part=snippet&id={}&key={}",
            self.endpoint, video_id, api_key
        );

        debug!("Fetching metadata for video {}", video_id);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!("YouTube API error {}: {}", status, text)));
        }

        let data: VideoListResponse = response.json().await?;

        let item = data
            .items
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("no video matches id {}", video_id)))?;

        let snippet = item.snippet;
        let thumbnail = snippet
            .thumbnails
            .get("high")
            .or_else(|| snippet.thumbnails.get("medium"))
            .or_else(|| snippet.thumbnails.get("default"))
            .map(|t| t.url.clone())
            .unwrap_or_default();

        Ok(VideoInfo {
            video_id: video_id.to_string(),
            title: snippet.title,
            description: snippet.description,
            channel_title: snippet.channel_title,
            published_at: snippet.published_at,
            thumbnail,
        })
    }
}
