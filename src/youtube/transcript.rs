use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::MetadataFetcher;
use crate::config::YouTubeConfig;
use crate::error::{Error, Result};

/// Placeholder returned when neither a transcript nor a description exists
pub const NO_TRANSCRIPT: &str = "No transcript available.";

/// Fetches a video transcript, falling back to the video description.
///
/// The primary endpoint needs no credential. Any primary-path failure is a
/// recovered condition: it is logged and swallowed, never surfaced to the
/// caller. A failure while fetching the fallback description does propagate.
pub struct TranscriptFetcher {
    client: Client,
    endpoint: String,
    metadata: MetadataFetcher,
}

#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    #[serde(default)]
    transcript: Option<String>,
}

impl TranscriptFetcher {
    pub fn new(config: &YouTubeConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            endpoint: config.transcript_endpoint.clone(),
            metadata: MetadataFetcher::new(config),
        }
    }

    /// Fetch the transcript for a video identifier.
    pub async fn fetch(&self, video_id: &str) -> Result<String> {
        match self.fetch_from_endpoint(video_id).await {
            Ok(transcript) if !transcript.trim().is_empty() => {
                debug!("Fetched transcript for {} ({} chars)", video_id, transcript.len());
                Ok(transcript)
            }
            Ok(_) => {
                warn!("Transcript endpoint returned nothing for {}, using video description", video_id);
                self.description_fallback(video_id).await
            }
            Err(e) => {
                warn!("Transcript fetch failed for {} ({}), using video description", video_id, e);
                self.description_fallback(video_id).await
            }
        }
    }

    async fn fetch_from_endpoint(&self, video_id: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("videoId", video_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "transcript endpoint error {}",
                response.status()
            )));
        }

        let body: TranscriptResponse = response.json().await?;
        Ok(body.transcript.unwrap_or_default())
    }

    async fn description_fallback(&self, video_id: &str) -> Result<String> {
        let info = self.metadata.fetch(video_id).await?;
        if info.description.trim().is_empty() {
            Ok(NO_TRANSCRIPT.to_string())
        } else {
            Ok(info.description)
        }
    }
}
