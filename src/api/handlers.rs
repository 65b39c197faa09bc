//! API request handlers

use serde_json::Value;
use tracing::info;

use super::models::{AnalyzeRequest, AnalyzeResponse};
use crate::config::Config;
use crate::coverage::analyze_coverage;
use crate::error::{Error, Result};
use crate::youtube::{extract_video_id, MetadataFetcher, TranscriptFetcher};

/// Transcript preview length in the response body
const TRANSCRIPT_PREVIEW_CHARS: usize = 500;

/// Handle health check requests.
///
/// Reports whether each credential is configured; never the values.
pub async fn health_check(config: &Config) -> Value {
    serde_json::json!({
        "status": "healthy",
        "service": "coverage-analyzer",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "credentials": {
            "youtubeApiKey": config.youtube.api_key.is_some(),
            "groqApiKey": config.llm.groq.api_key.is_some(),
            "geminiApiKey": config.llm.gemini.api_key.is_some(),
        }
    })
}

/// Handle an analysis request: one strictly sequential chain of upstream
/// calls, no retries, no parallelism.
pub async fn analyze(config: &Config, payload: &Value) -> Result<AnalyzeResponse> {
    let request = AnalyzeRequest::from_value(payload)?;

    let video_id = extract_video_id(&request.youtube_url).ok_or_else(|| {
        Error::Validation(format!(
            "could not extract a video id from: {}",
            request.youtube_url
        ))
    })?;

    info!("🎬 Analyzing video {} for topic '{}'", video_id, request.topic);

    let video_info = MetadataFetcher::new(&config.youtube).fetch(&video_id).await?;
    let transcript = TranscriptFetcher::new(&config.youtube).fetch(&video_id).await?;

    let subtopics = request.subtopics();
    let analysis = analyze_coverage(
        &transcript,
        &subtopics,
        request.provider_name(),
        &config.llm,
    )
    .await;

    info!(
        "✅ Coverage analysis complete for {} ({} subtopics, overall {}%)",
        video_id,
        analysis.subtopic_analysis.len(),
        analysis.overall_score
    );

    Ok(AnalyzeResponse {
        success: true,
        provider: request.provider_name().to_string(),
        video_info,
        transcript: transcript_preview(&transcript),
        subtopics,
        analysis,
    })
}

/// First 500 characters of the transcript, with an ellipsis when longer
fn transcript_preview(transcript: &str) -> String {
    if transcript.chars().count() <= TRANSCRIPT_PREVIEW_CHARS {
        return transcript.to_string();
    }
    let preview: String = transcript.chars().take(TRANSCRIPT_PREVIEW_CHARS).collect();
    format!("{}...", preview)
}
