//! API data models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coverage::CoverageReport;
use crate::error::{Error, Result};
use crate::youtube::VideoInfo;

/// Provider used when the request does not name one
pub const DEFAULT_PROVIDER: &str = "groq";

/// Analysis request body.
///
/// Parsed leniently from JSON and validated explicitly so that missing
/// fields surface as a 400, before any network call is made.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeRequest {
    pub youtube_url: String,
    pub topic: String,
    pub custom_subtopics: Vec<String>,
    pub provider: Option<String>,
}

impl AnalyzeRequest {
    pub fn from_value(payload: &Value) -> Result<Self> {
        let request: Self = serde_json::from_value(payload.clone())
            .map_err(|e| Error::Validation(format!("malformed request body: {}", e)))?;
        request.validate()?;
        Ok(request)
    }

    fn validate(&self) -> Result<()> {
        if self.youtube_url.trim().is_empty() {
            return Err(Error::Validation("youtubeUrl is required".to_string()));
        }
        if self.topic.trim().is_empty() {
            return Err(Error::Validation("topic is required".to_string()));
        }
        if self.subtopics().is_empty() {
            return Err(Error::Validation(
                "customSubtopics must contain at least one non-empty subtopic".to_string(),
            ));
        }
        Ok(())
    }

    /// Requested subtopics, trimmed, with empty entries dropped; order is
    /// preserved
    pub fn subtopics(&self) -> Vec<String> {
        self.custom_subtopics
            .iter()
            .map(|subtopic| subtopic.trim().to_string())
            .filter(|subtopic| !subtopic.is_empty())
            .collect()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.as_deref().unwrap_or(DEFAULT_PROVIDER)
    }
}

/// Successful analysis response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub provider: String,
    pub video_info: VideoInfo,
    pub transcript: String,
    pub subtopics: Vec<String>,
    pub analysis: CoverageReport,
}
