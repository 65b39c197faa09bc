use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChatMessage, Llm, ProviderKind};
use crate::config::{LlmSettings, ProviderSettings};
use crate::error::{Error, Result};

/// Temperature for the single-prompt variant; the backing API has no chat
/// history, so generation is kept near-deterministic.
const GEMINI_TEMPERATURE: f32 = 0.2;

/// Groq provider: chat-completions semantics with a bearer credential
pub struct GroqProvider {
    settings: ProviderSettings,
    temperature: f32,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GroqRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    #[serde(default)]
    choices: Vec<GroqChoice>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: ChatMessage,
}

impl GroqProvider {
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        if settings.groq.api_key.is_none() {
            return Err(Error::Configuration("GROQ_API_KEY is not configured".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            settings: settings.groq.clone(),
            temperature: settings.temperature,
            client,
        })
    }
}

#[async_trait]
impl Llm for GroqProvider {
    async fn complete(&self, messages: Vec<ChatMessage>, max_tokens: u32) -> Result<String> {
        let api_key = self
            .settings
            .api_key
            .as_ref()
            .ok_or_else(|| Error::Configuration("GROQ_API_KEY is not configured".to_string()))?;

        let request = GroqRequest {
            model: self.settings.model.clone(),
            messages,
            max_tokens,
            temperature: self.temperature,
        };

        debug!("Sending request to Groq model {}", self.settings.model);

        let response = self
            .client
            .post(&self.settings.endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Groq request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!("Groq API error {}: {}", status, text)));
        }

        let body: GroqResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("malformed Groq response: {}", e)))?;

        let content = body
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| Error::Provider("no choices in Groq response".to_string()))?;

        Ok(content)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Groq
    }
}

/// Gemini provider: single-prompt semantics with a query credential.
///
/// The backing API has no multi-turn chat concept, so the message sequence
/// is concatenated into one prompt before submission.
pub struct GeminiProvider {
    settings: ProviderSettings,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

impl GeminiProvider {
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        if settings.gemini.api_key.is_none() {
            return Err(Error::Configuration("GEMINI_API_KEY is not configured".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            settings: settings.gemini.clone(),
            client,
        })
    }
}

/// Flatten a message sequence into one prompt, contents in order separated
/// by a blank line
fn join_messages(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|message| message.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[async_trait]
impl Llm for GeminiProvider {
    async fn complete(&self, messages: Vec<ChatMessage>, max_tokens: u32) -> Result<String> {
        let api_key = self
            .settings
            .api_key
            .as_ref()
            .ok_or_else(|| Error::Configuration("GEMINI_API_KEY is not configured".to_string()))?;

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: join_messages(&messages),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                max_output_tokens: max_tokens,
                temperature: GEMINI_TEMPERATURE,
            },
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.settings.endpoint, self.settings.model, api_key
        );

        debug!("Sending request to Gemini model {}", self.settings.model);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!("Gemini API error {}: {}", status, text)));
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("malformed Gemini response: {}", e)))?;

        let candidate = body
            .candidates
            .first()
            .ok_or_else(|| Error::Provider("no candidates in Gemini response".to_string()))?;

        let part = candidate
            .content
            .parts
            .first()
            .ok_or_else(|| Error::Provider("no content parts in Gemini candidate".to_string()))?;

        Ok(part.text.trim().to_string())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }
}
