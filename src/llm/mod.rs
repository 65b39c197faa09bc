pub mod providers;

use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LlmSettings;
use crate::error::{Error, Result};

/// LLM provider types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProviderKind {
    Groq,
    Gemini,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "groq",
            ProviderKind::Gemini => "gemini",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    /// Resolve a provider name. Unrecognized names fail before any network
    /// call is made.
    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(ProviderKind::Groq),
            "gemini" => Ok(ProviderKind::Gemini),
            other => Err(Error::Configuration(format!("unknown LLM provider: {}", other))),
        }
    }
}

/// Chat message for LLM communication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Trait for LLM providers.
///
/// Both variants expose the same contract: submit an ordered message
/// sequence, get back the model's trimmed text.
#[async_trait]
pub trait Llm: Send + Sync {
    async fn complete(&self, messages: Vec<ChatMessage>, max_tokens: u32) -> Result<String>;
    fn kind(&self) -> ProviderKind;
}

/// Create an LLM instance for the given provider
pub fn create_llm(kind: ProviderKind, settings: &LlmSettings) -> Result<Box<dyn Llm>> {
    match kind {
        ProviderKind::Groq => Ok(Box::new(providers::GroqProvider::new(settings)?)),
        ProviderKind::Gemini => Ok(Box::new(providers::GeminiProvider::new(settings)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_name_parsing() {
        assert_eq!("groq".parse::<ProviderKind>().unwrap(), ProviderKind::Groq);
        assert_eq!("gemini".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert_eq!("  Groq ".parse::<ProviderKind>().unwrap(), ProviderKind::Groq);
    }

    #[test]
    fn test_unknown_provider_is_configuration_error() {
        let err = "openai".parse::<ProviderKind>().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_create_llm_requires_credentials() {
        // Default settings carry no API keys; the factory fails before any
        // network call.
        let settings = LlmSettings::default();
        assert!(create_llm(ProviderKind::Groq, &settings).is_err());
        assert!(create_llm(ProviderKind::Gemini, &settings).is_err());
    }
}
