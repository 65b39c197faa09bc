use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for the Topic Coverage Analyzer
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// YouTube metadata and transcript settings
    pub youtube: YouTubeConfig,

    /// LLM provider settings
    pub llm: LlmSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port for the HTTP API
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YouTubeConfig {
    /// YouTube Data API key
    pub api_key: Option<String>,

    /// Base endpoint for the YouTube Data API
    pub api_endpoint: String,

    /// Transcript-fetch endpoint (no credential required)
    pub transcript_endpoint: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

/// Settings shared by the LLM providers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Groq (chat-completions) provider
    pub groq: ProviderSettings,

    /// Gemini (single-prompt) provider
    pub gemini: ProviderSettings,

    /// Temperature for generation (low for consistent scoring)
    pub temperature: f32,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// API key (read from the environment at startup)
    pub api_key: Option<String>,

    /// API endpoint
    pub endpoint: String,

    /// Model to use
    pub model: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_endpoint: "https://www.googleapis.com/youtube/v3".to_string(),
            transcript_endpoint: "https://youtubetotranscript.com/api/transcript".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            groq: ProviderSettings {
                api_key: None,
                endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
                model: "llama-3.3-70b-versatile".to_string(),
            },
            gemini: ProviderSettings {
                api_key: None,
                endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
                model: "gemini-1.5-flash".to_string(),
            },
            temperature: 0.2,
            timeout_seconds: 30,
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: String::new(),
            model: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to environment variables
    pub fn load() -> Result<Self> {
        let config_paths = [
            "coverage-analyzer.toml",
            "config/coverage-analyzer.toml",
            "~/.config/coverage-analyzer/config.toml",
        ];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str::<Config>(&config_str) {
                    Ok(mut config) => {
                        tracing::info!("📄 Loaded configuration from: {}", path);
                        config.apply_env();
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| Error::Configuration(format!("cannot read config file {}: {}", path, e)))?;
        let mut config: Config = toml::from_str(&config_str)
            .map_err(|e| Error::Configuration(format!("cannot parse config file {}: {}", path, e)))?;
        config.apply_env();
        Ok(config)
    }

    /// Overlay credentials and overrides from environment variables.
    ///
    /// Absent credentials are not an error here: they surface only when the
    /// corresponding upstream call is attempted.
    fn apply_env(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }

        if let Ok(api_key) = std::env::var("YOUTUBE_API_KEY") {
            self.youtube.api_key = Some(api_key);
        }

        if let Ok(endpoint) = std::env::var("TRANSCRIPT_ENDPOINT") {
            self.youtube.transcript_endpoint = endpoint;
        }

        if let Ok(api_key) = std::env::var("GROQ_API_KEY") {
            self.llm.groq.api_key = Some(api_key);
        }

        if let Ok(model) = std::env::var("GROQ_MODEL") {
            self.llm.groq.model = model;
        }

        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            self.llm.gemini.api_key = Some(api_key);
        }

        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            self.llm.gemini.model = model;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Configuration("server port must be greater than 0".to_string()));
        }

        if self.youtube.timeout_seconds == 0 || self.llm.timeout_seconds == 0 {
            return Err(Error::Configuration("timeout_seconds must be greater than 0".to_string()));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(Error::Configuration("llm temperature must be between 0.0 and 2.0".to_string()));
        }

        Ok(())
    }

    /// Get runtime configuration summary (no secret values)
    pub fn summary(&self) -> String {
        format!(
            "Topic Coverage Analyzer Configuration:\n\
            - Port: {}\n\
            - YouTube API key configured: {}\n\
            - Transcript endpoint: {}\n\
            - Groq model: {} (key configured: {})\n\
            - Gemini model: {} (key configured: {})\n\
            - Request timeout: {}s",
            self.server.port,
            self.youtube.api_key.is_some(),
            self.youtube.transcript_endpoint,
            self.llm.groq.model,
            self.llm.groq.api_key.is_some(),
            self.llm.gemini.model,
            self.llm.gemini.api_key.is_some(),
            self.llm.timeout_seconds,
        )
    }
}
