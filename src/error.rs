use thiserror::Error;

/// Error taxonomy for the analysis pipeline.
///
/// `Validation` is surfaced to clients as a 400; everything else that
/// escapes the request pipeline becomes a 500. The coverage analyzer and
/// the transcript fallback recover locally and never let their failures
/// reach the HTTP boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("video not found: {0}")]
    NotFound(String),

    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("LLM provider error: {0}")]
    Provider(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Upstream(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
