/// Topic Coverage Analyzer - Rust Implementation
///
/// Scores how well a YouTube video's transcript covers a caller-supplied
/// list of subtopics, using interchangeable LLM providers to judge each
/// subtopic and an arithmetic mean for the aggregate.

pub mod api;
pub mod config;
pub mod coverage;
pub mod error;
pub mod llm;
pub mod youtube;

// Re-export main types for easy access
pub use crate::config::Config;
pub use crate::coverage::{analyze_coverage, CoverageItem, CoverageReport};
pub use crate::error::{Error, Result};
pub use crate::llm::{create_llm, ChatMessage, Llm, ProviderKind};
pub use crate::youtube::{extract_video_id, MetadataFetcher, TranscriptFetcher, VideoInfo};
