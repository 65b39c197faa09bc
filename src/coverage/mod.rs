pub mod extract;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::LlmSettings;
use crate::error::{Error, Result};
use crate::llm::{create_llm, ChatMessage, Llm, ProviderKind};

/// Transcripts are cut at this many characters to respect provider token
/// limits. The policy is deterministic and character-based, never
/// sentence-aware.
pub const TRANSCRIPT_CHAR_LIMIT: usize = 10_000;

/// Token budget for one short JSON object per subtopic
const COMPLETION_TOKEN_BUDGET: u32 = 2000;

const TRUNCATION_MARKER: &str = "... [transcript truncated]";
const MISSING_EVIDENCE: &str = "No evidence provided";
const FAILURE_EVIDENCE: &str = "Failed to generate coverage analysis.";
const FAILURE_SUMMARY: &str = "Coverage analysis failed.";

/// Coverage judgment for a single subtopic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoverageItem {
    pub subtopic: String,
    pub coverage_score: u8,
    pub covered: bool,
    pub evidence: String,
}

/// Normalized coverage report returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    pub overall_score: u8,
    pub subtopic_analysis: Vec<CoverageItem>,
    pub summary: String,
}

/// Score how well a transcript covers each subtopic.
///
/// Never fails: a garbled or missing LLM answer is expected operational
/// behavior, so every internal failure (provider misconfiguration, call
/// failure, unparseable response) degrades to a zero-score report with one
/// item per requested subtopic.
pub async fn analyze_coverage(
    transcript: &str,
    subtopics: &[String],
    provider: &str,
    settings: &LlmSettings,
) -> CoverageReport {
    let result = match provider
        .parse::<ProviderKind>()
        .and_then(|kind| create_llm(kind, settings))
    {
        Ok(llm) => analyze_with_llm(llm.as_ref(), transcript, subtopics).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => report,
        Err(e) => {
            warn!("Coverage analysis failed ({}), returning zero-score report", e);
            failure_report(subtopics)
        }
    }
}

/// Run the analysis against an already-constructed LLM client
pub async fn analyze_with_llm(
    llm: &dyn Llm,
    transcript: &str,
    subtopics: &[String],
) -> Result<CoverageReport> {
    let excerpt = truncate_transcript(transcript);
    let prompt = build_prompt(&excerpt, subtopics);

    let messages = vec![
        ChatMessage {
            role: "system".to_string(),
            content: "You are a precise evaluator. Respond with valid JSON only, no prose."
                .to_string(),
        },
        ChatMessage {
            role: "user".to_string(),
            content: prompt,
        },
    ];

    let response = llm.complete(messages, COMPLETION_TOKEN_BUDGET).await?;
    debug!("LLM coverage response received ({} chars)", response.len());

    let items = normalize_items(extract::extract_json(&response));
    if items.is_empty() {
        return Err(Error::Provider("LLM response contained no coverage items".to_string()));
    }

    let overall_score = overall_score(&items);
    let covered = items.iter().filter(|item| item.covered).count();

    Ok(CoverageReport {
        overall_score,
        summary: format!(
            "{} of {} subtopics covered (overall score {}%)",
            covered,
            items.len(),
            overall_score
        ),
        subtopic_analysis: items,
    })
}

/// Cut the transcript at the character limit, appending a marker when cut
fn truncate_transcript(transcript: &str) -> String {
    if transcript.chars().count() <= TRANSCRIPT_CHAR_LIMIT {
        return transcript.to_string();
    }
    let excerpt: String = transcript.chars().take(TRANSCRIPT_CHAR_LIMIT).collect();
    format!("{}{}", excerpt, TRUNCATION_MARKER)
}

/// Build the evaluation prompt, embedding the transcript and subtopic list
fn build_prompt(transcript: &str, subtopics: &[String]) -> String {
    let subtopic_list = subtopics
        .iter()
        .map(|subtopic| format!("- {}", subtopic))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Evaluate how well the following transcript covers each subtopic.

Subtopics:
{subtopic_list}

Transcript:
{transcript}

Return ONLY a JSON array with one object per subtopic, in the same order, using this exact structure:
[{{"subtopic": "subtopic name", "coverageScore": 0-100, "evidence": "short quote or paraphrase from the transcript"}}]

Rules:
1. coverageScore is an integer between 0 and 100
2. Base every score only on the transcript text above
3. Do not add commentary outside the JSON array"#
    )
}

/// Normalize whatever items the LLM returned, however many and however
/// named. The count is deliberately not reconciled against the requested
/// subtopics; only the failure path guarantees one item per request.
fn normalize_items(parsed: Option<Value>) -> Vec<CoverageItem> {
    let Some(Value::Array(raw_items)) = parsed else {
        return Vec::new();
    };

    raw_items
        .into_iter()
        .map(|item| {
            let coverage_score = coerce_score(item.get("coverageScore"));
            CoverageItem {
                subtopic: item
                    .get("subtopic")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                coverage_score,
                covered: coverage_score >= 50,
                evidence: item
                    .get("evidence")
                    .and_then(Value::as_str)
                    .filter(|evidence| !evidence.trim().is_empty())
                    .unwrap_or(MISSING_EVIDENCE)
                    .to_string(),
            }
        })
        .collect()
}

/// Coerce a score to an integer in [0, 100]; missing or non-numeric → 0
fn coerce_score(value: Option<&Value>) -> u8 {
    let score = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    score.round().clamp(0.0, 100.0) as u8
}

/// Rounded arithmetic mean of the item scores; callers guard the empty case
fn overall_score(items: &[CoverageItem]) -> u8 {
    let sum: u32 = items.iter().map(|item| item.coverage_score as u32).sum();
    (sum as f64 / items.len() as f64).round() as u8
}

/// Zero-score report with exactly one item per requested subtopic
fn failure_report(subtopics: &[String]) -> CoverageReport {
    CoverageReport {
        overall_score: 0,
        subtopic_analysis: subtopics
            .iter()
            .map(|subtopic| CoverageItem {
                subtopic: subtopic.clone(),
                coverage_score: 0,
                covered: false,
                evidence: FAILURE_EVIDENCE.to_string(),
            })
            .collect(),
        summary: FAILURE_SUMMARY.to_string(),
    }
}
