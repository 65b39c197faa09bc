//! Best-effort JSON extraction from LLM responses.
//!
//! Models asked for "only JSON" still wrap answers in code fences or prose
//! often enough that extraction has to be lenient. The heuristics live
//! behind this one boundary so their failure modes stay unit-testable
//! without any network involvement.

use serde_json::Value;

/// Strip Markdown code-fence markers (```json and ```) from a response
pub fn strip_code_fences(content: &str) -> String {
    content.replace("```json", "").replace("```", "").trim().to_string()
}

/// Extract a JSON value from a raw LLM response.
///
/// Fences are stripped first, then a direct parse is attempted. If that
/// fails, the cleaned text is searched for the first substring that looks
/// like a JSON array or object: a greedy match from the first `[`/`{` to
/// the last `]`/`}`. Returns `None` when nothing parses — never an error.
pub fn extract_json(response: &str) -> Option<Value> {
    let cleaned = strip_code_fences(response);
    if cleaned.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(&cleaned) {
        return Some(value);
    }

    extract_embedded(&cleaned)
}

/// Greedy bracket search: whichever of `[` or `{` appears first opens the
/// candidate, the last matching close bracket ends it.
fn extract_embedded(text: &str) -> Option<Value> {
    let array_start = text.find('[');
    let object_start = text.find('{');

    let (start, close) = match (array_start, object_start) {
        (Some(a), Some(o)) if a < o => (a, ']'),
        (Some(a), None) => (a, ']'),
        (_, Some(o)) => (o, '}'),
        (None, None) => return None,
    };

    let end = text.rfind(close)?;
    if end <= start {
        return None;
    }

    serde_json::from_str(&text[start..=end]).ok()
}
