//! Lenient normalization of model output into a recommendation set.
//!
//! The model is asked for a bare JSON array but routinely wraps it in code
//! fences, uses single quotes, or spreads it over many lines. Cleaning runs
//! in fixed order (trim, fence strip, quote rewrite, whitespace collapse),
//! then the text is parsed strictly. Anything that still fails to parse is
//! replaced by the fallback record, so callers always receive a non-empty
//! array whose records carry every schema key.
//!
//! The quote rewrite works on raw text without tracking string boundaries,
//! so apostrophes inside prose can be rewritten too.

use serde_json::{Map, Value};

use crate::{
    models::{
        recommendation::{NO_AIRPORT, NO_DATA},
        Recommendation, RecommendationSet,
    },
    services::completion::CompletionOutcome,
};

/// Schema keys every record must carry, with their fill value
const REQUIRED_KEYS: [(&str, &str); 6] = [
    ("place", NO_DATA),
    ("flight", NO_DATA),
    ("hotel", NO_DATA),
    ("reason", NO_DATA),
    ("local_price", NO_DATA),
    ("airport_code", NO_AIRPORT),
];

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// Normalizes a completion outcome. Failed completions go straight to the fallback.
pub fn normalize_outcome(outcome: &CompletionOutcome) -> RecommendationSet {
    match outcome {
        CompletionOutcome::Success(text) => normalize(text),
        CompletionOutcome::TimeoutFailure | CompletionOutcome::TransportFailure(_) => {
            tracing::warn!(
                message = %outcome.degraded_message(),
                "Completion failed, returning fallback recommendation"
            );
            RecommendationSet::fallback()
        }
    }
}

/// Cleans and parses raw model text. Never fails.
pub fn normalize(raw: &str) -> RecommendationSet {
    let cleaned = clean(raw);
    tracing::debug!(cleaned = %cleaned, "Cleaned completion text");

    let parsed: Value = match serde_json::from_str(&cleaned) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Completion text is not valid JSON, using fallback");
            return RecommendationSet::fallback();
        }
    };

    let recommendations = into_recommendations(parsed);
    if recommendations.is_empty() {
        tracing::warn!("Completion JSON holds no usable records, using fallback");
    }

    RecommendationSet::new(recommendations)
}

/// Applies every cleaning step in order
pub fn clean(raw: &str) -> String {
    let text = strip_code_fence(raw.trim());
    let text = quote_keys(&text);
    let text = quote_values(&text);
    collapse_whitespace(&text)
}

/// Extracts the body of a Markdown code fence.
///
/// A ```` ```json ```` fence wins over a bare one. A bare fence needs an
/// opening and a closing marker; a lone marker leaves the text unchanged.
pub fn strip_code_fence(text: &str) -> String {
    if let Some(start) = text.find(JSON_FENCE) {
        let rest = &text[start + JSON_FENCE.len()..];
        let body = rest.find(FENCE).map_or(rest, |end| &rest[..end]);
        return body.trim().to_string();
    }

    let mut parts = text.split(FENCE);
    let _before = parts.next();
    match (parts.next(), parts.next()) {
        (Some(body), Some(_)) => body.trim().to_string(),
        _ => text.to_string(),
    }
}

/// Rewrites `'key':` as `"key":`.
///
/// Scans left to right like a global regex replace: at each single quote it
/// looks for the next single quote and rewrites the pair only when a colon
/// follows immediately. Otherwise the quote is kept and the scan resumes
/// one character later.
pub fn quote_keys(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        let Some(offset) = rest.find('\'') else {
            out.push_str(rest);
            break;
        };

        out.push_str(&rest[..offset]);
        let open = pos + offset;
        let after_open = open + 1;

        match text[after_open..].find('\'') {
            Some(len) if text[after_open + len + 1..].starts_with(':') => {
                let close = after_open + len;
                out.push('"');
                out.push_str(&text[after_open..close]);
                out.push_str("\":");
                pos = close + 2;
            }
            _ => {
                out.push('\'');
                pos = after_open;
            }
        }
    }

    out
}

/// Rewrites `: 'value'` as `: "value"` when the closing quote is followed
/// by a comma, or by optional whitespace and a closing brace or bracket.
pub fn quote_values(text: &str) -> String {
    const OPENER: &str = ": '";

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        let Some(offset) = rest.find(OPENER) else {
            out.push_str(rest);
            break;
        };

        out.push_str(&rest[..offset]);
        let start = pos + offset;
        let body_start = start + OPENER.len();

        match text[body_start..].find('\'') {
            Some(len) if closes_scalar(&text[body_start + len + 1..]) => {
                let close = body_start + len;
                out.push_str(": \"");
                out.push_str(&text[body_start..close]);
                out.push('"');
                pos = close + 1;
            }
            _ => {
                out.push(':');
                pos = start + 1;
            }
        }
    }

    out
}

fn closes_scalar(after: &str) -> bool {
    if after.starts_with(',') {
        return true;
    }
    let trimmed = after.trim_start();
    trimmed.starts_with('}') || trimmed.starts_with(']')
}

/// Replaces each run of whitespace, newlines included, with one space
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }

    out
}

/// Shapes parsed JSON into recommendation records.
///
/// A lone object counts as a one-element array, non-object elements are
/// dropped, missing schema keys are filled and scalar values are rendered
/// as text.
fn into_recommendations(value: Value) -> Vec<Recommendation> {
    let elements = match value {
        Value::Array(elements) => elements,
        Value::Object(map) => vec![Value::Object(map)],
        _ => return Vec::new(),
    };

    elements
        .into_iter()
        .filter_map(|element| match element {
            Value::Object(map) => Some(fill_record(map)),
            _ => None,
        })
        .filter_map(|map| serde_json::from_value(Value::Object(map)).ok())
        .collect()
}

fn fill_record(mut map: Map<String, Value>) -> Map<String, Value> {
    for (key, default) in REQUIRED_KEYS {
        let text = match map.remove(key) {
            Some(value) => scalar_text(value).unwrap_or_else(|| default.to_string()),
            None => default.to_string(),
        };
        map.insert(key.to_string(), Value::String(text));
    }

    if let Some(total) = map.remove("total_cost") {
        if let Some(text) = scalar_text(total) {
            map.insert("total_cost".to_string(), Value::String(text));
        }
    }

    map
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        // Nested structures are kept as compact JSON text
        other => Some(other.to_string()),
    }
}
