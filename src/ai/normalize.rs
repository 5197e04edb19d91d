//! Extracts assistant text from loosely structured provider responses.
//!
//! Providers and model families disagree on where the generated text lives,
//! so extraction walks a fixed, ordered list of known shapes and returns the
//! first match. `choices[0].message.content` is checked before
//! `choices[0].text` because some providers populate both and the chat field
//! is authoritative.

use crate::models::{NormalizedResult, ResponseShape};
use crate::{Error, Result};
use serde_json::Value;

/// Outcome of a shape that recognized the response.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShapeMatch {
    Text(String),
    Blocked(String),
}

type Matcher = fn(&Value) -> Option<ShapeMatch>;

const SHAPES: &[(ResponseShape, Matcher)] = &[
    (ResponseShape::ChatMessage, chat_message),
    (ResponseShape::LegacyCompletion, legacy_completion),
    (ResponseShape::Output, output),
    (ResponseShape::GeneratedText, generated_text),
    (ResponseShape::VertexCandidates, vertex_candidates),
];

/// Vertex reports a candidate with no text and no finish reason this way.
const NO_TEXT_REASON: &str = "NO_TEXT_GENERATED";

/// Extract the assistant text from a raw response.
///
/// Fails with [`Error::GenerationBlocked`] when the provider answered but
/// declined to generate, and with [`Error::UnrecognizedResponseShape`]
/// (carrying `raw`) when no known shape matches.
pub fn extract(raw: Value) -> Result<NormalizedResult> {
    for (shape, matcher) in SHAPES {
        match matcher(&raw) {
            Some(ShapeMatch::Text(text)) => {
                tracing::debug!("Response matched shape {}", shape);
                return Ok(NormalizedResult {
                    text,
                    shape: *shape,
                });
            }
            Some(ShapeMatch::Blocked(reason)) => {
                tracing::warn!("Generation blocked ({}): {}", shape, reason);
                return Err(Error::GenerationBlocked { reason });
            }
            None => continue,
        }
    }

    tracing::error!("Unexpected response format: {}", raw);
    Err(Error::UnrecognizedResponseShape(raw))
}

fn first_choice(raw: &Value) -> Option<&Value> {
    raw.get("choices")?.as_array()?.first()
}

fn chat_message(raw: &Value) -> Option<ShapeMatch> {
    let content = first_choice(raw)?.get("message")?.get("content")?.as_str()?;
    Some(ShapeMatch::Text(content.trim().to_string()))
}

fn legacy_completion(raw: &Value) -> Option<ShapeMatch> {
    let text = first_choice(raw)?.get("text")?.as_str()?;
    Some(ShapeMatch::Text(text.trim().to_string()))
}

fn output(raw: &Value) -> Option<ShapeMatch> {
    let text = raw.as_object()?.get("output")?.as_str()?;
    Some(ShapeMatch::Text(text.to_string()))
}

fn generated_text(raw: &Value) -> Option<ShapeMatch> {
    let text = raw.as_array()?.first()?.get("generated_text")?.as_str()?;
    Some(ShapeMatch::Text(text.to_string()))
}

fn vertex_candidates(raw: &Value) -> Option<ShapeMatch> {
    let candidate = raw
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first());

    let Some(candidate) = candidate else {
        // Prompt rejected before any candidate was produced.
        return prompt_block_reason(raw).map(|reason| ShapeMatch::Blocked(reason.to_string()));
    };

    let text: String = candidate
        .pointer("/content/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    let text = text.trim();
    if !text.is_empty() {
        return Some(ShapeMatch::Text(text.to_string()));
    }

    let reason = candidate
        .get("finishReason")
        .or_else(|| candidate.get("finish_reason"))
        .and_then(Value::as_str)
        .or_else(|| prompt_block_reason(raw))
        .unwrap_or(NO_TEXT_REASON);
    Some(ShapeMatch::Blocked(reason.to_string()))
}

fn prompt_block_reason(raw: &Value) -> Option<&str> {
    raw.pointer("/promptFeedback/blockReason")?.as_str()
}
