//! Extracts dialogue lines from free-form model output.
//!
//! Models wrap their JSON in prose or markdown fences more often than not.
//! Extraction order:
//! 1. a fenced block tagged `json` wins, and only its contents are parsed;
//! 2. otherwise the span from the first `{` to the last `}` is parsed.
//!
//! Malformed JSON is never repaired and lines are never truncated. Replies
//! with several brace regions may mis-extract; that is accepted.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use super::DialogueLine;

static JSON_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```json\s*([\s\S]*?)\s*```").expect("fence pattern is a valid regex")
});

/// Errors that can occur while extracting dialogue lines.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("No JSON object found in model response")]
    NoJsonFound,

    #[error("JSON parse error: {0}")]
    InvalidJson(String),

    #[error("Response JSON has no \"lines\" array")]
    MissingLines,

    #[error("Line {index} is invalid: {reason}")]
    InvalidLine { index: usize, reason: String },

    #[error("Response contains no dialogue lines")]
    EmptyLines,
}

/// Stateless extractor for model responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseExtractor;

impl ResponseExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts the ordered dialogue lines from a model reply.
    pub fn extract(&self, response: &str) -> Result<Vec<DialogueLine>, ExtractionError> {
        let candidate = Self::locate_json(response).ok_or(ExtractionError::NoJsonFound)?;
        let value: Value = serde_json::from_str(candidate)
            .map_err(|e| ExtractionError::InvalidJson(e.to_string()))?;
        Self::parse_lines(&value)
    }

    /// Finds the JSON candidate text without parsing it.
    pub fn locate_json(response: &str) -> Option<&str> {
        if let Some(captures) = JSON_FENCE.captures(response) {
            return captures.get(1).map(|m| m.as_str());
        }

        let start = response.find('{')?;
        let end = response.rfind('}')?;
        if end < start {
            return None;
        }
        Some(&response[start..=end])
    }

    fn parse_lines(value: &Value) -> Result<Vec<DialogueLine>, ExtractionError> {
        let items = value
            .get("lines")
            .and_then(Value::as_array)
            .ok_or(ExtractionError::MissingLines)?;

        if items.is_empty() {
            return Err(ExtractionError::EmptyLines);
        }

        items
            .iter()
            .enumerate()
            .map(|(index, item)| Self::parse_line(index, item))
            .collect()
    }

    fn parse_line(index: usize, item: &Value) -> Result<DialogueLine, ExtractionError> {
        if !item.is_object() {
            return Err(ExtractionError::InvalidLine {
                index,
                reason: "expected an object".to_string(),
            });
        }

        let field = |name: &str| -> Result<String, ExtractionError> {
            match item.get(name) {
                Some(Value::String(s)) => Ok(s.clone()),
                Some(_) => Err(ExtractionError::InvalidLine {
                    index,
                    reason: format!("field '{}' must be a string", name),
                }),
                None => Err(ExtractionError::InvalidLine {
                    index,
                    reason: format!("missing field '{}'", name),
                }),
            }
        };

        Ok(DialogueLine {
            speaker: field("speaker")?,
            text: field("text")?,
            translation: field("translation")?,
        })
    }
}
