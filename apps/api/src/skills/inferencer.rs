//! Skill Inferencer — asks the model for a skill list and validates its answer.

use std::sync::Arc;

use serde_json::Value;

use crate::errors::AppError;
use crate::llm_client::{CompletionBackend, OutputShape};
use crate::skills::prompts::SKILL_EXTRACTION_PROMPT;

/// Resume text beyond this many characters is not sent to the model.
pub const MAX_RESUME_CHARS: usize = 10_000;

#[derive(Clone)]
pub struct SkillInferencer {
    backend: Arc<dyn CompletionBackend>,
}

impl SkillInferencer {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    pub fn build_prompt(&self, resume_text: &str) -> String {
        SKILL_EXTRACTION_PROMPT
            .replace("{max_chars}", &MAX_RESUME_CHARS.to_string())
            .replace("{resume_text}", truncate_chars(resume_text, MAX_RESUME_CHARS))
    }

    /// Sends the prompt with the output constrained to an array of strings.
    /// Returns the raw, unvalidated model text.
    pub async fn invoke(&self, prompt: &str) -> Result<String, AppError> {
        self.backend
            .complete(prompt, OutputShape::StringArray)
            .await
            .map_err(|e| AppError::AiProcessing(e.to_string()))
    }
}

/// First `max` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Validates raw model output as a JSON array of strings, preserving order.
pub fn parse_skill_list(raw: &str) -> Result<Vec<String>, AppError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|_| AppError::AiResponseUnparseable {
            raw: raw.to_string(),
        })?;

    let Value::Array(items) = value else {
        return Err(AppError::AiResponseMalformed(
            "AI response is not a JSON array.".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::String(skill) => Ok(skill),
            other => Err(AppError::AiResponseMalformed(format!(
                "AI response item {idx} is not a string: {other}"
            ))),
        })
        .collect()
}
