//! Per-request pipeline: validate → extract → prompt → invoke → parse.
//!
//! Stages advance linearly. Any stage may fail; `Failed` and `Succeeded` are
//! terminal.

use std::fmt;

use axum::extract::multipart::{Multipart, MultipartRejection};
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::skills::extractor::extract_text;
use crate::skills::inferencer::{parse_skill_list, SkillInferencer};
use crate::skills::upload::read_resume;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Validated,
    TextExtracted,
    PromptBuilt,
    AiInvoked,
    ResponseParsed,
    Succeeded,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Succeeded | Stage::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Validated => "validated",
            Stage::TextExtracted => "text_extracted",
            Stage::PromptBuilt => "prompt_built",
            Stage::AiInvoked => "ai_invoked",
            Stage::ResponseParsed => "response_parsed",
            Stage::Succeeded => "succeeded",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

pub struct SkillPipeline {
    inferencer: SkillInferencer,
    max_upload_bytes: usize,
    trail: Vec<Stage>,
}

impl SkillPipeline {
    pub fn new(inferencer: SkillInferencer, max_upload_bytes: usize) -> Self {
        Self {
            inferencer,
            max_upload_bytes,
            trail: vec![Stage::Received],
        }
    }

    pub fn stage(&self) -> Stage {
        // trail is never empty; it starts at Received
        self.trail.last().copied().unwrap_or(Stage::Received)
    }

    /// Every stage visited so far, in order.
    pub fn trail(&self) -> &[Stage] {
        &self.trail
    }

    pub async fn run(
        &mut self,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Vec<String>, AppError> {
        let result = self.run_stages(multipart).await;

        match &result {
            Ok(skills) => {
                self.advance(Stage::Succeeded);
                info!("Extracted {} skills", skills.len());
            }
            Err(e) => {
                warn!(
                    "Skill extraction failed after stage '{}' (trail: {:?}): {e}",
                    self.stage(),
                    self.trail()
                );
                self.advance(Stage::Failed);
            }
        }

        result
    }

    async fn run_stages(
        &mut self,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Vec<String>, AppError> {
        // A body that isn't multipart carries no file at all.
        let multipart = multipart.map_err(|e| {
            debug!("Multipart rejected: {e}");
            AppError::MissingFile
        })?;

        let upload = read_resume(multipart, self.max_upload_bytes).await?;
        info!(
            "Received resume '{}' ({} bytes)",
            upload.filename,
            upload.content.len()
        );
        self.advance(Stage::Validated);

        let text = extract_text(upload.content).await?;
        self.advance(Stage::TextExtracted);

        let prompt = self.inferencer.build_prompt(&text);
        self.advance(Stage::PromptBuilt);

        let raw = self.inferencer.invoke(&prompt).await?;
        debug!("Model response: {raw}");
        self.advance(Stage::AiInvoked);

        let skills = parse_skill_list(&raw)?;
        self.advance(Stage::ResponseParsed);

        Ok(skills)
    }

    fn advance(&mut self, next: Stage) {
        debug_assert!(!self.stage().is_terminal(), "pipeline already finished");
        debug!("Pipeline stage: {} -> {}", self.stage(), next);
        self.trail.push(next);
    }
}
