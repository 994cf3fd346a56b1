//! Axum route handlers for the skill extraction API.

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        State,
    },
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::skills::inferencer::SkillInferencer;
use crate::skills::pipeline::SkillPipeline;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
}

/// POST /extract-skills
///
/// Multipart body with a `resume` PDF. Returns the skills the model found.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SkillsResponse>, AppError> {
    let inferencer = SkillInferencer::new(state.llm.clone());
    let mut pipeline = SkillPipeline::new(inferencer, state.config.max_upload_bytes);

    let skills = pipeline.run(multipart).await?;

    Ok(Json(SkillsResponse { skills }))
}
