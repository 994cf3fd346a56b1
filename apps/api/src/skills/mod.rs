// Resume skill extraction
// Implements: upload validation, PDF text extraction, skill inference, the per-request pipeline.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod extractor;
pub mod handlers;
pub mod inferencer;
pub mod pipeline;
pub mod prompts;
pub mod upload;
