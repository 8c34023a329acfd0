//! Axum route handlers for the Suggestions API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::ai::prompts::{enhance_prompt, summary_prompt, ENHANCE_SYSTEM, SUMMARY_SYSTEM};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub job_title: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience_years: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    pub role: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub text: String,
}

/// POST /api/v1/ai/summary
///
/// Drafts a professional summary from the target role and skill list.
pub async fn handle_suggest_summary(
    State(state): State<AppState>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    if request.job_title.trim().is_empty() {
        return Err(AppError::Validation("job_title cannot be empty".to_string()));
    }

    let prompt = summary_prompt(
        &request.job_title,
        &request.skills,
        &request.experience_years,
    );
    let summary = state.llm.call_text(&prompt, SUMMARY_SYSTEM).await?;

    Ok(Json(SummaryResponse { summary }))
}

/// POST /api/v1/ai/enhance
///
/// Rewrites raw experience bullets into action-oriented copy.
pub async fn handle_enhance_experience(
    State(state): State<AppState>,
    Json(request): Json<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let prompt = enhance_prompt(&request.role, &request.text);
    let text = state.llm.call_text(&prompt, ENHANCE_SYSTEM).await?;

    Ok(Json(EnhanceResponse { text }))
}
