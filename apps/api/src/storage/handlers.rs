//! Axum route handlers for the Resume records API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::ResumeData;
use crate::state::AppState;
use crate::storage;

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub id: Uuid,
    pub status: String,
}

/// GET /api/v1/resumes
///
/// All records, most recently updated first.
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeData>>, AppError> {
    let resumes = storage::list_resumes(&state.db).await?;
    Ok(Json(resumes))
}

/// POST /api/v1/resumes
///
/// Upserts the full structured record by id.
pub async fn handle_save_resume(
    State(state): State<AppState>,
    Json(resume): Json<ResumeData>,
) -> Result<Json<SaveResponse>, AppError> {
    if resume.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    storage::save_resume(&state.db, &resume).await?;

    Ok(Json(SaveResponse {
        id: resume.id,
        status: "saved".to_string(),
    }))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeData>, AppError> {
    let resume = storage::get_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(resume))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SaveResponse>, AppError> {
    if !storage::delete_resume(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    Ok(Json(SaveResponse {
        id,
        status: "deleted".to_string(),
    }))
}
