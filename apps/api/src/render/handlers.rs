//! Axum route handlers for the Render API.
//!
//! The handler is the caller-side workflow around the engine: generate the
//! artifact, then best-effort persist it (upload, then record the URL). A
//! persistence failure never discards the already-produced artifact: the
//! response body is the PDF either way, and the recorded URL rides along in
//! a header only when persistence succeeded.

use axum::{
    extract::{Path, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderName, HeaderValue,
    },
    response::{IntoResponse, Response},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::content;
use crate::errors::AppError;
use crate::render::assets::OverlayLoader;
use crate::render::pipeline::{self, RenderContext};
use crate::state::AppState;
use crate::storage;

static PDF_URL_HEADER: HeaderName = HeaderName::from_static("x-pdf-url");

/// POST /api/v1/resumes/:id/pdf
///
/// Renders the stored record into a PDF and returns it as a download.
pub async fn handle_render_pdf(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let resume = storage::get_resume(&state.db, resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    let tree = content::build_tree(&resume);
    let ctx = RenderContext {
        rasterizer: state.rasterizer.clone(),
        loader: OverlayLoader::new(),
        geometry: state.config.page_geometry(),
        header_ref: state.config.header_asset.clone(),
        watermark_ref: state.config.watermark_asset.clone(),
        watermark_opacity: state.config.watermark_opacity,
        export_dir: state.config.export_dir.clone(),
    };

    let artifact = pipeline::generate(&ctx, &tree, &resume.personal_info.full_name).await?;
    info!(
        "Rendered resume {resume_id} into '{}' ({} bytes)",
        artifact.filename,
        artifact.bytes.len()
    );

    // Persistence workflow. Stage (a): upload. Stage (b): record the URL.
    // Each stage fails independently; neither failure touches the artifact,
    // and a failed (b) does not retry (a).
    let key = format!("{resume_id}.pdf");
    let pdf_url = match storage::upload_artifact(
        &state.s3,
        &state.config.s3_endpoint,
        &state.config.s3_bucket,
        &key,
        artifact.bytes.clone(),
    )
    .await
    {
        Ok(url) => {
            if let Err(e) = storage::update_pdf_url(&state.db, resume_id, &url).await {
                warn!("Uploaded PDF for resume {resume_id} but could not record its URL: {e}");
            }
            Some(url)
        }
        Err(e) => {
            warn!("PDF upload failed for resume {resume_id}; artifact still returned: {e}");
            None
        }
    };

    let disposition = format!("attachment; filename=\"{}\"", artifact.filename);
    let mut response = (
        [
            (CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (
                CONTENT_DISPOSITION,
                HeaderValue::from_str(&disposition)
                    .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
            ),
        ],
        artifact.bytes,
    )
        .into_response();

    if let Some(url) = pdf_url {
        if let Ok(value) = HeaderValue::from_str(&url) {
            response.headers_mut().insert(PDF_URL_HEADER.clone(), value);
        }
    }

    Ok(response)
}
