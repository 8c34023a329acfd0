//! Document generation pipeline — the engine's public entry point.
//!
//! `generate` surfaces exactly one outcome: a complete `PdfArtifact` or a
//! fatal error. Overlay degradation (a header or watermark that failed to
//! load or draw) happens silently inside a successful result; the local
//! save is a best-effort side effect that never invalidates the artifact.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::content::tree::ContentTree;
use crate::render::assets::OverlayLoader;
use crate::render::compositor::{compose, OverlaySet};
use crate::render::error::RenderError;
use crate::render::geometry::PageGeometry;
use crate::render::pdf;
use crate::render::rasterizer::ContentRasterizer;
use crate::render::sanitize::sanitize;

/// Artifact name when the caller supplies no usable hint.
const DEFAULT_FILENAME: &str = "Resume.pdf";

/// The header band is drawn at full strength; only the watermark is faded.
const HEADER_OPACITY: f32 = 1.0;

/// Everything one generation needs beyond the content itself. Constructed
/// explicitly at the call site; there are no process-wide defaults.
#[derive(Clone)]
pub struct RenderContext {
    pub rasterizer: Arc<dyn ContentRasterizer>,
    pub loader: OverlayLoader,
    pub geometry: PageGeometry,
    /// Header asset reference: URL or `data:` URI.
    pub header_ref: String,
    /// Watermark asset reference: URL or `data:` URI.
    pub watermark_ref: String,
    pub watermark_opacity: f32,
    /// Where to drop a local copy of the artifact, if anywhere.
    pub export_dir: Option<PathBuf>,
}

/// The terminal output. Ownership passes to the caller on return.
#[derive(Debug, Clone)]
pub struct PdfArtifact {
    pub bytes: Bytes,
    pub filename: String,
}

pub async fn generate(
    ctx: &RenderContext,
    tree: &ContentTree,
    filename_hint: &str,
) -> Result<PdfArtifact, RenderError> {
    let filename = resolve_filename(filename_hint);
    info!("Generating PDF artifact '{filename}'");

    let sanitized = sanitize(tree);
    if sanitized.is_empty() {
        debug!("Content tree is empty; the document will be a single blank page");
    }

    // Both asset loads resolve concurrently; either may come back
    // Unavailable and the document still ships.
    let (header, watermark) = tokio::join!(
        ctx.loader.load(&ctx.header_ref, HEADER_OPACITY),
        ctx.loader.load(&ctx.watermark_ref, ctx.watermark_opacity),
    );
    debug!(
        "Overlay loads: header={}, watermark={}",
        header.is_loaded(),
        watermark.is_loaded()
    );
    let overlays = OverlaySet { header, watermark };

    let document = compose(ctx.rasterizer.as_ref(), &sanitized, ctx.geometry, &overlays).await?;
    info!(
        "Composited {} page(s) at {}x{}",
        document.page_count(),
        document.geometry.width_px,
        document.geometry.height_px
    );

    let blob = pdf::serialize(&document)?;
    let artifact = PdfArtifact {
        bytes: Bytes::from(blob),
        filename,
    };

    if let Some(dir) = &ctx.export_dir {
        save_local_copy(dir, &artifact).await;
    }

    Ok(artifact)
}

/// `"Jane Doe"` becomes `"Jane Doe_Resume.pdf"`; a blank hint falls back to
/// the default; a hint already carrying the extension is kept as-is.
pub fn resolve_filename(hint: &str) -> String {
    let hint = hint.trim();
    if hint.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else if hint.ends_with(".pdf") {
        hint.to_string()
    } else {
        format!("{hint}_Resume.pdf")
    }
}

/// Best-effort local save. A failed write is reported; the artifact is
/// returned to the caller regardless.
async fn save_local_copy(dir: &Path, artifact: &PdfArtifact) {
    let path = dir.join(&artifact.filename);
    let result = async {
        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(&path, &artifact.bytes).await
    }
    .await;

    match result {
        Ok(()) => info!("Saved local copy to {}", path.display()),
        Err(e) => warn!("Could not save local copy to {}: {e}", path.display()),
    }
}
