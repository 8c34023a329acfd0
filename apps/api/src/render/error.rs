//! Error taxonomy for the rendering engine.
//!
//! A `RenderError` always means no artifact was produced. Overlay
//! degradation is not an error at this level: a failed asset load collapses
//! to `assets::OverlayLoad::Unavailable` and a failed per-page draw is
//! logged and skipped, both inside a successful generation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// An overlay asset reported a zero or non-finite aspect ratio; placement
    /// math is refused rather than producing NaN rectangles.
    #[error("invalid asset geometry: aspect ratio {aspect_ratio} is not positive and finite")]
    InvalidAssetGeometry { aspect_ratio: f64 },

    #[error("rasterization failed: {0}")]
    Rasterization(#[from] RasterizeError),

    #[error("artifact serialization failed: {0}")]
    Serialization(String),
}

/// Failures from the external content rasterizer. All of them abort the
/// generation that requested the rasterization.
#[derive(Debug, Error)]
pub enum RasterizeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rasterizer returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("rasterizer returned no pages")]
    EmptyDocument,

    #[error("page {page} could not be decoded: {message}")]
    PageDecode { page: usize, message: String },

    /// An atomic block is taller than one full page. Unsupported input:
    /// the engine neither force-splits nor silently overflows it.
    #[error("atomic content unit taller than one page: {0}")]
    OversizedAtomicUnit(String),
}
