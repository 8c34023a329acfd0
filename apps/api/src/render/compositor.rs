//! Page compositing — the core of the rendering engine.
//!
//! Delegates rasterization of the sanitized tree to the external rasterizer,
//! then stamps the header band and the watermark onto every returned page at
//! aspect-preserving placements. Overlays are compositing passes applied
//! after content rasterization, so they always render on top of page
//! content. The compositor never re-splits or re-orders what the rasterizer
//! returns; only pixel content is mutated.
//!
//! Per-page, per-overlay failures are recovered: they are logged against the
//! page and everything else still proceeds.

use image::{imageops, RgbaImage};
use thiserror::Error;
use tracing::{debug, warn};

use crate::content::tree::ContentTree;
use crate::render::assets::{OverlayAsset, OverlayLoad};
use crate::render::error::RenderError;
use crate::render::geometry::{
    header_placement, watermark_placement, PageGeometry, PlacementRect,
};
use crate::render::rasterizer::{ContentRasterizer, RasterizeOptions};

/// Overlay load outcomes for one generation. Either slot may be
/// `Unavailable`; the document ships regardless.
#[derive(Debug, Clone)]
pub struct OverlaySet {
    pub header: OverlayLoad,
    pub watermark: OverlayLoad,
}

/// The rendered document: ordered page surfaces at a fixed geometry.
pub struct GeneratedDocument {
    pub pages: Vec<RgbaImage>,
    pub geometry: PageGeometry,
}

impl GeneratedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[derive(Debug, Error)]
enum DrawError {
    #[error("degenerate placement {width:.1}x{height:.1}")]
    DegeneratePlacement { width: f64, height: f64 },
}

pub async fn compose(
    rasterizer: &dyn ContentRasterizer,
    sanitized: &ContentTree,
    geometry: PageGeometry,
    overlays: &OverlaySet,
) -> Result<GeneratedDocument, RenderError> {
    let mut pages = rasterizer
        .rasterize(
            sanitized,
            geometry,
            RasterizeOptions {
                avoid_splitting_atomic_units: true,
            },
        )
        .await?;

    debug!("Rasterizer returned {} page(s)", pages.len());

    for (index, page) in pages.iter_mut().enumerate() {
        apply_overlays(page, geometry, overlays, index + 1);
    }

    Ok(GeneratedDocument { pages, geometry })
}

/// Stamps both overlays onto one page. Each overlay is independent: a
/// failure is logged against this page and the other overlay, and all other
/// pages, still proceed.
fn apply_overlays(
    page: &mut RgbaImage,
    geometry: PageGeometry,
    overlays: &OverlaySet,
    page_number: usize,
) {
    if let Some(header) = overlays.header.asset() {
        match header_placement(geometry, header.aspect_ratio) {
            Ok(rect) => {
                if let Err(e) = draw_overlay(page, header, rect) {
                    warn!("Failed to draw header on page {page_number}: {e}");
                }
            }
            Err(e) => warn!("Skipping header on page {page_number}: {e}"),
        }
    }

    if let Some(watermark) = overlays.watermark.asset() {
        match watermark_placement(geometry, watermark.aspect_ratio) {
            Ok(rect) => {
                if let Err(e) = draw_overlay(page, watermark, rect) {
                    warn!("Failed to draw watermark on page {page_number}: {e}");
                }
            }
            Err(e) => warn!("Skipping watermark on page {page_number}: {e}"),
        }
    }
}

/// Scales the asset to the placement rect and alpha-composites it over the
/// page. Pixels falling outside the page are clipped.
fn draw_overlay(
    page: &mut RgbaImage,
    asset: &OverlayAsset,
    rect: PlacementRect,
) -> Result<(), DrawError> {
    let target_width = rect.width.round() as u32;
    let target_height = rect.height.round() as u32;
    if target_width == 0 || target_height == 0 {
        return Err(DrawError::DegeneratePlacement {
            width: rect.width,
            height: rect.height,
        });
    }

    let scaled = imageops::resize(
        &asset.image,
        target_width,
        target_height,
        imageops::FilterType::Lanczos3,
    );
    imageops::overlay(page, &scaled, rect.x.round() as i64, rect.y.round() as i64);
    Ok(())
}
