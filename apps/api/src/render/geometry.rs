//! Overlay placement math.
//!
//! Pure functions: page geometry and a source aspect ratio in, a placement
//! rectangle out. No state, no I/O. Both placements preserve the source
//! aspect ratio exactly; a degenerate ratio is rejected up front so no NaN
//! ever reaches the compositor.

use serde::{Deserialize, Serialize};

use crate::render::error::RenderError;

/// A4 portrait media box, in PDF points (1/72 inch).
pub const A4_WIDTH_PT: f32 = 595.276;
pub const A4_HEIGHT_PT: f32 = 841.89;

/// Header band design height against the A4 reference height. The band
/// occupies this proportion of page height at any raster scale.
const HEADER_DESIGN_HEIGHT_PT: f64 = 120.0;
const REFERENCE_PAGE_HEIGHT_PT: f64 = 841.89;

/// Watermark width as a fraction of page width.
const WATERMARK_WIDTH_FRACTION: f64 = 0.6;

/// Fixed output page dimensions in pixels. Constant across all pages of one
/// document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_px: u32,
    pub height_px: u32,
}

impl PageGeometry {
    /// A4 portrait at the given raster density.
    pub fn a4(pixels_per_inch: u32) -> Self {
        let scale = f64::from(pixels_per_inch) / 72.0;
        Self {
            width_px: (f64::from(A4_WIDTH_PT) * scale).round() as u32,
            height_px: (f64::from(A4_HEIGHT_PT) * scale).round() as u32,
        }
    }
}

/// Placement of an overlay on a page, in output page pixels.
///
/// Invariant: `width / height` equals the source aspect ratio the rect was
/// computed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Header band anchored at the page's top-left corner. Height is a constant
/// proportion of page height; width follows from the asset's aspect ratio.
/// Not vertically centered: it is a top band.
pub fn header_placement(
    geometry: PageGeometry,
    aspect_ratio: f64,
) -> Result<PlacementRect, RenderError> {
    check_aspect(aspect_ratio)?;
    let height =
        f64::from(geometry.height_px) * (HEADER_DESIGN_HEIGHT_PT / REFERENCE_PAGE_HEIGHT_PT);
    Ok(PlacementRect {
        x: 0.0,
        y: 0.0,
        width: height * aspect_ratio,
        height,
    })
}

/// Watermark centered on both axes, spanning 60% of the page width.
pub fn watermark_placement(
    geometry: PageGeometry,
    aspect_ratio: f64,
) -> Result<PlacementRect, RenderError> {
    check_aspect(aspect_ratio)?;
    let page_width = f64::from(geometry.width_px);
    let page_height = f64::from(geometry.height_px);
    let width = page_width * WATERMARK_WIDTH_FRACTION;
    let height = width / aspect_ratio;
    Ok(PlacementRect {
        x: (page_width - width) / 2.0,
        y: (page_height - height) / 2.0,
        width,
        height,
    })
}

fn check_aspect(aspect_ratio: f64) -> Result<(), RenderError> {
    if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        return Err(RenderError::InvalidAssetGeometry { aspect_ratio });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const A4_150: PageGeometry = PageGeometry {
        width_px: 1240,
        height_px: 1754,
    };

    #[test]
    fn test_a4_at_150_ppi() {
        assert_eq!(PageGeometry::a4(150), A4_150);
    }

    #[test]
    fn test_placements_preserve_aspect_ratio() {
        for aspect in [0.1, 0.5, 1.0, 227.0 / 183.0, 16.0 / 9.0, 3.0, 42.0] {
            let header = header_placement(A4_150, aspect).unwrap();
            assert!(
                (header.width / header.height - aspect).abs() < 1e-6,
                "header aspect drifted for {aspect}"
            );
            let watermark = watermark_placement(A4_150, aspect).unwrap();
            assert!(
                (watermark.width / watermark.height - aspect).abs() < 1e-6,
                "watermark aspect drifted for {aspect}"
            );
        }
    }

    #[test]
    fn test_header_is_a_top_left_band() {
        let rect = header_placement(A4_150, 2.0).unwrap();
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 0.0);
        // 120 / 841.89 of the page height, at any resolution.
        let expected_height = 1754.0 * 120.0 / 841.89;
        assert!((rect.height - expected_height).abs() < 1e-9);
        assert!((rect.width - expected_height * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_header_proportion_is_resolution_independent() {
        let low = header_placement(PageGeometry::a4(72), 1.5).unwrap();
        let high = header_placement(PageGeometry::a4(300), 1.5).unwrap();
        let low_fraction = low.height / f64::from(PageGeometry::a4(72).height_px);
        let high_fraction = high.height / f64::from(PageGeometry::a4(300).height_px);
        assert!((low_fraction - high_fraction).abs() < 1e-9);
    }

    #[test]
    fn test_watermark_is_centered_both_axes() {
        for aspect in [0.75, 1.0, 2.5] {
            let rect = watermark_placement(A4_150, aspect).unwrap();
            assert!((rect.x + rect.width / 2.0 - 1240.0 / 2.0).abs() < 1e-9);
            assert!((rect.y + rect.height / 2.0 - 1754.0 / 2.0).abs() < 1e-9);
            assert!((rect.width - 0.6 * 1240.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_aspect_ratios_are_rejected() {
        for aspect in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                header_placement(A4_150, aspect),
                Err(RenderError::InvalidAssetGeometry { .. })
            ));
            assert!(matches!(
                watermark_placement(A4_150, aspect),
                Err(RenderError::InvalidAssetGeometry { .. })
            ));
        }
    }
}
