//! Overlay asset loading.
//!
//! Resolves an overlay reference (an HTTP(S) URL or an inline `data:` URI)
//! to a decoded RGBA buffer with the requested opacity baked into the alpha
//! channel. Loading is best-effort by contract: every failure collapses to
//! `OverlayLoad::Unavailable`, logged, so a missing decorative asset never
//! blocks delivery of the document.
//!
//! The loader is stateless. References are re-resolved on every invocation;
//! nothing is cached across calls.

use base64::Engine;
use image::RgbaImage;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

const FETCH_TIMEOUT_SECS: u64 = 30;

/// A decoded overlay ready for compositing. Created fresh per generation
/// call and discarded afterwards; never mutated after decode.
#[derive(Debug, Clone)]
pub struct OverlayAsset {
    pub image: RgbaImage,
    pub width_px: u32,
    pub height_px: u32,
    /// `width_px / height_px`. Positive and finite by construction.
    pub aspect_ratio: f64,
    /// The opacity that was baked into `image`'s alpha channel.
    pub opacity: f32,
}

/// Outcome of one overlay load. Degradation is a value, not an exception.
#[derive(Debug, Clone)]
pub enum OverlayLoad {
    Loaded(OverlayAsset),
    Unavailable,
}

impl OverlayLoad {
    pub fn asset(&self) -> Option<&OverlayAsset> {
        match self {
            OverlayLoad::Loaded(asset) => Some(asset),
            OverlayLoad::Unavailable => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, OverlayLoad::Loaded(_))
    }
}

#[derive(Debug, Error)]
enum AssetError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("asset server returned status {0}")]
    Status(u16),

    #[error("malformed data URI")]
    MalformedDataUri,

    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("decoded image has a zero dimension")]
    ZeroDimension,
}

/// Stateless overlay loader.
#[derive(Clone)]
pub struct OverlayLoader {
    client: Client,
}

impl Default for OverlayLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayLoader {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Resolves `reference` and bakes `opacity` into the alpha channel.
    /// Never fails: any error is logged and returned as `Unavailable`.
    pub async fn load(&self, reference: &str, opacity: f32) -> OverlayLoad {
        match self.try_load(reference, opacity).await {
            Ok(asset) => {
                debug!(
                    "Overlay asset loaded: {}x{} at opacity {}",
                    asset.width_px, asset.height_px, asset.opacity
                );
                OverlayLoad::Loaded(asset)
            }
            Err(e) => {
                warn!("Overlay asset unavailable, pages will render without it: {e}");
                OverlayLoad::Unavailable
            }
        }
    }

    async fn try_load(&self, reference: &str, opacity: f32) -> Result<OverlayAsset, AssetError> {
        let bytes = if let Some(payload) = reference.strip_prefix("data:") {
            decode_data_uri(payload)?
        } else {
            let response = self.client.get(reference).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(AssetError::Status(status.as_u16()));
            }
            response.bytes().await?.to_vec()
        };
        decode_asset(&bytes, opacity)
    }
}

/// Decodes raw image bytes and scales the alpha channel by `opacity`.
fn decode_asset(bytes: &[u8], opacity: f32) -> Result<OverlayAsset, AssetError> {
    let mut rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width_px, height_px) = rgba.dimensions();
    if width_px == 0 || height_px == 0 {
        return Err(AssetError::ZeroDimension);
    }

    let opacity = opacity.clamp(0.0, 1.0);
    if opacity < 1.0 {
        for pixel in rgba.pixels_mut() {
            pixel.0[3] = (f32::from(pixel.0[3]) * opacity).round() as u8;
        }
    }

    Ok(OverlayAsset {
        aspect_ratio: f64::from(width_px) / f64::from(height_px),
        image: rgba,
        width_px,
        height_px,
        opacity,
    })
}

/// `image/png;base64,<payload>` (the part after `data:`) to raw bytes.
fn decode_data_uri(payload: &str) -> Result<Vec<u8>, AssetError> {
    let (_mime, data) = payload.split_once(',').ok_or(AssetError::MalformedDataUri)?;
    Ok(base64::engine::general_purpose::STANDARD.decode(data.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// PNG bytes of a solid-color image.
    fn png_bytes(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, color);
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn data_uri(bytes: &[u8]) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(bytes)
        )
    }

    #[test]
    fn test_decode_asset_computes_aspect_ratio() {
        let asset = decode_asset(&png_bytes(200, 100, Rgba([255, 0, 0, 255])), 1.0).unwrap();
        assert_eq!(asset.width_px, 200);
        assert_eq!(asset.height_px, 100);
        assert!((asset.aspect_ratio - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_decode_asset_bakes_opacity_into_alpha() {
        let asset = decode_asset(&png_bytes(4, 4, Rgba([0, 0, 255, 255])), 0.05).unwrap();
        for pixel in asset.image.pixels() {
            // 255 * 0.05 rounds to 13.
            assert_eq!(pixel.0[3], 13);
        }
    }

    #[test]
    fn test_decode_asset_full_opacity_leaves_alpha_untouched() {
        let asset = decode_asset(&png_bytes(2, 2, Rgba([9, 9, 9, 200])), 1.0).unwrap();
        assert!(asset.image.pixels().all(|p| p.0[3] == 200));
    }

    #[test]
    fn test_decode_asset_rejects_garbage() {
        assert!(decode_asset(b"not an image", 1.0).is_err());
    }

    #[test]
    fn test_decode_data_uri_rejects_missing_comma() {
        assert!(matches!(
            decode_data_uri("image/png;base64"),
            Err(AssetError::MalformedDataUri)
        ));
    }

    #[tokio::test]
    async fn test_load_resolves_inline_data_uri() {
        let loader = OverlayLoader::new();
        let uri = data_uri(&png_bytes(10, 5, Rgba([0, 255, 0, 255])));
        let load = loader.load(&uri, 1.0).await;
        let asset = load.asset().expect("asset should load");
        assert!((asset.aspect_ratio - 2.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_load_collapses_failure_to_unavailable() {
        let loader = OverlayLoader::new();
        let load = loader.load("data:image/png;base64,@@@@", 0.5).await;
        assert!(!load.is_loaded());
    }
}
