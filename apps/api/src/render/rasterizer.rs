//! Content rasterizer interface.
//!
//! Turning structured content into pixel pages is an external capability.
//! The engine talks to it only through `ContentRasterizer`; production binds
//! `HttpRasterizer`, a client for the rasterizer service, and tests bind
//! in-process fixtures.
//!
//! Contract: the rasterizer returns at least one page even for an empty
//! tree, honors `avoid_splitting_atomic_units`, and every failure it reports
//! is fatal to the generation that requested it.

use async_trait::async_trait;
use base64::Engine;
use image::RgbaImage;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::tree::ContentTree;
use crate::render::error::RasterizeError;
use crate::render::geometry::PageGeometry;

const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Error code the rasterizer service uses for an atomic block that cannot
/// fit on a single page.
const OVERSIZED_UNIT_CODE: &str = "OVERSIZED_ATOMIC_UNIT";

/// Options forwarded with every rasterization request.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RasterizeOptions {
    /// Atomic blocks must land entirely on one page.
    pub avoid_splitting_atomic_units: bool,
}

impl Default for RasterizeOptions {
    fn default() -> Self {
        Self {
            avoid_splitting_atomic_units: true,
        }
    }
}

/// External rasterization capability: sanitized tree plus page geometry in,
/// ordered page surfaces out.
#[async_trait]
pub trait ContentRasterizer: Send + Sync {
    async fn rasterize(
        &self,
        tree: &ContentTree,
        geometry: PageGeometry,
        options: RasterizeOptions,
    ) -> Result<Vec<RgbaImage>, RasterizeError>;
}

#[derive(Debug, Serialize)]
struct RasterizeRequest<'a> {
    tree: &'a ContentTree,
    geometry: PageGeometry,
    options: RasterizeOptions,
}

#[derive(Debug, Deserialize)]
struct RasterizeResponse {
    /// Base64-encoded PNG, one entry per page, in page order.
    pages: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RasterizerErrorBody {
    error: RasterizerErrorDetail,
}

#[derive(Debug, Deserialize)]
struct RasterizerErrorDetail {
    code: String,
    message: String,
}

/// HTTP client for the rasterizer service.
#[derive(Clone)]
pub struct HttpRasterizer {
    client: Client,
    endpoint: String,
}

impl HttpRasterizer {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
        }
    }
}

#[async_trait]
impl ContentRasterizer for HttpRasterizer {
    async fn rasterize(
        &self,
        tree: &ContentTree,
        geometry: PageGeometry,
        options: RasterizeOptions,
    ) -> Result<Vec<RgbaImage>, RasterizeError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&RasterizeRequest {
                tree,
                geometry,
                options,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_body(status.as_u16(), &body));
        }

        let body: RasterizeResponse = response.json().await?;
        decode_pages(&body.pages)
    }
}

/// Maps a non-2xx rasterizer response to the matching error variant.
fn map_error_body(status: u16, body: &str) -> RasterizeError {
    match serde_json::from_str::<RasterizerErrorBody>(body) {
        Ok(parsed) if parsed.error.code == OVERSIZED_UNIT_CODE => {
            RasterizeError::OversizedAtomicUnit(parsed.error.message)
        }
        Ok(parsed) => RasterizeError::Api {
            status,
            message: parsed.error.message,
        },
        Err(_) => RasterizeError::Api {
            status,
            message: body.to_string(),
        },
    }
}

/// Decodes the returned pages, preserving order. An empty document violates
/// the rasterizer contract.
fn decode_pages(encoded_pages: &[String]) -> Result<Vec<RgbaImage>, RasterizeError> {
    if encoded_pages.is_empty() {
        return Err(RasterizeError::EmptyDocument);
    }

    let mut pages = Vec::with_capacity(encoded_pages.len());
    for (index, encoded) in encoded_pages.iter().enumerate() {
        let page = index + 1;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| RasterizeError::PageDecode {
                page,
                message: e.to_string(),
            })?;
        let decoded = image::load_from_memory(&bytes).map_err(|e| RasterizeError::PageDecode {
            page,
            message: e.to_string(),
        })?;
        pages.push(decoded.to_rgba8());
    }

    debug!("Decoded {} rasterized page(s)", pages.len());
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded_png(width: u32, height: u32) -> String {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        base64::engine::general_purpose::STANDARD.encode(out.into_inner())
    }

    #[test]
    fn test_decode_pages_preserves_order_and_count() {
        let pages = decode_pages(&[encoded_png(4, 6), encoded_png(4, 6)]).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].dimensions(), (4, 6));
    }

    #[test]
    fn test_decode_pages_rejects_empty_document() {
        assert!(matches!(
            decode_pages(&[]),
            Err(RasterizeError::EmptyDocument)
        ));
    }

    #[test]
    fn test_decode_pages_reports_the_failing_page() {
        let err = decode_pages(&[encoded_png(2, 2), "@@not-base64@@".to_string()]).unwrap_err();
        match err {
            RasterizeError::PageDecode { page, .. } => assert_eq!(page, 2),
            other => panic!("expected PageDecode, got {other:?}"),
        }
    }

    #[test]
    fn test_map_error_body_recognizes_oversized_unit() {
        let body = r#"{"error":{"code":"OVERSIZED_ATOMIC_UNIT","message":"block 7"}}"#;
        assert!(matches!(
            map_error_body(422, body),
            RasterizeError::OversizedAtomicUnit(_)
        ));
    }

    #[test]
    fn test_map_error_body_falls_back_to_raw_text() {
        let err = map_error_body(500, "boom");
        match err {
            RasterizeError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }
}
