//! PDF artifact assembly.
//!
//! Serializes a `GeneratedDocument` into a single page-sequenced PDF: each
//! raster page becomes one full-bleed JPEG image XObject on an A4 portrait
//! media box. Overlays are already flattened into the page pixels by the
//! compositor, so the artifact carries them on every page by construction.

use image::codecs::jpeg::JpegEncoder;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref};

use crate::render::compositor::GeneratedDocument;
use crate::render::error::RenderError;
use crate::render::geometry::{A4_HEIGHT_PT, A4_WIDTH_PT};

/// JPEG quality for embedded page surfaces.
const PAGE_JPEG_QUALITY: u8 = 90;

pub fn serialize(document: &GeneratedDocument) -> Result<Vec<u8>, RenderError> {
    let page_count = document.pages.len();

    let mut next_ref = 1;
    let mut alloc = || {
        let r = Ref::new(next_ref);
        next_ref += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let page_ids: Vec<Ref> = (0..page_count).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..page_count).map(|_| alloc()).collect();
    let image_ids: Vec<Ref> = (0..page_count).map(|_| alloc()).collect();

    let mut pdf = Pdf::new();

    for (index, page) in document.pages.iter().enumerate() {
        let (width, height) = page.dimensions();
        let jpeg = encode_jpeg(page)?;

        {
            let mut xobj = pdf.image_xobject(image_ids[index], &jpeg);
            xobj.filter(Filter::DctDecode);
            xobj.width(width as i32);
            xobj.height(height as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
        }

        // Stretch the raster over the full media box.
        let name = page_image_name(index);
        let mut content = Content::new();
        content.save_state();
        content.transform([A4_WIDTH_PT, 0.0, 0.0, A4_HEIGHT_PT, 0.0, 0.0]);
        content.x_object(Name(name.as_bytes()));
        content.restore_state();
        pdf.stream(content_ids[index], &content.finish());
    }

    for (index, page_id) in page_ids.iter().enumerate() {
        let name = page_image_name(index);
        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, A4_WIDTH_PT, A4_HEIGHT_PT));
        page.parent(pages_id);
        page.contents(content_ids[index]);
        page.resources()
            .x_objects()
            .pair(Name(name.as_bytes()), image_ids[index]);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_count as i32);

    Ok(pdf.finish())
}

fn page_image_name(index: usize) -> String {
    format!("P{}", index + 1)
}

/// RGBA page surface to baseline JPEG. Alpha is discarded: compositing has
/// already flattened the overlays, so every page pixel is opaque.
fn encode_jpeg(page: &image::RgbaImage) -> Result<Vec<u8>, RenderError> {
    let rgb = image::DynamicImage::ImageRgba8(page.clone()).to_rgb8();
    let (width, height) = rgb.dimensions();
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, PAGE_JPEG_QUALITY)
        .encode(rgb.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| RenderError::Serialization(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::geometry::PageGeometry;
    use image::{Rgba, RgbaImage};

    fn document(page_count: usize) -> GeneratedDocument {
        let geometry = PageGeometry {
            width_px: 12,
            height_px: 17,
        };
        GeneratedDocument {
            pages: (0..page_count)
                .map(|_| {
                    RgbaImage::from_pixel(
                        geometry.width_px,
                        geometry.height_px,
                        Rgba([255, 255, 255, 255]),
                    )
                })
                .collect(),
            geometry,
        }
    }

    fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
        haystack
            .windows(needle.len())
            .filter(|window| *window == needle)
            .count()
    }

    #[test]
    fn test_serialized_blob_is_a_pdf() {
        let blob = serialize(&document(1)).unwrap();
        assert!(blob.starts_with(b"%PDF-"));
        assert!(count_occurrences(&blob, b"%%EOF") >= 1);
    }

    #[test]
    fn test_one_jpeg_xobject_per_page() {
        let blob = serialize(&document(3)).unwrap();
        assert_eq!(count_occurrences(&blob, b"DCTDecode"), 3);
    }

    #[test]
    fn test_page_count_is_declared() {
        let blob = serialize(&document(2)).unwrap();
        assert_eq!(count_occurrences(&blob, b"/Count 2"), 1);
    }
}
