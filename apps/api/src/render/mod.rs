// Paginated document rendering and overlay compositing engine.
//
// Flow: sanitize tree → rasterize (external capability) → stamp header band
// and watermark onto every page → serialize pages into a single PDF blob.
// Overlay degradation is silent inside a successful result; rasterization
// failure is the only fatal path.

pub mod assets;
pub mod compositor;
pub mod error;
pub mod geometry;
pub mod handlers;
pub mod pdf;
pub mod pipeline;
pub mod rasterizer;
pub mod sanitize;

pub use error::{RasterizeError, RenderError};
pub use geometry::{PageGeometry, PlacementRect};
pub use pipeline::{generate, PdfArtifact, RenderContext};
pub use rasterizer::{ContentRasterizer, HttpRasterizer, RasterizeOptions};
