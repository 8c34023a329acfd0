use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::render::geometry::PageGeometry;

/// Application configuration loaded from environment variables.
/// Constructed once at startup and passed around explicitly; there is no
/// process-wide mutable configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub anthropic_api_key: String,
    /// Rasterizer service endpoint, e.g. http://localhost:9400/rasterize
    pub rasterizer_endpoint: String,
    /// Header band asset reference: URL or data: URI.
    pub header_asset: String,
    /// Watermark asset reference: URL or data: URI.
    pub watermark_asset: String,
    pub watermark_opacity: f32,
    /// Raster density of page surfaces, in pixels per inch.
    pub raster_ppi: u32,
    /// Directory for best-effort local copies of generated PDFs.
    pub export_dir: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            rasterizer_endpoint: require_env("RASTERIZER_ENDPOINT")?,
            header_asset: require_env("HEADER_ASSET_URL")?,
            watermark_asset: require_env("WATERMARK_ASSET_URL")?,
            watermark_opacity: std::env::var("WATERMARK_OPACITY")
                .unwrap_or_else(|_| "0.05".to_string())
                .parse::<f32>()
                .context("WATERMARK_OPACITY must be a number between 0 and 1")?,
            raster_ppi: std::env::var("RASTER_PPI")
                .unwrap_or_else(|_| "150".to_string())
                .parse::<u32>()
                .context("RASTER_PPI must be a positive integer")?,
            export_dir: std::env::var("EXPORT_DIR").ok().map(PathBuf::from),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// The fixed page format every document is rendered at.
    pub fn page_geometry(&self) -> PageGeometry {
        PageGeometry::a4(self.raster_ppi)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
