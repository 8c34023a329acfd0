use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::ai::LlmClient;
use crate::config::Config;
use crate::render::ContentRasterizer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable rasterization capability. Production binds the HTTP client;
    /// tests bind in-process fixtures.
    pub rasterizer: Arc<dyn ContentRasterizer>,
}
