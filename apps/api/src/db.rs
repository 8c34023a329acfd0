use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Generation requests hold a connection only briefly (record fetch, URL
/// update), so a small pool suffices.
const MAX_CONNECTIONS: u32 = 8;

/// Creates the PostgreSQL connection pool the whole service shares.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}
