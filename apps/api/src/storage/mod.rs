//! Persistence — structured résumé records in PostgreSQL and PDF artifacts
//! in S3-compatible object storage.
//!
//! Records live in the `resumes` table as a JSONB document plus promoted
//! columns; promoted columns override the blob on read so server-side
//! updates (the recorded artifact URL) always win. Artifact upload and the
//! record-URL update are independent operations: the caller's workflow
//! treats both as best-effort and never retries the upload on a failed
//! record update.

pub mod handlers;

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::{ResumeData, ResumeRow};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("record blob is malformed: {0}")]
    MalformedRecord(#[from] serde_json::Error),

    #[error("artifact upload failed: {0}")]
    Upload(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Resume records
// ────────────────────────────────────────────────────────────────────────────

/// Upserts the full record by id. The JSONB blob is the source of truth for
/// document content; `title` and `last_updated` are promoted for listing.
pub async fn save_resume(pool: &PgPool, resume: &ResumeData) -> Result<(), StorageError> {
    let blob = serde_json::to_value(resume)?;

    sqlx::query(
        r#"
        INSERT INTO resumes (id, title, last_updated, data, pdf_url)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id) DO UPDATE
            SET title = EXCLUDED.title,
                last_updated = EXCLUDED.last_updated,
                data = EXCLUDED.data
        "#,
    )
    .bind(resume.id)
    .bind(&resume.title)
    .bind(resume.last_updated)
    .bind(&blob)
    .bind(&resume.pdf_url)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_resume(pool: &PgPool, id: Uuid) -> Result<Option<ResumeData>, StorageError> {
    let row = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(hydrate).transpose()
}

pub async fn list_resumes(pool: &PgPool) -> Result<Vec<ResumeData>, StorageError> {
    let rows =
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes ORDER BY last_updated DESC")
            .fetch_all(pool)
            .await?;

    rows.into_iter().map(hydrate).collect()
}

/// Returns true when a row was actually removed.
pub async fn delete_resume(pool: &PgPool, id: Uuid) -> Result<bool, StorageError> {
    let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Records the persisted artifact's URL against the resume row.
pub async fn update_pdf_url(pool: &PgPool, id: Uuid, url: &str) -> Result<(), StorageError> {
    sqlx::query("UPDATE resumes SET pdf_url = $2 WHERE id = $1")
        .bind(id)
        .bind(url)
        .execute(pool)
        .await?;
    Ok(())
}

/// Rebuilds `ResumeData` from a row. The promoted columns win over whatever
/// the blob carries, so a stale client copy cannot shadow server updates.
fn hydrate(row: ResumeRow) -> Result<ResumeData, StorageError> {
    let mut resume: ResumeData = serde_json::from_value(row.data)?;
    resume.id = row.id;
    if row.pdf_url.is_some() {
        resume.pdf_url = row.pdf_url;
    }
    Ok(resume)
}

// ────────────────────────────────────────────────────────────────────────────
// Artifact upload
// ────────────────────────────────────────────────────────────────────────────

/// Uploads the artifact and returns its public URL.
pub async fn upload_artifact(
    s3: &S3Client,
    endpoint: &str,
    bucket: &str,
    key: &str,
    bytes: Bytes,
) -> Result<String, StorageError> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .content_type("application/pdf")
        .body(ByteStream::from(bytes))
        .send()
        .await
        .map_err(|e| StorageError::Upload(e.to_string()))?;

    let url = public_url(endpoint, bucket, key);
    info!("Uploaded artifact to {url}");
    Ok(url)
}

/// Path-style public URL, the layout MinIO and AWS both serve.
fn public_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/'))
}
