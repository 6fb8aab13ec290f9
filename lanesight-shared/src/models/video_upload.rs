/// Video upload model and database operations
///
/// A video upload is a metadata record describing a client-submitted
/// file. No file bytes are stored by this system; `file_url` is a
/// synthesized placeholder path. Rows are created by the upload
/// endpoint and never mutated or deleted afterwards.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE video_uploads (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     registration_id UUID NOT NULL REFERENCES registrations(id),
///     original_filename VARCHAR(512) NOT NULL,
///     file_url VARCHAR(1024) NOT NULL,
///     file_size BIGINT NOT NULL,
///     processing_status VARCHAR(32) NOT NULL DEFAULT 'uploaded',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Status a new upload row is created with. Never advanced by this
/// codebase; the analysis pipeline owns later states.
pub const PROCESSING_STATUS_UPLOADED: &str = "uploaded";

/// Video upload metadata row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VideoUpload {
    /// Unique upload ID (UUID v4)
    pub id: Uuid,

    /// Owning registration (many uploads to one registration)
    pub registration_id: Uuid,

    /// Filename as submitted by the client
    pub original_filename: String,

    /// Placeholder storage path; no bytes live behind it
    pub file_url: String,

    /// Size of the submitted file in bytes
    pub file_size: i64,

    /// Pipeline status string, `uploaded` at creation
    pub processing_status: String,

    /// When the upload was recorded
    pub created_at: DateTime<Utc>,
}

/// Input for recording a new video upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVideoUpload {
    /// Owning registration ID
    pub registration_id: Uuid,

    /// Filename as submitted by the client
    pub original_filename: String,

    /// Synthesized storage path
    pub file_url: String,

    /// File size in bytes
    pub file_size: i64,
}

impl VideoUpload {
    /// Records a new upload, inside a transaction
    ///
    /// Runs on a transaction so the caller can commit it together with
    /// the parent registration's status update.
    ///
    /// # Errors
    ///
    /// Returns an error if the registration does not exist (foreign key)
    /// or the database connection fails.
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        data: CreateVideoUpload,
    ) -> Result<Self, sqlx::Error> {
        let upload = sqlx::query_as::<_, VideoUpload>(
            r#"
            INSERT INTO video_uploads (registration_id, original_filename, file_url, file_size, processing_status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, registration_id, original_filename, file_url, file_size,
                      processing_status, created_at
            "#,
        )
        .bind(data.registration_id)
        .bind(data.original_filename)
        .bind(data.file_url)
        .bind(data.file_size)
        .bind(PROCESSING_STATUS_UPLOADED)
        .fetch_one(&mut **tx)
        .await?;

        Ok(upload)
    }

    /// Lists uploads belonging to one registration, newest first
    pub async fn list_by_registration(
        pool: &PgPool,
        registration_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let uploads = sqlx::query_as::<_, VideoUpload>(
            r#"
            SELECT id, registration_id, original_filename, file_url, file_size,
                   processing_status, created_at
            FROM video_uploads
            WHERE registration_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(registration_id)
        .fetch_all(pool)
        .await?;

        Ok(uploads)
    }

    /// Lists all uploads, newest first
    ///
    /// Used by the admin listing to nest uploads under their
    /// registrations in a single extra round trip.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let uploads = sqlx::query_as::<_, VideoUpload>(
            r#"
            SELECT id, registration_id, original_filename, file_url, file_size,
                   processing_status, created_at
            FROM video_uploads
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(uploads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_video_upload_struct() {
        let registration_id = Uuid::new_v4();
        let create = CreateVideoUpload {
            registration_id,
            original_filename: "dashcam.mp4".to_string(),
            file_url: format!("/uploads/{}/dashcam.mp4", registration_id),
            file_size: 5 * 1024 * 1024,
        };

        assert_eq!(create.registration_id, registration_id);
        assert!(create.file_url.ends_with("/dashcam.mp4"));
    }

    // Integration tests for database operations are in tests/video_upload_tests.rs
}
