/// Registration model and database operations
///
/// A registration is an email-keyed record tracking a lead's progress
/// through the demo funnel. Rows are created by the register endpoint
/// and their status is advanced by the upload endpoint; nothing in this
/// system deletes them.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE registrations (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email TEXT NOT NULL,
///     status VARCHAR(32) NOT NULL DEFAULT 'pending',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use lanesight_shared::models::registration::Registration;
/// use lanesight_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let registration = match Registration::find_by_email(&pool, "lead@example.com").await? {
///     Some(existing) => existing,
///     None => Registration::create(&pool, "lead@example.com").await?,
/// };
/// println!("Registration: {}", registration.id);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Funnel status of a registration
///
/// Strictly forward-moving: `pending` on creation, `video_uploaded`
/// once a video metadata row exists. `processing` and `completed` are
/// reserved for the analysis pipeline and are never set by this
/// codebase; the admin stats still count them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    /// Registered, no video yet
    Pending,

    /// At least one video upload recorded
    VideoUploaded,

    /// Analysis in progress (set externally, never by this code)
    Processing,

    /// Analysis finished (set externally, never by this code)
    Completed,
}

impl RegistrationStatus {
    /// Converts status to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::VideoUploaded => "video_uploaded",
            RegistrationStatus::Processing => "processing",
            RegistrationStatus::Completed => "completed",
        }
    }

    /// Parses a status from its database representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RegistrationStatus::Pending),
            "video_uploaded" => Some(RegistrationStatus::VideoUploaded),
            "processing" => Some(RegistrationStatus::Processing),
            "completed" => Some(RegistrationStatus::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registration row
///
/// The status column is stored as text rather than a Postgres enum so
/// the external analysis pipeline can introduce states without a
/// migration here.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Registration {
    /// Unique registration ID (UUID v4)
    pub id: Uuid,

    /// Email address, the business key
    ///
    /// Uniqueness is enforced by lookup-before-insert in the register
    /// endpoint, not by a database constraint.
    pub email: String,

    /// Funnel status, one of the `RegistrationStatus` string values
    pub status: String,

    /// When the registration was created
    pub created_at: DateTime<Utc>,

    /// When the registration was last updated
    pub updated_at: DateTime<Utc>,
}

impl Registration {
    /// Returns the typed status, if the stored string is recognized
    pub fn status(&self) -> Option<RegistrationStatus> {
        RegistrationStatus::parse(&self.status)
    }

    /// Creates a new registration with default `pending` status
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn create(pool: &PgPool, email: &str) -> Result<Self, sqlx::Error> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (email)
            VALUES ($1)
            RETURNING id, email, status, created_at, updated_at
            "#,
        )
        .bind(email)
        .fetch_one(pool)
        .await?;

        Ok(registration)
    }

    /// Finds a registration by ID
    ///
    /// # Returns
    ///
    /// The registration if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            SELECT id, email, status, created_at, updated_at
            FROM registrations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(registration)
    }

    /// Finds a registration by exact email match
    ///
    /// # Returns
    ///
    /// The registration if found, None otherwise
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            SELECT id, email, status, created_at, updated_at
            FROM registrations
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(registration)
    }

    /// Lists all registrations, newest first
    ///
    /// The admin listing is unpaginated by contract: stats are computed
    /// over the full set, so the full set is what gets returned.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let registrations = sqlx::query_as::<_, Registration>(
            r#"
            SELECT id, email, status, created_at, updated_at
            FROM registrations
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(registrations)
    }

    /// Marks a registration as having received a video, inside a transaction
    ///
    /// Sets status to `video_uploaded` and refreshes `updated_at`. Runs
    /// on a transaction so the caller can commit it together with the
    /// video_uploads insert.
    ///
    /// # Returns
    ///
    /// True if the row existed and was updated
    pub async fn mark_video_uploaded(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE registrations
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(RegistrationStatus::VideoUploaded.as_str())
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            RegistrationStatus::Pending,
            RegistrationStatus::VideoUploaded,
            RegistrationStatus::Processing,
            RegistrationStatus::Completed,
        ] {
            assert_eq!(RegistrationStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_status_display_matches_storage_form() {
        assert_eq!(
            RegistrationStatus::VideoUploaded.to_string(),
            "video_uploaded"
        );
        assert_eq!(RegistrationStatus::Pending.to_string(), "pending");
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert_eq!(RegistrationStatus::parse("uploaded"), None);
        assert_eq!(RegistrationStatus::parse(""), None);
        assert_eq!(RegistrationStatus::parse("PENDING"), None);
    }

    #[test]
    fn test_typed_status_accessor() {
        let registration = Registration {
            id: Uuid::new_v4(),
            email: "lead@example.com".to_string(),
            status: "pending".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(registration.status(), Some(RegistrationStatus::Pending));
    }

    // Integration tests for database operations are in tests/registration_tests.rs
}
