/// Admin listing endpoint
///
/// Returns every registration with its nested uploads plus three
/// summary counters. The listing is unpaginated by contract: the
/// counters are defined over the full set, so the full set is what the
/// admin table renders.
///
/// Gated by the `X-Admin-Key` header (see `middleware::admin_key`).
///
/// # Endpoint
///
/// ```text
/// GET /api/admin/registrations
/// X-Admin-Key: <key>
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "registrations": [ { ..., "video_uploads": [ ... ] } ],
///     "stats": {
///       "totalRegistrations": 12,
///       "videosUploaded": 7,
///       "processingComplete": 2
///     }
///   }
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid admin key (middleware)
/// - `500 Internal Server Error`: Database failure

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use lanesight_shared::models::{Registration, RegistrationStatus, VideoUpload};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// A registration with its uploads nested, the row shape the admin
/// table consumes
#[derive(Debug, Serialize)]
pub struct RegistrationWithUploads {
    /// The registration row, flattened into this object
    #[serde(flatten)]
    pub registration: Registration,

    /// Uploads belonging to this registration, newest first
    pub video_uploads: Vec<VideoUpload>,
}

/// Summary counters over the full registration set
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    /// All registrations
    #[serde(rename = "totalRegistrations")]
    pub total_registrations: usize,

    /// Registrations past `pending`
    #[serde(rename = "videosUploaded")]
    pub videos_uploaded: usize,

    /// Registrations with status `completed`
    #[serde(rename = "processingComplete")]
    pub processing_complete: usize,
}

/// Admin listing payload
#[derive(Debug, Serialize)]
pub struct AdminData {
    /// All registrations, newest first, uploads nested
    pub registrations: Vec<RegistrationWithUploads>,

    /// Summary counters
    pub stats: AdminStats,
}

/// Admin listing response
#[derive(Debug, Serialize)]
pub struct AdminResponse {
    /// Always true on the success path
    pub success: bool,

    /// Listing plus counters
    pub data: AdminData,
}

/// Computes the three summary counters over the full set
///
/// Counters are independent of any pagination the UI might add later:
/// they always describe every row.
pub fn compute_stats(registrations: &[RegistrationWithUploads]) -> AdminStats {
    let total_registrations = registrations.len();
    let videos_uploaded = registrations
        .iter()
        .filter(|r| r.registration.status != RegistrationStatus::Pending.as_str())
        .count();
    let processing_complete = registrations
        .iter()
        .filter(|r| r.registration.status == RegistrationStatus::Completed.as_str())
        .count();

    AdminStats {
        total_registrations,
        videos_uploaded,
        processing_complete,
    }
}

/// Admin listing handler
///
/// Two round trips: one for registrations, one for all uploads, joined
/// in memory by registration id.
pub async fn list_registrations(State(state): State<AppState>) -> ApiResult<Json<AdminResponse>> {
    let registrations = Registration::list_all(&state.db).await?;
    let uploads = VideoUpload::list_all(&state.db).await?;

    let mut uploads_by_registration: HashMap<Uuid, Vec<VideoUpload>> = HashMap::new();
    for upload in uploads {
        uploads_by_registration
            .entry(upload.registration_id)
            .or_default()
            .push(upload);
    }

    let registrations: Vec<RegistrationWithUploads> = registrations
        .into_iter()
        .map(|registration| {
            let video_uploads = uploads_by_registration
                .remove(&registration.id)
                .unwrap_or_default();
            RegistrationWithUploads {
                registration,
                video_uploads,
            }
        })
        .collect();

    let stats = compute_stats(&registrations);

    Ok(Json(AdminResponse {
        success: true,
        data: AdminData {
            registrations,
            stats,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(status: &str) -> RegistrationWithUploads {
        RegistrationWithUploads {
            registration: Registration {
                id: Uuid::new_v4(),
                email: format!("{}@example.com", status),
                status: status.to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            video_uploads: Vec::new(),
        }
    }

    #[test]
    fn test_stats_empty_set() {
        let stats = compute_stats(&[]);
        assert_eq!(
            stats,
            AdminStats {
                total_registrations: 0,
                videos_uploaded: 0,
                processing_complete: 0,
            }
        );
    }

    #[test]
    fn test_stats_counts_by_status() {
        let rows = vec![
            row("pending"),
            row("pending"),
            row("video_uploaded"),
            row("processing"),
            row("completed"),
        ];

        let stats = compute_stats(&rows);
        assert_eq!(stats.total_registrations, 5);
        // Everything past pending counts as uploaded
        assert_eq!(stats.videos_uploaded, 3);
        assert_eq!(stats.processing_complete, 1);
    }

    #[test]
    fn test_serialized_field_names_are_camel_case() {
        let stats = compute_stats(&[]);
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("totalRegistrations").is_some());
        assert!(json.get("videosUploaded").is_some());
        assert!(json.get("processingComplete").is_some());
    }

    #[test]
    fn test_nested_rows_flatten_registration_fields() {
        let mut item = row("pending");
        item.video_uploads.push(VideoUpload {
            id: Uuid::new_v4(),
            registration_id: item.registration.id,
            original_filename: "drive.mp4".to_string(),
            file_url: "/uploads/x/drive.mp4".to_string(),
            file_size: 42,
            processing_status: "uploaded".to_string(),
            created_at: Utc::now(),
        });

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("email").is_some(), "registration fields flattened");
        assert_eq!(json["video_uploads"].as_array().unwrap().len(), 1);
    }
}
