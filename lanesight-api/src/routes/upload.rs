/// Video upload endpoint
///
/// Accepts a multipart form with a `video` file and a `registrationId`
/// and records the upload as metadata. No file bytes are persisted;
/// the stored `file_url` is a synthesized placeholder path until real
/// object storage is wired up.
///
/// The metadata insert and the parent registration's status update are
/// committed in one transaction, so a failure on either side leaves no
/// orphaned upload row and no stale status.
///
/// # Endpoint
///
/// ```text
/// POST /api/upload-video
/// Content-Type: multipart/form-data
///
/// video=<file>  registrationId=<uuid>
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "videoUpload": { "id": "...", "processing_status": "uploaded", ... },
///   "message": "Video uploaded successfully"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing file or id, non-video MIME type, file over 100 MiB
/// - `404 Not Found`: Unknown registration id
/// - `500 Internal Server Error`: Database failure

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Multipart, State},
    Json,
};
use lanesight_shared::models::registration::RegistrationStatus;
use lanesight_shared::models::{CreateVideoUpload, Registration, VideoUpload};
use serde::Serialize;
use uuid::Uuid;

/// Maximum accepted video size: 100 MiB
pub const MAX_VIDEO_BYTES: usize = 100 * 1024 * 1024;

/// Request body limit for the upload route
///
/// Kept well above `MAX_VIDEO_BYTES` so oversized files reach the
/// explicit size check and get its error message instead of a generic
/// framework rejection.
pub const UPLOAD_BODY_LIMIT: usize = 256 * 1024 * 1024;

/// Multipart field name for the file
const FIELD_VIDEO: &str = "video";

/// Multipart field name for the registration id
const FIELD_REGISTRATION_ID: &str = "registrationId";

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Always true on the success path
    pub success: bool,

    /// The recorded upload row
    #[serde(rename = "videoUpload")]
    pub video_upload: VideoUpload,

    /// Human-readable outcome
    pub message: String,
}

/// The file part of the multipart form, as received
#[derive(Debug)]
struct VideoPart {
    filename: String,
    content_type: Option<String>,
    size: usize,
}

/// Validates the file part against the upload contract
///
/// Runs before any database access: a rejected file must leave no
/// trace. Checks MIME prefix first, then size, mirroring the order the
/// client sees errors in.
fn validate_video(part: &VideoPart) -> Result<(), ApiError> {
    let is_video = part
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("video/"));
    if !is_video {
        return Err(ApiError::Validation(
            "Only video files are allowed".to_string(),
        ));
    }

    if part.size > MAX_VIDEO_BYTES {
        return Err(ApiError::Validation(
            "File size must be less than 100MB".to_string(),
        ));
    }

    Ok(())
}

/// Upload endpoint handler
pub async fn upload_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let mut video: Option<VideoPart> = None;
    let mut registration_id_raw: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some(FIELD_VIDEO) => {
                let filename = field.file_name().unwrap_or("video").to_string();
                let content_type = field.content_type().map(|ct| ct.to_string());
                // Bytes are read for their length only, then dropped.
                let data = field.bytes().await?;
                video = Some(VideoPart {
                    filename,
                    content_type,
                    size: data.len(),
                });
            }
            Some(FIELD_REGISTRATION_ID) => {
                registration_id_raw = Some(field.text().await?);
            }
            _ => {}
        }
    }

    let video = video.ok_or_else(|| {
        ApiError::Validation("Video file and registration ID are required".to_string())
    })?;
    let registration_id_raw = registration_id_raw.ok_or_else(|| {
        ApiError::Validation("Video file and registration ID are required".to_string())
    })?;

    validate_video(&video)?;

    let registration_id = Uuid::parse_str(registration_id_raw.trim())
        .map_err(|_| ApiError::Validation("Valid registration ID is required".to_string()))?;

    let registration = Registration::find_by_id(&state.db, registration_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;

    // Placeholder path; no bytes live behind it until object storage exists.
    let file_url = format!("/uploads/{}/{}", registration.id, video.filename);

    let mut tx = state.db.begin().await?;
    let upload = VideoUpload::create(
        &mut tx,
        CreateVideoUpload {
            registration_id: registration.id,
            original_filename: video.filename,
            file_url,
            file_size: video.size as i64,
        },
    )
    .await?;
    Registration::mark_video_uploaded(&mut tx, registration.id).await?;
    tx.commit().await?;

    tracing::info!(
        registration_id = %registration.id,
        upload_id = %upload.id,
        file_size = upload.file_size,
        status = %RegistrationStatus::VideoUploaded,
        "Video upload recorded"
    );

    Ok(Json(UploadResponse {
        success: true,
        video_upload: upload,
        message: "Video uploaded successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(content_type: Option<&str>, size: usize) -> VideoPart {
        VideoPart {
            filename: "drive.mp4".to_string(),
            content_type: content_type.map(|s| s.to_string()),
            size,
        }
    }

    #[test]
    fn test_accepts_video_within_limit() {
        assert!(validate_video(&part(Some("video/mp4"), 5 * 1024 * 1024)).is_ok());
        assert!(validate_video(&part(Some("video/webm"), 1)).is_ok());
        // Exactly at the limit still passes
        assert!(validate_video(&part(Some("video/mp4"), MAX_VIDEO_BYTES)).is_ok());
    }

    #[test]
    fn test_rejects_non_video_mime() {
        let err = validate_video(&part(Some("image/png"), 10)).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        // Missing content type is treated as non-video
        let err = validate_video(&part(None, 10)).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_rejects_oversized_file() {
        let err = validate_video(&part(Some("video/mp4"), MAX_VIDEO_BYTES + 1)).unwrap_err();
        let ApiError::Validation(msg) = err else {
            panic!("expected validation error");
        };
        assert!(msg.contains("100MB"));
    }

    #[test]
    fn test_body_limit_exceeds_video_limit() {
        assert!(UPLOAD_BODY_LIMIT > MAX_VIDEO_BYTES);
    }
}
