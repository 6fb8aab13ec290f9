/// Email registration endpoint
///
/// Registers a lead's email for the demo funnel. Registration is
/// idempotent by lookup: posting an email that already has a row
/// returns that row with an "already registered" message instead of
/// erroring, so the same id comes back on every call.
///
/// # Endpoint
///
/// ```text
/// POST /api/register
/// Content-Type: application/json
///
/// { "email": "lead@example.com" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "registration": { "id": "...", "email": "...", "status": "pending", ... },
///   "message": "Registration successful"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Email absent or missing an `@`
/// - `500 Internal Server Error`: Database failure

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use lanesight_shared::models::Registration;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
///
/// The email check is intentionally shallow: non-empty and contains an
/// `@`. The funnel is lead capture, not account creation, and the
/// original frontend promises nothing stricter.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[serde(default)]
    #[validate(length(min = 1, message = "Valid email is required"))]
    pub email: String,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Always true on the success path
    pub success: bool,

    /// The (new or pre-existing) registration row
    pub registration: Registration,

    /// Human-readable outcome
    pub message: String,
}

/// Returns whether an email passes the funnel's validation contract
pub fn email_is_valid(email: &str) -> bool {
    !email.is_empty() && email.contains('@')
}

/// Register endpoint handler
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    req.validate()
        .map_err(|_| ApiError::Validation("Valid email is required".to_string()))?;

    if !email_is_valid(&req.email) {
        return Err(ApiError::Validation("Valid email is required".to_string()));
    }

    // Lookup-before-insert keeps re-registration idempotent.
    if let Some(existing) = Registration::find_by_email(&state.db, &req.email).await? {
        tracing::debug!(registration_id = %existing.id, "Email already registered");
        return Ok(Json(RegisterResponse {
            success: true,
            registration: existing,
            message: "Email already registered".to_string(),
        }));
    }

    let registration = Registration::create(&state.db, &req.email).await?;
    tracing::info!(registration_id = %registration.id, "New registration created");

    Ok(Json(RegisterResponse {
        success: true,
        registration,
        message: "Registration successful".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation_contract() {
        assert!(email_is_valid("a@b.com"));
        assert!(email_is_valid("weird@"), "only the @ is required");
        assert!(email_is_valid("@"), "only the @ is required");

        assert!(!email_is_valid(""));
        assert!(!email_is_valid("no-at-sign.com"));
    }

    #[test]
    fn test_no_upper_length_bound_on_email() {
        // The contract is non-empty plus an @; long addresses pass.
        let email = format!("{}@example.com", "a".repeat(400));
        let req = RegisterRequest { email };
        assert!(req.validate().is_ok());
        assert!(email_is_valid(&req.email));
    }

    #[test]
    fn test_missing_email_field_defaults_empty() {
        let req: RegisterRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.email, "");
        assert!(req.validate().is_err());
    }
}
