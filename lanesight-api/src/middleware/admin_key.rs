/// Admin key gate
///
/// The admin listing is gated by a single shared key configured via
/// `ADMIN_KEY` and sent by the client in the `X-Admin-Key` header. The
/// original site only compared the key client-side to toggle UI
/// visibility; here the check is enforced at the server.
///
/// Keys are compared by their SHA-256 digests so the comparison does
/// not short-circuit on the first differing byte.
///
/// # Example
///
/// ```text
/// GET /api/admin/registrations
/// X-Admin-Key: <key>
/// ```

use crate::{app::AppState, error::ApiError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

/// Header carrying the admin key
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Checks whether a presented key matches the configured one
///
/// Both sides are hashed before comparing; equal digests mean equal
/// keys, and the digest comparison runs over fixed-length values.
pub fn key_matches(presented: &str, configured: &str) -> bool {
    let presented_digest = Sha256::digest(presented.as_bytes());
    let configured_digest = Sha256::digest(configured.as_bytes());
    presented_digest == configured_digest
}

/// Axum middleware enforcing the admin key
///
/// Rejects with 401 when the header is missing or does not match.
pub async fn require_admin_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = req
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Admin key required".to_string()))?;

    if !key_matches(presented, &state.config.admin.key) {
        tracing::warn!("Rejected admin request with invalid key");
        return Err(ApiError::Unauthorized("Invalid admin key".to_string()));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_matches_exact() {
        assert!(key_matches("lane-admin-2024-demo", "lane-admin-2024-demo"));
    }

    #[test]
    fn test_key_rejects_mismatch() {
        assert!(!key_matches("wrong-key", "lane-admin-2024-demo"));
        assert!(!key_matches("", "lane-admin-2024-demo"));
        // Prefix of the real key is not enough
        assert!(!key_matches("lane-admin", "lane-admin-2024-demo"));
    }

    #[test]
    fn test_key_comparison_is_case_sensitive() {
        assert!(!key_matches("Lane-Admin-2024-Demo", "lane-admin-2024-demo"));
    }
}
