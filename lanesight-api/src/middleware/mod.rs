/// Middleware modules for the API server
///
/// - `admin_key`: Shared-key gate for the admin listing
/// - `security`: OWASP response headers

pub mod admin_key;
pub mod security;
