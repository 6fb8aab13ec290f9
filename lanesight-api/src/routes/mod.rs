/// API route handlers
///
/// - `health`: Health check endpoint
/// - `register`: Email registration
/// - `upload`: Video upload metadata recording
/// - `admin`: Registration listing with summary stats

pub mod admin;
pub mod health;
pub mod register;
pub mod upload;
