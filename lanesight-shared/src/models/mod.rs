/// Database models
///
/// - `registration`: email-keyed lead records and their funnel status
/// - `video_upload`: metadata rows for client-submitted videos

pub mod registration;
pub mod video_upload;

pub use registration::{Registration, RegistrationStatus};
pub use video_upload::{CreateVideoUpload, VideoUpload};
