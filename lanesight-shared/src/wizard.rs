/// Registration funnel flow model
///
/// The demo funnel is a three-step wizard: enter an email, upload a
/// video, see the success screen. This module models that flow as a
/// typed state machine so clients (web UI, demo tooling) share one
/// definition of which transitions are legal.
///
/// Nothing here persists. The registration ID lives only in the state
/// value; a reload starts over at the email step.
///
/// # Example
///
/// ```
/// use lanesight_shared::wizard::{WizardState, WizardStep};
/// use uuid::Uuid;
///
/// let mut wizard = WizardState::new();
/// assert_eq!(wizard.step(), WizardStep::Email);
///
/// let registration_id = Uuid::new_v4();
/// wizard.registration_succeeded(registration_id).unwrap();
/// assert_eq!(wizard.step(), WizardStep::Upload);
///
/// wizard.select_file("drive.mp4", "video/mp4", 5 * 1024 * 1024).unwrap();
/// wizard.upload_succeeded().unwrap();
/// assert_eq!(wizard.step(), WizardStep::Success);
///
/// // One backward affordance: submit another video for the same registration.
/// wizard.upload_another().unwrap();
/// assert_eq!(wizard.registration_id(), Some(registration_id));
/// ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Steps of the funnel, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Collecting the email address
    Email,

    /// Collecting the video file
    Upload,

    /// Upload recorded, showing confirmation
    Success,
}

/// Reasons a wizard operation is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// A transition was requested from the wrong step
    #[error("invalid transition from {from:?}: {action}")]
    InvalidTransition {
        /// Step the wizard was on
        from: WizardStep,
        /// Operation that was attempted
        action: &'static str,
    },

    /// The selected file is not a video
    #[error("selected file has non-video MIME type: {0}")]
    NotAVideo(String),
}

/// A file the user has picked but not yet submitted
///
/// Drag-and-drop and the file picker both land here. The MIME prefix
/// filter applied on selection is a convenience only; the server
/// re-validates on upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    /// Filename as reported by the browser
    pub name: String,

    /// MIME type as reported by the browser
    pub mime_type: String,

    /// Size in bytes
    pub size: u64,
}

/// Transient client-side state of the funnel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    step: WizardStep,
    registration_id: Option<Uuid>,
    selected_file: Option<SelectedFile>,
}

impl WizardState {
    /// Starts a fresh wizard at the email step
    pub fn new() -> Self {
        Self {
            step: WizardStep::Email,
            registration_id: None,
            selected_file: None,
        }
    }

    /// Current step
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Registration ID obtained from the register endpoint, if any
    pub fn registration_id(&self) -> Option<Uuid> {
        self.registration_id
    }

    /// File currently staged for upload, if any
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    /// Advances Email -> Upload after a successful register call
    ///
    /// # Errors
    ///
    /// Rejected unless the wizard is on the email step.
    pub fn registration_succeeded(&mut self, registration_id: Uuid) -> Result<(), WizardError> {
        if self.step != WizardStep::Email {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                action: "registration_succeeded",
            });
        }

        self.registration_id = Some(registration_id);
        self.step = WizardStep::Upload;
        Ok(())
    }

    /// Stages a file on the upload step
    ///
    /// Applies the client-side `video/` prefix filter. The staged file
    /// replaces any previous selection.
    ///
    /// # Errors
    ///
    /// Rejected off the upload step or for non-video MIME types.
    pub fn select_file(
        &mut self,
        name: &str,
        mime_type: &str,
        size: u64,
    ) -> Result<(), WizardError> {
        if self.step != WizardStep::Upload {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                action: "select_file",
            });
        }

        if !mime_type.starts_with("video/") {
            return Err(WizardError::NotAVideo(mime_type.to_string()));
        }

        self.selected_file = Some(SelectedFile {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            size,
        });
        Ok(())
    }

    /// Advances Upload -> Success after a successful upload call
    ///
    /// Clears the staged file; the registration ID is kept so another
    /// upload can follow.
    ///
    /// # Errors
    ///
    /// Rejected unless the wizard is on the upload step.
    pub fn upload_succeeded(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Upload {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                action: "upload_succeeded",
            });
        }

        self.selected_file = None;
        self.step = WizardStep::Success;
        Ok(())
    }

    /// Returns Success -> Upload to submit another video
    ///
    /// The only backward transition in the funnel. The registration ID
    /// is retained so the next upload lands under the same record.
    ///
    /// # Errors
    ///
    /// Rejected unless the wizard is on the success step.
    pub fn upload_another(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Success {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                action: "upload_another",
            });
        }

        self.step = WizardStep::Upload;
        Ok(())
    }

    /// Resets to a fresh wizard, dropping all transient state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}
