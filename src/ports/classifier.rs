//! Classifier port: the prediction-submission contract.
//!
//! One call shape for both roles: an image plus a role context in, a
//! [`Prediction`] out. At most one call is in flight per flow instance;
//! the caller enforces that by refusing resubmission while a call is
//! outstanding.

use crate::domain::{IntakeForm, Prediction, StagedFile};

/// The image bytes handed to the classifier.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl From<&StagedFile> for ImagePayload {
    fn from(staged: &StagedFile) -> Self {
        Self {
            file_name: staged.file_name.clone(),
            mime_type: staged.mime_type.clone(),
            bytes: staged.bytes.clone(),
        }
    }
}

/// Who is submitting, and what goes along with the image.
#[derive(Debug, Clone)]
pub enum SubmissionContext {
    /// Clinician submission, keyed by the clinician identity.
    Clinician { doctor_id: String },
    /// Patient self-service submission with the validated intake form.
    Patient { intake: IntakeForm },
}

/// A complete submission to the classifier.
#[derive(Debug, Clone)]
pub struct ClassificationRequest {
    pub image: ImagePayload,
    pub context: SubmissionContext,
}

/// Error type for classifier operations.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Prediction request failed: {0}")]
    Transport(String),

    #[error("Prediction failed ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Prediction response invalid: {0}")]
    InvalidResponse(String),
}

/// Trait for the remote classifier (or its simulated substitute).
pub trait Classifier: Send + Sync {
    /// Classify one image.
    ///
    /// # Errors
    /// Returns [`ClassifierError`] on transport failure or a non-success
    /// backend response.
    fn classify(&self, request: &ClassificationRequest) -> Result<Prediction, ClassifierError>;
}
