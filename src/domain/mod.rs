//! Domain layer: Core business types and logic.
//!
//! This module contains pure types with no I/O. Validation is
//! side-effect-free and all wire-facing types are serializable.

mod intake;
mod prediction;
mod upload;

pub use intake::{Gender, IntakeDraft, IntakeForm, ValidationErrors};
pub use prediction::Prediction;
pub use upload::{check_constraints, mime_for_path, StagedFile, UploadRejection, MAX_UPLOAD_BYTES};
