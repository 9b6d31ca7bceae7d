//! # Dermascan
//!
//! Terminal client for a skin-condition image classification service,
//! serving two roles: a clinician who reviews and archives predictions,
//! and a self-service patient who submits one image plus a short intake
//! form for an instant result.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: core types (intake form, staged upload, prediction)
//! - `ports`: trait definitions for external collaborators
//! - `adapters`: concrete implementations (simulated, HTTP, mailto)
//! - `application`: use cases orchestrating domain and ports
//! - `tui`: terminal user interface and the screen state machine

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::{Config, Mode};
pub use domain::{IntakeForm, Prediction, StagedFile};

/// Result type for dermascan operations.
pub type Result<T> = std::result::Result<T, DermascanError>;

/// Main error type for dermascan.
///
/// The application services and the prediction worker speak this type;
/// the views stringify it at the render boundary and `main` wraps it in
/// `anyhow` at the very top.
#[derive(Debug, thiserror::Error)]
pub enum DermascanError {
    #[error("Classifier error: {0}")]
    Classifier(#[from] ports::ClassifierError),

    #[error("History error: {0}")]
    History(#[from] ports::HistoryError),

    #[error(transparent)]
    Auth(#[from] ports::AuthError),

    #[error("Mail error: {0}")]
    Mail(#[from] ports::MailError),
}
