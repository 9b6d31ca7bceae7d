//! Ports layer: Trait definitions for external collaborators.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and its remote collaborators (classifier
//! backend, history store, authentication, mail composition). The strategy
//! behind each trait is chosen once at startup and injected; nothing reads
//! a mode switch at call time.

mod auth;
mod classifier;
mod history;
mod mail;

pub use auth::{AuthError, Authenticator, Credentials, DEMO_DOCTOR_ID};
pub use classifier::{
    ClassificationRequest, Classifier, ClassifierError, ImagePayload, SubmissionContext,
};
pub use history::{HistoryError, HistoryStore};
pub use mail::{MailComposer, MailError};
