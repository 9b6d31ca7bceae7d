//! History store port: persistence for archived predictions.
//!
//! The store is scoped by clinician identity. Ordering on load is
//! newest-first; the application layer reconciles its in-memory list
//! against the store after every save.

use crate::domain::Prediction;

/// Error type for history operations.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("History request failed: {0}")]
    Transport(String),

    #[error("History request failed ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("History response invalid: {0}")]
    InvalidResponse(String),
}

/// Trait for the prediction history store.
pub trait HistoryStore: Send + Sync {
    /// Load the clinician's predictions, newest first.
    ///
    /// # Errors
    /// Returns [`HistoryError`] if the store cannot be reached or responds
    /// with a failure.
    fn load(&self, doctor_id: &str) -> Result<Vec<Prediction>, HistoryError>;

    /// Persist one prediction under the clinician's identity.
    ///
    /// # Errors
    /// Returns [`HistoryError`] if the store rejects or cannot be reached.
    fn save(&self, doctor_id: &str, prediction: &Prediction) -> Result<(), HistoryError>;
}
