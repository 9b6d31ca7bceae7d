//! History service: the clinician's archived prediction list.
//!
//! One save contract for every store strategy: append optimistically,
//! then persist, then reconcile from the source of truth. A failed
//! persist rolls the optimistic entry back; a failed reconcile keeps it.

use std::sync::Arc;

use crate::Result;
use crate::domain::Prediction;
use crate::ports::{HistoryError, HistoryStore};

/// The in-memory history list for one clinician session.
pub struct HistoryService<H: HistoryStore + ?Sized> {
    store: Arc<H>,
    doctor_id: String,
    entries: Vec<Prediction>,
}

impl<H: HistoryStore + ?Sized> HistoryService<H> {
    /// Open an empty session-scoped history; call [`refresh`](Self::refresh)
    /// on dashboard entry to populate it.
    pub fn open(store: Arc<H>, doctor_id: impl Into<String>) -> Self {
        Self {
            store,
            doctor_id: doctor_id.into(),
            entries: Vec::new(),
        }
    }

    /// Current entries, newest first. Read-only projection for rendering.
    #[must_use]
    pub fn entries(&self) -> &[Prediction] {
        &self.entries
    }

    #[must_use]
    pub fn doctor_id(&self) -> &str {
        &self.doctor_id
    }

    /// Reload the list from the store.
    ///
    /// # Errors
    /// Returns [`DermascanError::History`](crate::DermascanError) if the store cannot be read;
    /// the current list is left unchanged in that case.
    pub fn refresh(&mut self) -> Result<()> {
        let entries = self.store.load(&self.doctor_id)?;
        tracing::debug!(count = entries.len(), "History refreshed");
        self.entries = entries;
        Ok(())
    }

    /// Archive one prediction: optimistic front-insert, persist, reconcile.
    ///
    /// # Errors
    /// Returns [`DermascanError::History`](crate::DermascanError) if the persist fails; the
    /// optimistic entry is rolled back first. A reconcile failure after a
    /// successful persist is logged and the optimistic list stands.
    pub fn save(&mut self, prediction: &Prediction) -> Result<()> {
        self.entries.insert(0, prediction.clone());

        if let Err(e) = self.store.save(&self.doctor_id, prediction) {
            self.entries.remove(0);
            return Err(e.into());
        }

        match self.store.load(&self.doctor_id) {
            Ok(entries) => self.entries = entries,
            Err(e) => {
                tracing::warn!("History reconcile after save failed: {e}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DermascanError;
    use crate::adapters::mock::{catalog, MockHistoryStore};

    /// Store whose save always fails; load succeeds with an empty list.
    struct FailingStore;

    impl HistoryStore for FailingStore {
        fn load(&self, _doctor_id: &str) -> std::result::Result<Vec<Prediction>, HistoryError> {
            Ok(Vec::new())
        }

        fn save(
            &self,
            _doctor_id: &str,
            _prediction: &Prediction,
        ) -> std::result::Result<(), HistoryError> {
            Err(HistoryError::Transport("connection refused".to_string()))
        }
    }

    fn new_prediction() -> Prediction {
        let mut prediction = catalog().remove(0);
        prediction.id = Prediction::fresh_id();
        prediction.patient_name = Some("Jane Roe".to_string());
        prediction
    }

    #[test]
    fn refresh_populates_the_seed_list() {
        let mut history = HistoryService::open(Arc::new(MockHistoryStore::seeded()), "doc-1");
        assert!(history.entries().is_empty());
        history.refresh().expect("should refresh");
        assert_eq!(history.entries().len(), 2);
    }

    #[test]
    fn save_puts_the_new_prediction_first() {
        let mut history = HistoryService::open(Arc::new(MockHistoryStore::seeded()), "doc-1");
        history.refresh().expect("should refresh");

        let prediction = new_prediction();
        history.save(&prediction).expect("should save");

        assert_eq!(history.entries().len(), 3);
        assert_eq!(history.entries()[0].id, prediction.id);
    }

    #[test]
    fn failed_save_rolls_back_the_optimistic_entry() {
        let mut history = HistoryService::open(Arc::new(FailingStore), "doc-1");
        let err = history.save(&new_prediction()).unwrap_err();
        assert!(matches!(
            err,
            DermascanError::History(HistoryError::Transport(_))
        ));
        assert!(history.entries().is_empty());
    }
}
