//! Simulated-mode adapters: canned classifier and seeded history.
//!
//! These exist so the surrounding UI can be exercised without a live
//! backend. The classifier resolves after a fixed latency with an entry
//! from a small fixed catalog, irrespective of input.

use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use chrono::Utc;

use crate::domain::Prediction;
use crate::ports::{
    AuthError, Authenticator, ClassificationRequest, Classifier, ClassifierError, Credentials,
    HistoryError, HistoryStore,
};

/// Placeholder preview used by the canned catalog (a small grey SVG tile).
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMTAwIiBoZWlnaHQ9IjEwMCIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj48cmVjdCB3aWR0aD0iMTAwIiBoZWlnaHQ9IjEwMCIgZmlsbD0iI2VlZSIvPjx0ZXh0IHg9IjUwJSIgeT0iNTAlIiBmb250LXNpemU9IjEyIiB0ZXh0LWFuY2hvcj0ibWlkZGxlIiBkeT0iLjNlbSI+SW1hZ2U8L3RleHQ+PC9zdmc+";

/// Default simulated classifier latency.
const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

/// The fixed two-disease catalog, newest first.
///
/// Also serves as the seeded history list for the simulated store.
#[must_use]
pub fn catalog() -> Vec<Prediction> {
    vec![
        Prediction {
            id: "1".to_string(),
            disease: "Melanoma".to_string(),
            confidence: 92.5,
            causes: vec![
                "Excessive UV exposure".to_string(),
                "Genetic factors".to_string(),
                "Multiple moles".to_string(),
            ],
            treatment: "Immediate consultation with dermatologist required. Surgical \
                        excision may be necessary. Regular monitoring essential."
                .to_string(),
            image: PLACEHOLDER_IMAGE.to_string(),
            date: Utc::now(),
            patient_name: Some("John Doe".to_string()),
        },
        Prediction {
            id: "2".to_string(),
            disease: "Eczema".to_string(),
            confidence: 87.3,
            causes: vec![
                "Allergic reaction".to_string(),
                "Dry skin".to_string(),
                "Environmental irritants".to_string(),
            ],
            treatment: "Apply moisturizing cream regularly. Use prescribed topical \
                        corticosteroids. Avoid known allergens and irritants."
                .to_string(),
            image: PLACEHOLDER_IMAGE.to_string(),
            date: Utc::now() - chrono::Duration::days(1),
            patient_name: Some("Jane Smith".to_string()),
        },
    ]
}

/// Simulated classifier: fixed latency, fixed answer.
pub struct MockClassifier {
    latency: Duration,
}

impl MockClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
        }
    }

    /// Override the latency (zero for tests).
    #[must_use]
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for MockClassifier {
    fn classify(&self, _request: &ClassificationRequest) -> Result<Prediction, ClassifierError> {
        thread::sleep(self.latency);

        let mut prediction = catalog()
            .into_iter()
            .next()
            .ok_or_else(|| ClassifierError::InvalidResponse("empty catalog".to_string()))?;
        prediction.id = Prediction::fresh_id();
        prediction.date = Utc::now();
        Ok(prediction)
    }
}

/// Simulated history store: in-memory, seeded with the catalog.
pub struct MockHistoryStore {
    entries: Mutex<Vec<Prediction>>,
}

impl MockHistoryStore {
    /// Store seeded with the two-entry catalog.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            entries: Mutex::new(catalog()),
        }
    }

    /// Empty store, for tests.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl HistoryStore for MockHistoryStore {
    fn load(&self, _doctor_id: &str) -> Result<Vec<Prediction>, HistoryError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| HistoryError::Transport("history store lock poisoned".to_string()))?;
        Ok(entries.clone())
    }

    fn save(&self, _doctor_id: &str, prediction: &Prediction) -> Result<(), HistoryError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| HistoryError::Transport("history store lock poisoned".to_string()))?;
        entries.insert(0, prediction.clone());
        Ok(())
    }
}

/// Basic credential check: accept iff both fields are non-empty, with an
/// explicit rejection otherwise. The backend exposes no auth endpoint, so
/// this serves both modes; identity is the trimmed email.
pub struct BasicAuthenticator;

impl Authenticator for BasicAuthenticator {
    fn authenticate(&self, credentials: &Credentials) -> Result<String, AuthError> {
        if credentials.email.trim().is_empty() || credentials.password.trim().is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        Ok(credentials.email.trim().to_string())
    }
}
