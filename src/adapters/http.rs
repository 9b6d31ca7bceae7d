//! Live-mode adapters: reqwest clients for the classifier backend and the
//! history store.
//!
//! Calls run on worker threads (classification) or inside the event loop
//! with bounded timeouts (history), so the blocking client is the right
//! shape here; there is no async runtime in this binary.

use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;

use crate::domain::Prediction;
use crate::ports::{
    ClassificationRequest, Classifier, ClassifierError, HistoryError, HistoryStore,
    SubmissionContext,
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

fn build_client() -> Result<Client, String> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| e.to_string())
}

fn status_error(response: Response) -> (u16, String) {
    let status = response.status().as_u16();
    let message = response
        .text()
        .unwrap_or_default()
        .chars()
        .take(200)
        .collect();
    (status, message)
}

/// Classifier backed by `POST {base}/api/predict`.
pub struct HttpClassifier {
    http: Client,
    base_url: String,
}

impl HttpClassifier {
    /// # Errors
    /// Returns [`ClassifierError::Transport`] if the client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClassifierError> {
        Ok(Self {
            http: build_client().map_err(ClassifierError::Transport)?,
            base_url: base_url.into(),
        })
    }
}

impl Classifier for HttpClassifier {
    fn classify(&self, request: &ClassificationRequest) -> Result<Prediction, ClassifierError> {
        let image = Part::bytes(request.image.bytes.clone())
            .file_name(request.image.file_name.clone())
            .mime_str(&request.image.mime_type)
            .map_err(|e| ClassifierError::Transport(e.to_string()))?;

        let form = Form::new().part("image", image);
        let form = match &request.context {
            SubmissionContext::Clinician { doctor_id } => form.text("doctor_id", doctor_id.clone()),
            SubmissionContext::Patient { intake } => {
                let payload = serde_json::to_string(intake)
                    .map_err(|e| ClassifierError::Transport(e.to_string()))?;
                form.text("patient_data", payload)
            }
        };

        let response = self
            .http
            .post(format!("{}/api/predict", self.base_url))
            .multipart(form)
            .send()
            .map_err(|e| ClassifierError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let (status, message) = status_error(response);
            return Err(ClassifierError::Backend { status, message });
        }

        response
            .json::<Prediction>()
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct PredictionsResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

/// History store backed by the backend's predictions endpoints.
pub struct HttpHistoryStore {
    http: Client,
    base_url: String,
}

impl HttpHistoryStore {
    /// # Errors
    /// Returns [`HistoryError::Transport`] if the client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, HistoryError> {
        Ok(Self {
            http: build_client().map_err(HistoryError::Transport)?,
            base_url: base_url.into(),
        })
    }
}

impl HistoryStore for HttpHistoryStore {
    fn load(&self, doctor_id: &str) -> Result<Vec<Prediction>, HistoryError> {
        let response = self
            .http
            .get(format!("{}/api/predictions", self.base_url))
            .query(&[("doctor_id", doctor_id)])
            .send()
            .map_err(|e| HistoryError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let (status, message) = status_error(response);
            return Err(HistoryError::Backend { status, message });
        }

        let body: PredictionsResponse = response
            .json()
            .map_err(|e| HistoryError::InvalidResponse(e.to_string()))?;
        Ok(body.predictions)
    }

    fn save(&self, doctor_id: &str, prediction: &Prediction) -> Result<(), HistoryError> {
        let response = self
            .http
            .post(format!("{}/api/save_prediction", self.base_url))
            .json(&serde_json::json!({
                "doctor_id": doctor_id,
                "prediction": prediction,
            }))
            .send()
            .map_err(|e| HistoryError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let (status, message) = status_error(response);
            return Err(HistoryError::Backend { status, message });
        }
        Ok(())
    }
}
