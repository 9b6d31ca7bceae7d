//! Submission service: runs one classification request end to end.
//!
//! Thin orchestration over the classifier port: invoke the strategy,
//! check the response contract, and normalize the patient association.
//! Concurrency control (one outstanding call per flow) lives with the
//! caller, which holds the worker handle.

use std::sync::Arc;

use crate::Result;
use crate::domain::Prediction;
use crate::ports::{ClassificationRequest, Classifier, ClassifierError, SubmissionContext};

/// Service for submitting images to the classifier.
///
/// Generic over the injected strategy; `C = dyn Classifier` at the
/// composition root so the mode is fixed once at startup.
pub struct SubmissionService<C: Classifier + ?Sized> {
    classifier: Arc<C>,
}

impl<C: Classifier + ?Sized> Clone for SubmissionService<C> {
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
        }
    }
}

impl<C: Classifier + ?Sized> SubmissionService<C> {
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// Submit one image and produce the prediction.
    ///
    /// For patient submissions, the returned prediction's patient name is
    /// always the intake's full name, whatever the strategy reported.
    ///
    /// # Errors
    /// Returns [`DermascanError::Classifier`](crate::DermascanError) on transport or backend
    /// failure, or if the response violates the confidence contract.
    pub fn submit(&self, request: ClassificationRequest) -> Result<Prediction> {
        tracing::info!("Submitting image for classification");

        let mut prediction = self.classifier.classify(&request)?;

        if !(0.0..=100.0).contains(&prediction.confidence) {
            return Err(ClassifierError::InvalidResponse(format!(
                "confidence {} outside [0, 100]",
                prediction.confidence
            ))
            .into());
        }

        if let SubmissionContext::Patient { intake } = &request.context {
            prediction.patient_name = Some(intake.full_name.clone());
        }

        tracing::info!(
            disease = %prediction.disease,
            confidence = prediction.confidence,
            "Classification complete"
        );
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;

    use super::*;
    use crate::DermascanError;
    use crate::domain::{Gender, IntakeForm};
    use crate::ports::ImagePayload;

    /// Counts calls; answers with a configurable confidence.
    struct CountingClassifier {
        calls: AtomicUsize,
        confidence: f64,
    }

    impl CountingClassifier {
        fn new(confidence: f64) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                confidence,
            }
        }
    }

    impl Classifier for CountingClassifier {
        fn classify(
            &self,
            _request: &ClassificationRequest,
        ) -> std::result::Result<Prediction, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Prediction {
                id: Prediction::fresh_id(),
                disease: "Psoriasis".to_string(),
                confidence: self.confidence,
                causes: vec!["Immune response".to_string()],
                treatment: "Topical treatment".to_string(),
                image: String::new(),
                date: Utc::now(),
                patient_name: Some("ignored by patient flow".to_string()),
            })
        }
    }

    fn patient_request(full_name: &str) -> ClassificationRequest {
        ClassificationRequest {
            image: ImagePayload {
                file_name: "lesion.jpg".to_string(),
                mime_type: "image/jpeg".to_string(),
                bytes: vec![0xFF, 0xD8],
            },
            context: SubmissionContext::Patient {
                intake: IntakeForm {
                    full_name: full_name.to_string(),
                    age: 34,
                    gender: Gender::Female,
                    contact: None,
                    symptoms: None,
                },
            },
        }
    }

    #[test]
    fn submit_invokes_the_classifier_exactly_once() {
        let classifier = Arc::new(CountingClassifier::new(75.0));
        let service = SubmissionService::new(Arc::clone(&classifier));
        service
            .submit(patient_request("Jane Roe"))
            .expect("should classify");
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn patient_name_is_overridden_from_the_intake() {
        let service = SubmissionService::new(Arc::new(CountingClassifier::new(75.0)));
        let prediction = service
            .submit(patient_request("Jane Roe"))
            .expect("should classify");
        assert_eq!(prediction.patient_name.as_deref(), Some("Jane Roe"));
        assert!(!prediction.disease.is_empty());
        assert!((0.0..=100.0).contains(&prediction.confidence));
    }

    #[test]
    fn clinician_submission_keeps_strategy_patient_name() {
        let service = SubmissionService::new(Arc::new(CountingClassifier::new(75.0)));
        let request = ClassificationRequest {
            context: SubmissionContext::Clinician {
                doctor_id: "demo-doctor-123".to_string(),
            },
            ..patient_request("unused")
        };
        let prediction = service.submit(request).expect("should classify");
        assert_eq!(
            prediction.patient_name.as_deref(),
            Some("ignored by patient flow")
        );
    }

    #[test]
    fn out_of_range_confidence_is_an_invalid_response() {
        let service = SubmissionService::new(Arc::new(CountingClassifier::new(140.0)));
        let err = service.submit(patient_request("Jane Roe")).unwrap_err();
        assert!(matches!(
            err,
            DermascanError::Classifier(ClassifierError::InvalidResponse(_))
        ));
    }
}
