//! Background workers for the event loop's suspension points.
//!
//! Two workers exist: the classifier call (the long one) and preview
//! derivation (fire-and-forget). Each runs on its own thread and reports
//! back over an mpsc channel polled by the main loop, so the UI stays
//! responsive. Dropping a handle abandons the result; the thread runs to
//! completion and the late message is discarded with the receiver.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::DermascanError;
use crate::application::SubmissionService;
use crate::domain::{Prediction, StagedFile};
use crate::ports::{ClassificationRequest, Classifier};

/// Outcome of a classifier call.
#[derive(Debug)]
pub enum PredictProgress {
    /// Call finished with a prediction.
    Complete(Prediction),
    /// Call failed; the flow stringifies this for its error banner.
    Error(DermascanError),
}

/// Handle to a running classifier call.
///
/// While a flow holds one of these, it must refuse new submissions.
pub struct PredictWorkerHandle {
    progress_rx: Receiver<PredictProgress>,
    _handle: JoinHandle<()>,
}

impl PredictWorkerHandle {
    /// Non-blocking poll for the outcome.
    #[must_use]
    pub fn try_recv(&self) -> Option<PredictProgress> {
        self.progress_rx.try_recv().ok()
    }
}

/// Spawns classifier calls off the event loop.
pub struct PredictWorker;

impl PredictWorker {
    /// Start one classification in the background.
    pub fn spawn(
        service: SubmissionService<dyn Classifier>,
        request: ClassificationRequest,
    ) -> PredictWorkerHandle {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run(service, request, &tx);
        });

        PredictWorkerHandle {
            progress_rx: rx,
            _handle: handle,
        }
    }

    fn run(
        service: SubmissionService<dyn Classifier>,
        request: ClassificationRequest,
        tx: &Sender<PredictProgress>,
    ) {
        let progress = match service.submit(request) {
            Ok(prediction) => PredictProgress::Complete(prediction),
            Err(e) => PredictProgress::Error(e),
        };
        // Receiver may be gone if the user navigated away; that abandons
        // the result by design.
        let _ = tx.send(progress);
    }
}

/// Handle to a running preview derivation.
pub struct PreviewWorkerHandle {
    /// Name of the staged file the preview belongs to, so a replacement
    /// staged in the meantime does not receive a stale preview.
    pub file_name: String,
    preview_rx: Receiver<String>,
    _handle: JoinHandle<()>,
}

impl PreviewWorkerHandle {
    /// Non-blocking poll for the derived `data:` URL.
    #[must_use]
    pub fn try_recv(&self) -> Option<String> {
        self.preview_rx.try_recv().ok()
    }
}

/// Spawns preview derivation off the event loop.
pub struct PreviewWorker;

impl PreviewWorker {
    /// Derive the `data:` URL preview for a freshly staged file.
    pub fn spawn(staged: &StagedFile) -> PreviewWorkerHandle {
        let (tx, rx) = mpsc::channel();
        let file_name = staged.file_name.clone();
        let mime_type = staged.mime_type.clone();
        let bytes = staged.bytes.clone();

        let handle = thread::spawn(move || {
            let _ = tx.send(StagedFile::encode_preview(&mime_type, &bytes));
        });

        PreviewWorkerHandle {
            file_name,
            preview_rx: rx,
            _handle: handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::adapters::mock::MockClassifier;
    use crate::ports::{ClassifierError, ImagePayload, SubmissionContext};

    fn request() -> ClassificationRequest {
        ClassificationRequest {
            image: ImagePayload {
                file_name: "lesion.jpg".to_string(),
                mime_type: "image/jpeg".to_string(),
                bytes: vec![0xFF, 0xD8],
            },
            context: SubmissionContext::Clinician {
                doctor_id: "doc-1".to_string(),
            },
        }
    }

    fn wait_for(handle: &PredictWorkerHandle) -> PredictProgress {
        for _ in 0..100 {
            if let Some(progress) = handle.try_recv() {
                return progress;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("worker did not report within 1s");
    }

    #[test]
    fn worker_reports_completion() {
        let classifier: Arc<dyn Classifier> =
            Arc::new(MockClassifier::with_latency(Duration::ZERO));
        let service = SubmissionService::new(classifier);
        let handle = PredictWorker::spawn(service, request());

        match wait_for(&handle) {
            PredictProgress::Complete(prediction) => assert_eq!(prediction.disease, "Melanoma"),
            PredictProgress::Error(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn worker_reports_a_typed_error() {
        struct RefusingClassifier;

        impl Classifier for RefusingClassifier {
            fn classify(
                &self,
                _request: &ClassificationRequest,
            ) -> std::result::Result<Prediction, ClassifierError> {
                Err(ClassifierError::Transport("connection refused".to_string()))
            }
        }

        let classifier: Arc<dyn Classifier> = Arc::new(RefusingClassifier);
        let handle = PredictWorker::spawn(SubmissionService::new(classifier), request());

        match wait_for(&handle) {
            PredictProgress::Error(DermascanError::Classifier(ClassifierError::Transport(_))) => {}
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn preview_worker_delivers_a_data_url() {
        let staged = StagedFile::stage("lesion.png", "image/png", vec![1, 2, 3]).expect("stage");
        let handle = PreviewWorker::spawn(&staged);

        for _ in 0..100 {
            if let Some(url) = handle.try_recv() {
                assert!(url.starts_with("data:image/png;base64,"));
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("preview not derived within 1s");
    }
}
