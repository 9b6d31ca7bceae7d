//! Prediction result types.
//!
//! Represents the classifier's output for one submitted image. A prediction
//! is immutable once received; corrections require a new submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One classification result, paired with the image that produced it.
///
/// Field names follow the classifier backend's wire format (camelCase).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Unique identifier; generated locally when the backend omits one.
    #[serde(default = "uuid_v4")]
    pub id: String,

    /// Predicted condition label.
    pub disease: String,

    /// Model confidence as a percentage in `[0, 100]`.
    pub confidence: f64,

    /// Possible causes, in the order the model reports them.
    pub causes: Vec<String>,

    /// Recommended treatment text.
    pub treatment: String,

    /// The submitted image as a `data:` URL.
    pub image: String,

    /// When the prediction was produced.
    pub date: DateTime<Utc>,

    /// Patient the prediction is associated with, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
}

impl Prediction {
    /// Generate a fresh local identifier.
    #[must_use]
    pub fn fresh_id() -> String {
        uuid_v4()
    }

    /// Confidence formatted for display, one decimal place.
    #[must_use]
    pub fn confidence_label(&self) -> String {
        format!("{:.1}%", self.confidence)
    }
}

/// Generate a UUID v4 string using a CSPRNG.
///
/// ChaCha20Rng is seeded from OS entropy so identifiers are unpredictable
/// on all platforms.
pub(crate) fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_generation_is_unique_and_formatted() {
        let id1 = uuid_v4();
        let id2 = uuid_v4();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36);
    }

    #[test]
    fn deserializes_backend_payload() {
        let json = r#"{
            "disease": "Melanoma",
            "confidence": 92.5,
            "causes": ["Excessive UV exposure"],
            "treatment": "Immediate consultation with dermatologist required.",
            "image": "data:image/png;base64,AAAA",
            "date": "2026-08-30T12:00:00Z",
            "patientName": "John Doe"
        }"#;
        let prediction: Prediction = serde_json::from_str(json).expect("deserialize");
        assert_eq!(prediction.disease, "Melanoma");
        assert_eq!(prediction.patient_name.as_deref(), Some("John Doe"));
        // Backend omitted the id; a local one is generated.
        assert_eq!(prediction.id.len(), 36);
    }

    #[test]
    fn confidence_label_has_one_decimal() {
        let json = r#"{
            "disease": "Eczema",
            "confidence": 87.34,
            "causes": [],
            "treatment": "",
            "image": "",
            "date": "2026-08-30T12:00:00Z"
        }"#;
        let prediction: Prediction = serde_json::from_str(json).expect("deserialize");
        assert_eq!(prediction.confidence_label(), "87.3%");
    }
}
