//! Patient intake form: raw draft, validated form, and the validation rules.
//!
//! The draft holds the raw text buffers exactly as typed. Validation runs
//! only on a submission attempt and never mutates the draft; the user edits
//! in place and resubmits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Inclusive age range accepted on the intake form.
pub const AGE_RANGE: std::ops::RangeInclusive<u8> = 1..=120;

/// Patient gender selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// All selectable values, in display order.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }

    /// Next value in display order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Other,
            Self::Other => Self::Male,
        }
    }

    /// Previous value in display order, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::Male => Self::Other,
            Self::Female => Self::Male,
            Self::Other => Self::Female,
        }
    }
}

/// Field-name to error-message mapping produced by validation.
///
/// An empty map means the form is valid.
pub type ValidationErrors = BTreeMap<&'static str, String>;

/// Raw intake buffers as typed by the patient.
#[derive(Debug, Clone, Default)]
pub struct IntakeDraft {
    pub full_name: String,
    pub age: String,
    pub gender: Option<Gender>,
    pub contact: String,
    pub symptoms: String,
}

impl IntakeDraft {
    /// Validate the draft against the intake rules.
    ///
    /// `has_image` reports whether an image is currently staged; the image
    /// is a required part of the submission even though it lives outside
    /// the form itself.
    #[must_use]
    pub fn validate(&self, has_image: bool) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if self.full_name.trim().is_empty() {
            errors.insert("fullName", "Full name is required".to_string());
        }

        match self.age.trim().parse::<u8>() {
            Ok(age) if AGE_RANGE.contains(&age) => {}
            _ => {
                errors.insert("age", "Valid age is required (1-120)".to_string());
            }
        }

        if self.gender.is_none() {
            errors.insert("gender", "Gender is required".to_string());
        }

        if !has_image {
            errors.insert("image", "Please upload an image".to_string());
        }

        errors
    }

    /// Validate and convert to a typed [`IntakeForm`].
    ///
    /// # Errors
    /// Returns the field error map if any rule fails.
    pub fn finalize(&self, has_image: bool) -> Result<IntakeForm, ValidationErrors> {
        let errors = self.validate(has_image);
        if !errors.is_empty() {
            return Err(errors);
        }

        let contact = self.contact.trim();
        let symptoms = self.symptoms.trim();

        Ok(IntakeForm {
            full_name: self.full_name.trim().to_string(),
            // Both checked by validate() above.
            age: self.age.trim().parse().unwrap_or(0),
            gender: self.gender.unwrap_or(Gender::Other),
            contact: (!contact.is_empty()).then(|| contact.to_string()),
            symptoms: (!symptoms.is_empty()).then(|| symptoms.to_string()),
        })
    }

    /// Wipe all text buffers from memory and reset the selection.
    ///
    /// Called when the flow is abandoned or a result supersedes the form,
    /// so patient-identifying text does not linger in UI state.
    pub fn clear_sensitive(&mut self) {
        self.full_name.zeroize();
        self.age.zeroize();
        self.contact.zeroize();
        self.symptoms.zeroize();
        self.gender = None;
    }
}

/// A validated intake form, ready for submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeForm {
    pub full_name: String,
    pub age: u8,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> IntakeDraft {
        IntakeDraft {
            full_name: "Jane Roe".to_string(),
            age: "34".to_string(),
            gender: Some(Gender::Female),
            contact: String::new(),
            symptoms: "itchy patch on forearm".to_string(),
        }
    }

    #[test]
    fn valid_draft_produces_empty_error_map() {
        assert!(valid_draft().validate(true).is_empty());
    }

    #[test]
    fn missing_fields_are_each_flagged() {
        let draft = IntakeDraft::default();
        let errors = draft.validate(false);
        assert!(errors.contains_key("fullName"));
        assert!(errors.contains_key("age"));
        assert!(errors.contains_key("gender"));
        assert!(errors.contains_key("image"));
    }

    #[test]
    fn whitespace_only_name_is_rejected() {
        let mut draft = valid_draft();
        draft.full_name = "   ".to_string();
        assert!(draft.validate(true).contains_key("fullName"));
    }

    #[test]
    fn age_bounds_are_inclusive() {
        let mut draft = valid_draft();
        for age in ["1", "120", "34"] {
            draft.age = age.to_string();
            assert!(!draft.validate(true).contains_key("age"), "age {age}");
        }
        for age in ["0", "121", "", "abc", "-3"] {
            draft.age = age.to_string();
            assert!(draft.validate(true).contains_key("age"), "age {age:?}");
        }
    }

    #[test]
    fn missing_image_is_flagged_alone() {
        let errors = valid_draft().validate(false);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("image"));
    }

    #[test]
    fn finalize_trims_and_drops_empty_optionals() {
        let mut draft = valid_draft();
        draft.full_name = "  Jane Roe ".to_string();
        let form = draft.finalize(true).expect("should validate");
        assert_eq!(form.full_name, "Jane Roe");
        assert_eq!(form.age, 34);
        assert!(form.contact.is_none());
        assert_eq!(form.symptoms.as_deref(), Some("itchy patch on forearm"));
    }

    #[test]
    fn clear_sensitive_wipes_buffers() {
        let mut draft = valid_draft();
        draft.clear_sensitive();
        assert!(draft.full_name.is_empty());
        assert!(draft.age.is_empty());
        assert!(draft.symptoms.is_empty());
        assert!(draft.gender.is_none());
    }

    #[test]
    fn intake_serializes_with_wire_field_names() {
        let form = valid_draft().finalize(true).expect("should validate");
        let json = serde_json::to_value(&form).expect("serialize");
        assert_eq!(json["fullName"], "Jane Roe");
        assert_eq!(json["gender"], "female");
        assert!(json.get("contact").is_none());
    }
}
