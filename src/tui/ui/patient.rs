//! Patient self-service flow: intake form, upload zone, one-shot result.
//!
//! The flow has two phases held in one state struct: filling the form, and
//! viewing the returned prediction. A successful result supersedes the form
//! and wipes its buffers; "new consultation" resets to a blank form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::domain::{Gender, IntakeDraft, Prediction, ValidationErrors};
use crate::ports::{ClassificationRequest, ImagePayload, SubmissionContext};
use crate::tui::styles::ClinicTheme;

use super::key_hints;
use super::result::render_prediction_card;
use super::upload::{render_upload_zone, UploadState};

/// Which input currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntakeField {
    #[default]
    FullName,
    Age,
    Gender,
    Contact,
    Symptoms,
    UploadPath,
}

impl IntakeField {
    const ORDER: [IntakeField; 6] = [
        IntakeField::FullName,
        IntakeField::Age,
        IntakeField::Gender,
        IntakeField::Contact,
        IntakeField::Symptoms,
        IntakeField::UploadPath,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name *",
            Self::Age => "Age *",
            Self::Gender => "Gender *",
            Self::Contact => "Contact (optional)",
            Self::Symptoms => "Symptoms (optional)",
            Self::UploadPath => "Image Path *",
        }
    }

    /// The validation-error key this field reports under, if any.
    fn error_key(self) -> Option<&'static str> {
        match self {
            Self::FullName => Some("fullName"),
            Self::Age => Some("age"),
            Self::Gender => Some("gender"),
            Self::UploadPath => Some("image"),
            Self::Contact | Self::Symptoms => None,
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Patient flow state.
pub struct PatientFlowState {
    pub draft: IntakeDraft,
    pub upload: UploadState,
    pub focus: IntakeField,
    /// Field errors from the last submission attempt.
    pub errors: ValidationErrors,
    /// The returned prediction; `Some` switches the flow to the result phase.
    pub result: Option<Prediction>,
    /// Submission-level failure banner.
    pub error: Option<String>,
    pub is_loading: bool,
}

impl Default for PatientFlowState {
    fn default() -> Self {
        Self {
            draft: IntakeDraft::default(),
            upload: UploadState::default(),
            focus: IntakeField::default(),
            errors: ValidationErrors::new(),
            result: None,
            error: None,
            is_loading: false,
        }
    }
}

impl PatientFlowState {
    pub fn input_char(&mut self, c: char) {
        match self.focus {
            IntakeField::FullName => self.draft.full_name.push(c),
            IntakeField::Age => {
                if c.is_ascii_digit() && self.draft.age.len() < 3 {
                    self.draft.age.push(c);
                }
            }
            IntakeField::Gender => {}
            IntakeField::Contact => self.draft.contact.push(c),
            IntakeField::Symptoms => self.draft.symptoms.push(c),
            IntakeField::UploadPath => self.upload.input_char(c),
        }
    }

    pub fn delete_char(&mut self) {
        match self.focus {
            IntakeField::FullName => {
                self.draft.full_name.pop();
            }
            IntakeField::Age => {
                self.draft.age.pop();
            }
            IntakeField::Gender => self.draft.gender = None,
            IntakeField::Contact => {
                self.draft.contact.pop();
            }
            IntakeField::Symptoms => {
                self.draft.symptoms.pop();
            }
            IntakeField::UploadPath => self.upload.delete_char(),
        }
    }

    pub fn cycle_gender(&mut self, forward: bool) {
        if self.focus != IntakeField::Gender {
            return;
        }
        self.draft.gender = Some(match (self.draft.gender, forward) {
            (None, _) => Gender::Male,
            (Some(g), true) => g.next(),
            (Some(g), false) => g.prev(),
        });
    }

    /// Fill in a plausible demo patient. Leaves the image path alone.
    pub fn load_sample_data(&mut self) {
        self.draft.full_name = "Jane Smith".to_string();
        self.draft.age = "28".to_string();
        self.draft.gender = Some(Gender::Female);
        self.draft.contact = "jane.smith@example.com".to_string();
        self.draft.symptoms = "Red, itchy patches on the inner elbow".to_string();
    }

    /// Validate and start a submission. On validation failure the field
    /// error map is stored for rendering and no request is produced.
    pub fn begin_submission(&mut self) -> Option<ClassificationRequest> {
        if self.is_loading {
            return None;
        }

        let intake = match self.draft.finalize(self.upload.staged.is_some()) {
            Ok(intake) => intake,
            Err(errors) => {
                self.errors = errors;
                return None;
            }
        };
        // finalize() checked the image is present.
        let staged = self.upload.staged.as_ref()?;

        self.errors.clear();
        self.error = None;
        self.is_loading = true;
        Some(ClassificationRequest {
            image: ImagePayload::from(staged),
            context: SubmissionContext::Patient { intake },
        })
    }

    /// A result supersedes the form: wipe the intake buffers.
    pub fn finish_success(&mut self, prediction: Prediction) {
        self.is_loading = false;
        self.result = Some(prediction);
        self.draft.clear_sensitive();
        self.upload.clear();
    }

    /// Submission failure: the form stays filled so the patient can retry.
    pub fn finish_error(&mut self, message: String) {
        self.is_loading = false;
        self.error = Some(message);
    }

    /// Reset the flow back to a blank form.
    pub fn new_consultation(&mut self) {
        *self = Self::default();
    }
}

/// Render the patient flow, in whichever phase it is in.
pub fn render_patient(f: &mut Frame, area: Rect, state: &PatientFlowState) {
    if let Some(prediction) = &state.result {
        render_result_phase(f, area, prediction);
    } else {
        render_form_phase(f, area, state);
    }
}

fn render_result_phase(f: &mut Frame, area: Rect, prediction: &Prediction) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(8)])
        .split(area);

    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled("Your Result", ClinicTheme::title())),
            Line::from(""),
        ]),
        chunks[0],
    );
    render_prediction_card(
        f,
        chunks[1],
        prediction,
        Some(key_hints(&[
            ("m", "email a specialist"),
            ("n", "new consultation"),
            ("Esc", "back to start"),
        ])),
    );
}

fn render_form_phase(f: &mut Frame, area: Rect, state: &PatientFlowState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Header
            Constraint::Length(10), // Form fields
            Constraint::Length(7),  // Upload zone
            Constraint::Length(2),  // Banner
            Constraint::Min(0),
        ])
        .split(area);

    let header = vec![
        Line::from(Span::styled("Patient Consultation", ClinicTheme::title())),
        key_hints(&[
            ("Tab", "next field"),
            ("Enter", "submit"),
            ("Ctrl-T", "sample data"),
            ("Esc", "back"),
        ]),
    ];
    f.render_widget(Paragraph::new(header), chunks[0]);

    let mut lines = Vec::new();
    for field in IntakeField::ORDER {
        if field == IntakeField::UploadPath {
            continue;
        }
        lines.push(render_field_line(state, field));
        if let Some(message) = field.error_key().and_then(|k| state.errors.get(k)) {
            lines.push(Line::from(Span::styled(
                format!("    {message}"),
                ClinicTheme::danger(),
            )));
        }
    }
    f.render_widget(Paragraph::new(lines), chunks[1]);

    render_upload_zone(
        f,
        chunks[2],
        &state.upload,
        state.focus == IntakeField::UploadPath,
    );
    if let Some(message) = state.errors.get("image") {
        // Shown under the zone rather than inside it.
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("  {message}"),
                ClinicTheme::danger(),
            ))),
            chunks[3],
        );
        return;
    }

    let banner = if state.is_loading {
        Line::from(Span::styled("Analyzing Image...", ClinicTheme::focused()))
    } else if let Some(error) = &state.error {
        Line::from(Span::styled(error.clone(), ClinicTheme::danger()))
    } else {
        Line::from("")
    };
    f.render_widget(Paragraph::new(banner), chunks[3]);
}

fn render_field_line(state: &PatientFlowState, field: IntakeField) -> Line<'static> {
    let focused = state.focus == field;
    let marker = if focused { "> " } else { "  " };
    let label_style = if focused {
        ClinicTheme::focused()
    } else {
        ClinicTheme::text()
    };

    let value = match field {
        IntakeField::FullName => state.draft.full_name.clone(),
        IntakeField::Age => state.draft.age.clone(),
        IntakeField::Gender => {
            let label = state
                .draft
                .gender
                .map_or("← select →", Gender::label);
            label.to_string()
        }
        IntakeField::Contact => state.draft.contact.clone(),
        IntakeField::Symptoms => state.draft.symptoms.clone(),
        IntakeField::UploadPath => String::new(),
    };

    Line::from(vec![
        Span::styled(format!("{marker}{:<20}", field.label()), label_style),
        Span::styled(value, ClinicTheme::text()),
    ])
}
