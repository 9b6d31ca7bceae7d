//! Doctor dashboard: upload zone, current result, archived history.

use std::sync::Arc;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::application::HistoryService;
use crate::domain::Prediction;
use crate::ports::{ClassificationRequest, HistoryStore, ImagePayload, SubmissionContext};
use crate::tui::styles::ClinicTheme;

use super::key_hints;
use super::result::render_prediction_card;
use super::upload::{render_upload_zone, UploadState};

/// Dashboard view state for one clinician session.
pub struct DashboardState {
    /// Session-scoped archived predictions.
    pub history: HistoryService<dyn HistoryStore>,
    pub upload: UploadState,
    /// Result of the latest submission, not yet archived.
    pub current: Option<Prediction>,
    /// Flow-level error banner (submission or history failures).
    pub error: Option<String>,
    /// Non-error notice (e.g. save confirmation).
    pub notice: Option<String>,
    /// True while a classifier call is outstanding; submission disabled.
    pub is_loading: bool,
}

impl DashboardState {
    pub fn new(doctor_id: impl Into<String>, store: Arc<dyn HistoryStore>) -> Self {
        Self {
            history: HistoryService::open(store, doctor_id),
            upload: UploadState::default(),
            current: None,
            error: None,
            notice: None,
            is_loading: false,
        }
    }

    /// Start a submission if one is possible: an image must be staged and
    /// no call may be outstanding. Clears prior error state.
    pub fn begin_submission(&mut self) -> Option<ClassificationRequest> {
        if self.is_loading {
            return None;
        }
        let Some(staged) = self.upload.staged.as_ref() else {
            self.notice = Some("Stage an image before predicting".to_string());
            return None;
        };

        self.error = None;
        self.notice = None;
        self.is_loading = true;
        Some(ClassificationRequest {
            image: ImagePayload::from(staged),
            context: SubmissionContext::Clinician {
                doctor_id: self.history.doctor_id().to_string(),
            },
        })
    }

    pub fn finish_success(&mut self, prediction: Prediction) {
        self.is_loading = false;
        self.current = Some(prediction);
        self.upload.clear();
    }

    /// Submission failure: banner up, staged input preserved for retry.
    pub fn finish_error(&mut self, message: String) {
        self.is_loading = false;
        self.error = Some(message);
    }

    /// Archive the current prediction into the history list.
    pub fn save_current(&mut self) {
        let Some(prediction) = self.current.clone() else {
            return;
        };
        match self.history.save(&prediction) {
            Ok(()) => {
                self.notice = Some("Prediction saved successfully!".to_string());
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
    }
}

/// Render the dashboard.
pub fn render_dashboard(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(7), // Upload zone
            Constraint::Length(2), // Banner / status
            Constraint::Min(6),    // Result + history
        ])
        .split(area);

    render_header(f, chunks[0], state);
    render_upload_zone(f, chunks[1], &state.upload, true);
    render_banner(f, chunks[2], state);

    if let Some(prediction) = &state.current {
        let halves = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[3]);
        render_prediction_card(
            f,
            halves[0],
            prediction,
            Some(key_hints(&[("Ctrl-S", "save to records")])),
        );
        render_history(f, halves[1], state);
    } else {
        render_history(f, chunks[3], state);
    }
}

fn render_header(f: &mut Frame, area: Rect, state: &DashboardState) {
    let lines = vec![
        Line::from(vec![
            Span::styled("Doctor Dashboard", ClinicTheme::title()),
            Span::styled(
                format!("  ({})", state.history.doctor_id()),
                ClinicTheme::text_muted(),
            ),
        ]),
        key_hints(&[
            ("Enter", "stage path"),
            ("Ctrl-P", "predict"),
            ("Ctrl-X", "clear image"),
            ("Ctrl-L", "logout"),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_banner(f: &mut Frame, area: Rect, state: &DashboardState) {
    let line = if state.is_loading {
        Line::from(Span::styled("Analyzing Image...", ClinicTheme::focused()))
    } else if let Some(error) = &state.error {
        Line::from(Span::styled(error.clone(), ClinicTheme::danger()))
    } else if let Some(notice) = &state.notice {
        Line::from(Span::styled(notice.clone(), ClinicTheme::success()))
    } else {
        Line::from("")
    };
    f.render_widget(Paragraph::new(vec![line]), area);
}

fn render_history(f: &mut Frame, area: Rect, state: &DashboardState) {
    let entries = state.history.entries();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border())
        .title(Span::styled(
            format!(" Recent Predictions ({}) ", entries.len()),
            ClinicTheme::subtitle(),
        ));

    if entries.is_empty() {
        let p = Paragraph::new(Line::from(Span::styled(
            "No predictions yet. Upload an image to get started.",
            ClinicTheme::text_muted(),
        )))
        .block(block);
        f.render_widget(p, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Patient"),
        Cell::from("Disease"),
        Cell::from("Confidence"),
        Cell::from("Date"),
    ])
    .style(ClinicTheme::subtitle());

    let rows: Vec<Row> = entries
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.patient_name.clone().unwrap_or_else(|| "N/A".to_string())),
                Cell::from(p.disease.clone()),
                Cell::from(Span::styled(
                    p.confidence_label(),
                    ClinicTheme::confidence(p.confidence),
                )),
                Cell::from(p.date.format("%Y-%m-%d").to_string()),
            ])
            .style(ClinicTheme::text())
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(15),
            Constraint::Percentage(25),
        ],
    )
    .header(header)
    .block(block);

    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockHistoryStore;
    use crate::domain::StagedFile;

    fn dashboard_with_staged_image() -> DashboardState {
        let mut state = DashboardState::new("demo-doctor-123", Arc::new(MockHistoryStore::seeded()));
        state.upload.staged =
            Some(StagedFile::stage("lesion.jpg", "image/jpeg", vec![0xFF]).expect("stage"));
        state
    }

    #[test]
    fn submission_requires_a_staged_image() {
        let mut state = DashboardState::new("demo-doctor-123", Arc::new(MockHistoryStore::seeded()));
        assert!(state.begin_submission().is_none());
        assert!(state.notice.is_some());
        assert!(!state.is_loading);
    }

    #[test]
    fn submission_is_refused_while_one_is_outstanding() {
        let mut state = dashboard_with_staged_image();
        assert!(state.begin_submission().is_some());
        assert!(state.is_loading);
        assert!(state.begin_submission().is_none());
    }

    #[test]
    fn beginning_a_submission_clears_the_previous_error() {
        let mut state = dashboard_with_staged_image();
        state.error = Some("Prediction request failed: timeout".to_string());
        assert!(state.begin_submission().is_some());
        assert!(state.error.is_none());
    }

    #[test]
    fn a_failed_submission_preserves_the_staged_file() {
        let mut state = dashboard_with_staged_image();
        let _request = state.begin_submission().expect("should begin");
        state.finish_error("Prediction failed (502): bad gateway".to_string());
        assert!(state.upload.staged.is_some());
        assert!(state.error.is_some());
        assert!(!state.is_loading);
    }

    #[test]
    fn save_archives_the_current_prediction_first() {
        let mut state = dashboard_with_staged_image();
        state.history.refresh().expect("refresh");
        assert_eq!(state.history.entries().len(), 2);

        let request = state.begin_submission().expect("begin");
        let mut prediction = crate::adapters::mock::catalog().remove(0);
        prediction.id = Prediction::fresh_id();
        drop(request);
        state.finish_success(prediction.clone());

        state.save_current();
        assert_eq!(state.history.entries().len(), 3);
        assert_eq!(state.history.entries()[0].id, prediction.id);
        assert!(state.notice.is_some());
    }
}
