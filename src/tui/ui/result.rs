//! Result card: read-only projection of one prediction.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::Prediction;
use crate::tui::styles::ClinicTheme;

/// Render one prediction. `action_hint` carries the flow-specific actions
/// (save on the dashboard, specialist contact in the patient flow).
pub fn render_prediction_card(
    f: &mut Frame,
    area: Rect,
    prediction: &Prediction,
    action_hint: Option<Line<'static>>,
) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(prediction.disease.clone(), ClinicTheme::title()),
            Span::raw("  "),
            Span::styled(
                format!("Confidence: {}", prediction.confidence_label()),
                ClinicTheme::confidence(prediction.confidence),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled("Possible Causes:", ClinicTheme::subtitle())),
    ];

    for cause in &prediction.causes {
        lines.push(Line::from(vec![
            Span::styled("  - ", ClinicTheme::text_muted()),
            Span::styled(cause.clone(), ClinicTheme::text()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Recommended Treatment:",
        ClinicTheme::subtitle(),
    )));
    lines.push(Line::from(Span::styled(
        prediction.treatment.clone(),
        ClinicTheme::text(),
    )));

    if let Some(name) = &prediction.patient_name {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Patient: ", ClinicTheme::text_secondary()),
            Span::styled(name.clone(), ClinicTheme::text()),
        ]));
    }

    if let Some(hint) = action_hint {
        lines.push(Line::from(""));
        lines.push(hint);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border())
        .title(Span::styled(" Prediction ", ClinicTheme::subtitle()));

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}
