//! UI module: view components for the TUI.

pub mod dashboard;
pub mod landing;
pub mod login;
pub mod patient;
pub mod result;
pub mod upload;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::ClinicTheme;

/// Footer disclaimer shown on every screen.
pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "This is an AI-assisted diagnosis. Please consult with a healthcare professional for proper medical advice.",
        ClinicTheme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(ClinicTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// A `key: description` hint line used in screen footers.
#[must_use]
pub fn key_hints(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (key, desc) in hints {
        spans.push(Span::styled(format!(" {key} "), ClinicTheme::key_hint()));
        spans.push(Span::styled((*desc).to_string(), ClinicTheme::key_desc()));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}
