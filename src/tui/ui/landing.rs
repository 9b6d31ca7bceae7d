//! Landing view: role selection.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::config::Mode;
use crate::tui::styles::ClinicTheme;

use super::key_hints;

/// Render the role-selection screen.
pub fn render_landing(f: &mut Frame, area: Rect, mode: Mode) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("Skin Disease Detection", ClinicTheme::title())).centered(),
        Line::from(Span::styled(
            "AI-powered diagnostic assistance for skin conditions",
            ClinicTheme::text_secondary(),
        ))
        .centered(),
        Line::from(""),
        Line::from(Span::styled("Who are you?", ClinicTheme::subtitle())).centered(),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [D] ", ClinicTheme::key_hint()),
            Span::styled("Doctor", ClinicTheme::text()),
            Span::styled("  -  Professional diagnosis tools", ClinicTheme::text_muted()),
        ]),
        Line::from(vec![
            Span::styled("  [P] ", ClinicTheme::key_hint()),
            Span::styled("Patient / Normal User", ClinicTheme::text()),
            Span::styled("  -  Get instant results", ClinicTheme::text_muted()),
        ]),
        Line::from(""),
    ];

    if mode == Mode::Simulated {
        lines.push(
            Line::from(Span::styled(
                "Simulated Mode Active - Using canned predictions",
                ClinicTheme::warning(),
            ))
            .centered(),
        );
        lines.push(Line::from(""));
    }

    lines.push(key_hints(&[("q", "quit")]).centered());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border());

    let p = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);
    f.render_widget(p, area);
}
