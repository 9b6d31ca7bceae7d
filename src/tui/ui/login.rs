//! Doctor login view: credential entry and the demo path.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::styles::ClinicTheme;

use super::key_hints;

/// Which login field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// Login screen state.
#[derive(Default)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    /// Rejection message from the last attempt, shown explicitly.
    pub error: Option<String>,
}

impl LoginState {
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn input_char(&mut self, c: char) {
        match self.focus {
            LoginField::Email => self.email.push(c),
            LoginField::Password => self.password.push(c),
        }
        self.error = None;
    }

    pub fn delete_char(&mut self) {
        match self.focus {
            LoginField::Email => {
                self.email.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
        }
    }
}

fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let style = if focused {
        ClinicTheme::focused()
    } else {
        ClinicTheme::text()
    };
    Line::from(vec![
        Span::styled(format!("  {label:<10}"), ClinicTheme::text_secondary()),
        Span::styled(value, style),
        Span::styled(if focused { "_" } else { "" }, ClinicTheme::focused()),
    ])
}

/// Render the doctor login screen.
pub fn render_login(f: &mut Frame, area: Rect, state: &LoginState) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("Doctor Login", ClinicTheme::title())).centered(),
        Line::from(""),
        field_line(
            "Email",
            state.email.clone(),
            state.focus == LoginField::Email,
        ),
        field_line(
            "Password",
            "\u{2022}".repeat(state.password.chars().count()),
            state.focus == LoginField::Password,
        ),
        Line::from(""),
    ];

    if let Some(error) = &state.error {
        lines.push(Line::from(Span::styled(
            format!("  {error}"),
            ClinicTheme::danger(),
        )));
        lines.push(Line::from(""));
    }

    lines.push(key_hints(&[
        ("Tab", "next field"),
        ("Enter", "login"),
        ("Ctrl-D", "continue as demo doctor"),
        ("Esc", "back"),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border());

    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_routes_to_the_focused_field() {
        let mut state = LoginState::default();
        state.input_char('a');
        state.next_field();
        state.input_char('b');
        assert_eq!(state.email, "a");
        assert_eq!(state.password, "b");
    }

    #[test]
    fn typing_clears_a_previous_rejection() {
        let mut state = LoginState {
            error: Some("Authentication failed".to_string()),
            ..LoginState::default()
        };
        state.input_char('x');
        assert!(state.error.is_none());
    }
}
