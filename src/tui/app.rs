//! Application controller: view state machine and event loop.
//!
//! One tagged union holds the active view and everything that view owns;
//! switching views drops the old state wholesale, which is what makes
//! logout a clean reset and abandons any in-flight work.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::DermascanError;
use crate::application::SubmissionService;
use crate::config::Config;
use crate::ports::{
    Authenticator, Classifier, Credentials, DEMO_DOCTOR_ID, HistoryStore, MailComposer,
};

use super::ui::dashboard::{render_dashboard, DashboardState};
use super::ui::landing::render_landing;
use super::ui::login::{render_login, LoginState};
use super::ui::patient::{render_patient, IntakeField, PatientFlowState};
use super::ui::render_disclaimer;
use super::worker::{
    PredictProgress, PredictWorker, PredictWorkerHandle, PreviewWorker, PreviewWorkerHandle,
};

/// Subject line for the specialist referral draft.
const SPECIALIST_SUBJECT: &str = "Skin Disease Consultation";

/// The active view and its state.
pub enum View {
    Landing,
    DoctorLogin(LoginState),
    DoctorDashboard(DashboardState),
    PatientFlow(PatientFlowState),
}

/// Top-level application state.
pub struct App {
    config: Config,
    view: View,
    submission: SubmissionService<dyn Classifier>,
    history_store: Arc<dyn HistoryStore>,
    authenticator: Arc<dyn Authenticator>,
    mail: Arc<dyn MailComposer>,
    /// Outstanding classifier call, if any. Dropped on view change, which
    /// abandons the result.
    pending_predict: Option<PredictWorkerHandle>,
    /// Outstanding preview derivation, if any.
    pending_preview: Option<PreviewWorkerHandle>,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: Config,
        classifier: Arc<dyn Classifier>,
        history_store: Arc<dyn HistoryStore>,
        authenticator: Arc<dyn Authenticator>,
        mail: Arc<dyn MailComposer>,
    ) -> Self {
        Self {
            config,
            view: View::Landing,
            submission: SubmissionService::new(classifier),
            history_store,
            authenticator,
            mail,
            pending_predict: None,
            pending_preview: None,
            should_quit: false,
        }
    }

    /// Run the application: terminal setup, event loop, restore.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        // Bracketed paste is what delivers a file dropped onto the
        // terminal window as a single path event.
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    // A file dropped onto the terminal arrives as a pasted
                    // path; route it to the active upload zone.
                    Event::Paste(text) => self.handle_paste(&text),
                    _ => {}
                }
            }

            self.poll_workers();
        }
        Ok(())
    }

    fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(2)])
            .split(f.area());

        match &self.view {
            View::Landing => render_landing(f, chunks[0], self.config.mode),
            View::DoctorLogin(state) => render_login(f, chunks[0], state),
            View::DoctorDashboard(state) => render_dashboard(f, chunks[0], state),
            View::PatientFlow(state) => render_patient(f, chunks[0], state),
        }
        render_disclaimer(f, chunks[1]);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match &mut self.view {
            View::Landing => self.handle_landing_key(key),
            View::DoctorLogin(_) => self.handle_login_key(key),
            View::DoctorDashboard(_) => self.handle_dashboard_key(key),
            View::PatientFlow(_) => self.handle_patient_key(key),
        }
    }

    fn handle_landing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.view = View::DoctorLogin(LoginState::default());
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.view = View::PatientFlow(PatientFlowState::default());
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        let View::DoctorLogin(state) = &mut self.view else {
            return;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('d') {
                self.enter_dashboard(DEMO_DOCTOR_ID.to_string());
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.to_landing(),
            KeyCode::Tab | KeyCode::BackTab => state.next_field(),
            KeyCode::Backspace => state.delete_char(),
            KeyCode::Enter => {
                let credentials = Credentials {
                    email: state.email.clone(),
                    password: state.password.clone(),
                };
                match self.authenticator.authenticate(&credentials) {
                    Ok(doctor_id) => self.enter_dashboard(doctor_id),
                    Err(e) => {
                        tracing::warn!("Login rejected");
                        state.error = Some(DermascanError::from(e).to_string());
                    }
                }
            }
            KeyCode::Char(c) => state.input_char(c),
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        let View::DoctorDashboard(state) = &mut self.view else {
            return;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('p') => {
                    if let Some(request) = state.begin_submission() {
                        self.pending_predict =
                            Some(PredictWorker::spawn(self.submission.clone(), request));
                    }
                }
                KeyCode::Char('s') => state.save_current(),
                KeyCode::Char('x') => state.upload.clear(),
                KeyCode::Char('l') => self.to_landing(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                state.error = None;
                state.notice = None;
            }
            KeyCode::Backspace => state.upload.delete_char(),
            KeyCode::Enter => {
                let raw = state.upload.path_input.clone();
                if state.upload.stage_path(&raw) {
                    self.spawn_preview_for_current();
                }
            }
            KeyCode::Char(c) => state.upload.input_char(c),
            _ => {}
        }
    }

    fn handle_patient_key(&mut self, key: KeyEvent) {
        let View::PatientFlow(state) = &mut self.view else {
            return;
        };

        // Result phase has its own small key map.
        if state.result.is_some() {
            match key.code {
                KeyCode::Char('n') => state.new_consultation(),
                KeyCode::Char('m') => {
                    if let Err(e) = self.mail.compose(SPECIALIST_SUBJECT) {
                        state.error = Some(DermascanError::from(e).to_string());
                    }
                }
                KeyCode::Esc => self.to_landing(),
                _ => {}
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('t') {
                state.load_sample_data();
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                state.draft.clear_sensitive();
                self.to_landing();
            }
            KeyCode::Tab | KeyCode::Down => state.focus = state.focus.next(),
            KeyCode::BackTab | KeyCode::Up => state.focus = state.focus.prev(),
            KeyCode::Left => state.cycle_gender(false),
            KeyCode::Right => state.cycle_gender(true),
            KeyCode::Backspace => state.delete_char(),
            KeyCode::Enter => {
                if state.focus == IntakeField::UploadPath
                    && !state.upload.path_input.trim().is_empty()
                {
                    let raw = state.upload.path_input.clone();
                    if state.upload.stage_path(&raw) {
                        self.spawn_preview_for_current();
                    }
                } else if let Some(request) = state.begin_submission() {
                    self.pending_predict =
                        Some(PredictWorker::spawn(self.submission.clone(), request));
                }
            }
            KeyCode::Char(c) => state.input_char(c),
            _ => {}
        }
    }

    fn handle_paste(&mut self, text: &str) {
        let staged = match &mut self.view {
            View::DoctorDashboard(state) => state.upload.stage_path(text),
            View::PatientFlow(state) if state.result.is_none() => state.upload.stage_path(text),
            _ => false,
        };
        if staged {
            self.spawn_preview_for_current();
        }
    }

    /// Drain worker channels and dispatch results to the active view.
    fn poll_workers(&mut self) {
        if let Some(handle) = &self.pending_predict {
            if let Some(progress) = handle.try_recv() {
                self.pending_predict = None;
                match progress {
                    PredictProgress::Complete(prediction) => match &mut self.view {
                        View::DoctorDashboard(state) => state.finish_success(prediction),
                        View::PatientFlow(state) => state.finish_success(prediction),
                        _ => {}
                    },
                    PredictProgress::Error(e) => {
                        let message = e.to_string();
                        match &mut self.view {
                            View::DoctorDashboard(state) => state.finish_error(message),
                            View::PatientFlow(state) => state.finish_error(message),
                            _ => {}
                        }
                    }
                }
            }
        }

        if let Some(handle) = &self.pending_preview {
            if let Some(preview) = handle.try_recv() {
                let file_name = handle.file_name.clone();
                self.pending_preview = None;
                match &mut self.view {
                    View::DoctorDashboard(state) => state.upload.apply_preview(&file_name, preview),
                    View::PatientFlow(state) => state.upload.apply_preview(&file_name, preview),
                    _ => {}
                }
            }
        }
    }

    fn spawn_preview_for_current(&mut self) {
        let staged = match &self.view {
            View::DoctorDashboard(state) => state.upload.staged.as_ref(),
            View::PatientFlow(state) => state.upload.staged.as_ref(),
            _ => None,
        };
        if let Some(staged) = staged {
            self.pending_preview = Some(PreviewWorker::spawn(staged));
        }
    }

    /// Open the dashboard for an authenticated clinician and load history.
    fn enter_dashboard(&mut self, doctor_id: String) {
        tracing::info!("Clinician session opened");
        let mut state = DashboardState::new(doctor_id, Arc::clone(&self.history_store));
        if let Err(e) = state.history.refresh() {
            state.error = Some(e.to_string());
        }
        self.view = View::DoctorDashboard(state);
    }

    /// Return to the landing screen, discarding all session state and any
    /// in-flight work.
    fn to_landing(&mut self) {
        self.pending_predict = None;
        self.pending_preview = None;
        self.view = View::Landing;
    }
}
