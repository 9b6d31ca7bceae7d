//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a clinical-themed interface for:
//! - Role selection and doctor login
//! - Clinician dashboard with upload zone and prediction history
//! - Patient self-service consultation flow

mod app;
mod styles;
mod ui;
mod worker;

pub use app::{App, View};
pub use styles::ClinicTheme;
pub use worker::{PredictProgress, PredictWorker, PredictWorkerHandle};
