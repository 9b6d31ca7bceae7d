//! Application layer: Use cases and services.
//!
//! Orchestrates domain types with the ports: one service for the
//! prediction-submission workflow, one for the clinician's history list.

mod history;
mod submission;

pub use history::HistoryService;
pub use submission::SubmissionService;
