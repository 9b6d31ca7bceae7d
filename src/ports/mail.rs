//! Mail composition port: fire-and-forget hand-off to an external
//! mail client with a pre-filled subject. No response is expected.

/// Error type for mail hand-off.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Could not open mail client: {0}")]
    Launch(String),
}

/// Trait for the external mail-composition collaborator.
pub trait MailComposer: Send + Sync {
    /// Open a mail draft with the given subject line.
    ///
    /// # Errors
    /// Returns [`MailError`] if the hand-off could not be started; the
    /// caller treats this as a notice, never a flow failure.
    fn compose(&self, subject: &str) -> Result<(), MailError>;
}
