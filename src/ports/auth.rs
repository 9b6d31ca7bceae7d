//! Authentication port: opaque accept/reject for clinician credentials.
//!
//! The demo path bypasses this port entirely with a fixed identity. A
//! rejected authentication surfaces an explicit message on the login
//! screen; it is never a silent no-op.

/// Identity used by the demo login path.
pub const DEMO_DOCTOR_ID: &str = "demo-doctor-123";

/// Clinician credentials as entered on the login screen.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Error type for authentication.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Authentication failed: {0}")]
    Rejected(String),
}

/// Trait for the authentication backend.
pub trait Authenticator: Send + Sync {
    /// Verify credentials, returning the clinician identity on success.
    ///
    /// # Errors
    /// Returns [`AuthError`] when the credentials are rejected.
    fn authenticate(&self, credentials: &Credentials) -> Result<String, AuthError>;
}
