//! Mailto adapter: hands a pre-filled draft to the platform mail client.

use std::process::Command;

use crate::ports::{MailComposer, MailError};

/// Composes `mailto:` URLs and opens them with the platform opener.
pub struct MailtoComposer {
    recipient: String,
}

impl MailtoComposer {
    #[must_use]
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }

    fn url(&self, subject: &str) -> String {
        // Minimal encoding: subjects here are fixed ASCII phrases.
        let subject = subject.replace(' ', "%20");
        format!("mailto:{}?subject={}", self.recipient, subject)
    }

    fn opener() -> &'static str {
        if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        }
    }
}

impl MailComposer for MailtoComposer {
    fn compose(&self, subject: &str) -> Result<(), MailError> {
        let url = self.url(subject);
        tracing::info!("Opening mail draft");
        Command::new(Self::opener())
            .arg(&url)
            .spawn()
            .map(|_| ())
            .map_err(|e| MailError::Launch(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_recipient_and_encoded_subject() {
        let composer = MailtoComposer::new("specialist@hospital.com");
        assert_eq!(
            composer.url("Skin Disease Consultation"),
            "mailto:specialist@hospital.com?subject=Skin%20Disease%20Consultation"
        );
    }
}
