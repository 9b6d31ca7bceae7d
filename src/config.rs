//! Startup configuration, read once from the environment.
//!
//! The mode switch selects the simulated or live strategies at process
//! start; the chosen strategy objects are injected at construction and
//! nothing reads the mode again at call time.

/// Which strategy set backs the classifier and history ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Canned predictions and seeded in-memory history.
    Simulated,
    /// reqwest clients against a live backend.
    Live,
}

impl Mode {
    /// Parse a mode string; anything other than `live` is simulated,
    /// matching the original client's mock-by-default behavior.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "live" => Self::Live,
            _ => Self::Simulated,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simulated => write!(f, "simulated"),
            Self::Live => write!(f, "live"),
        }
    }
}

/// Process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    /// Base URL of the classifier backend (live mode only).
    pub api_base_url: String,
    /// Recipient for the patient flow's specialist-contact action.
    pub specialist_email: String,
}

impl Config {
    /// Read configuration from `DERMASCAN_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mode = std::env::var("DERMASCAN_MODE")
            .map(|v| Mode::parse(&v))
            .unwrap_or(Mode::Simulated);
        let api_base_url = std::env::var("DERMASCAN_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());
        let specialist_email = std::env::var("DERMASCAN_SPECIALIST_EMAIL")
            .unwrap_or_else(|_| "specialist@hospital.com".to_string());

        Self {
            mode,
            api_base_url,
            specialist_email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_defaults_to_simulated() {
        assert_eq!(Mode::parse(""), Mode::Simulated);
        assert_eq!(Mode::parse("mock"), Mode::Simulated);
        assert_eq!(Mode::parse("LIVE"), Mode::Live);
        assert_eq!(Mode::parse(" live "), Mode::Live);
    }
}
