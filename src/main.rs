//! Dermascan: terminal client for skin-condition image classification.
//!
//! Main entry point for the terminal application.

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dermascan::adapters::http::{HttpClassifier, HttpHistoryStore};
use dermascan::adapters::mailto::MailtoComposer;
use dermascan::adapters::mock::{BasicAuthenticator, MockClassifier, MockHistoryStore};
use dermascan::adapters::sanitize::SanitizingMakeWriter;
use dermascan::ports::{Classifier, HistoryStore};
use dermascan::tui::App;
use dermascan::{Config, Mode};

fn main() -> Result<()> {
    // Initialize logging.
    //
    // IMPORTANT: writing logs to the terminal will corrupt the TUI
    // (alternate screen). Default behavior:
    // - interactive TTY: log to a file
    // - non-interactive: log to stdout
    let log_mode =
        std::env::var("DERMASCAN_LOG_MODE").unwrap_or_else(|_| "auto".to_string());

    let interactive = std::io::stdout().is_terminal();
    let use_file = match log_mode.as_str() {
        "file" => true,
        "stdout" => false,
        // auto
        _ => interactive,
    };

    let (writer, _guard) = if use_file {
        let log_file = std::env::var("DERMASCAN_LOG_FILE")
            .unwrap_or_else(|_| "dermascan.log".to_string());

        if let Some(parent) = std::path::Path::new(&log_file).parent() {
            // Best-effort: don't fail startup just because the directory is missing.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    let config = Config::from_env();
    tracing::info!(mode = %config.mode, "Starting dermascan...");

    // Composition root: the mode decides the strategy objects once, here.
    let (classifier, history_store): (Arc<dyn Classifier>, Arc<dyn HistoryStore>) =
        match config.mode {
            Mode::Simulated => (
                Arc::new(MockClassifier::new()),
                Arc::new(MockHistoryStore::seeded()),
            ),
            Mode::Live => (
                Arc::new(HttpClassifier::new(&config.api_base_url)?),
                Arc::new(HttpHistoryStore::new(&config.api_base_url)?),
            ),
        };
    let authenticator = Arc::new(BasicAuthenticator);
    let mail = Arc::new(MailtoComposer::new(&config.specialist_email));

    let mut app = App::new(config, classifier, history_store, authenticator, mail);
    app.run()?;

    tracing::info!("Dermascan shutdown complete.");
    Ok(())
}
