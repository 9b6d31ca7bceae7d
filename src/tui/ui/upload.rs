//! Upload staging zone: path entry, constraint checks, staged-file display.
//!
//! Two intake paths converge on [`UploadState::stage_path`]: a typed file
//! path confirmed with Enter, and a path dropped onto the terminal
//! (delivered as a bracketed paste). A rejected file never becomes staged
//! and leaves any existing staged file untouched.

use std::path::Path;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{check_constraints, mime_for_path, StagedFile, UploadRejection};
use crate::tui::styles::ClinicTheme;

/// State of one flow's upload zone.
#[derive(Default)]
pub struct UploadState {
    /// Path entry buffer.
    pub path_input: String,
    /// The accepted, not-yet-submitted image.
    pub staged: Option<StagedFile>,
    /// Last rejection or I/O notice; non-fatal.
    pub notice: Option<String>,
}

impl UploadState {
    pub fn input_char(&mut self, c: char) {
        self.path_input.push(c);
    }

    pub fn delete_char(&mut self) {
        self.path_input.pop();
    }

    /// Stage the file at `raw` (a typed or dropped path).
    ///
    /// Returns `true` when a new file was staged, so the caller can kick
    /// off preview derivation. On rejection the notice is set and staged
    /// state is left as it was.
    pub fn stage_path(&mut self, raw: &str) -> bool {
        let cleaned = raw.trim().trim_matches(|c| c == '\'' || c == '"');
        if cleaned.is_empty() {
            return false;
        }
        let path = Path::new(cleaned);

        let Some(mime_type) = mime_for_path(path) else {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown");
            self.notice = Some(
                UploadRejection::NotAnImage {
                    mime: ext.to_string(),
                }
                .to_string(),
            );
            return false;
        };

        // Declared-size check before reading any content.
        let size = match std::fs::metadata(path) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                self.notice = Some(format!("Could not read file: {e}"));
                return false;
            }
        };
        if let Err(rejection) = check_constraints(size, mime_type) {
            self.notice = Some(rejection.to_string());
            return false;
        }

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.notice = Some(format!("Could not read file: {e}"));
                return false;
            }
        };

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        match StagedFile::stage(file_name, mime_type, bytes) {
            Ok(staged) => {
                tracing::debug!(size, "Image staged");
                self.staged = Some(staged);
                self.notice = None;
                self.path_input.clear();
                true
            }
            Err(rejection) => {
                self.notice = Some(rejection.to_string());
                false
            }
        }
    }

    /// Discard the staged file, any pending notice, and the path buffer,
    /// returning the zone to its empty state.
    pub fn clear(&mut self) {
        self.staged = None;
        self.notice = None;
        self.path_input.clear();
    }

    /// Attach a derived preview, unless the file was replaced meanwhile.
    pub fn apply_preview(&mut self, file_name: &str, preview: String) {
        if let Some(staged) = &mut self.staged {
            if staged.file_name == file_name && staged.preview.is_none() {
                staged.preview = Some(preview);
            }
        }
    }
}

/// Render the upload zone. `focused` drives the active-drop-target
/// highlight; it carries no data contract.
pub fn render_upload_zone(f: &mut Frame, area: Rect, state: &UploadState, focused: bool) {
    let border_style = if focused {
        ClinicTheme::border_focused()
    } else {
        ClinicTheme::border()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(" Upload Skin Image ", ClinicTheme::subtitle()));

    let mut lines = Vec::new();
    match &state.staged {
        Some(staged) => {
            lines.push(Line::from(vec![
                Span::styled(staged.file_name.clone(), ClinicTheme::text()),
                Span::styled(format!(" ({})", staged.size_label()), ClinicTheme::text_secondary()),
            ]));
            let preview = if staged.preview.is_some() {
                "preview ready"
            } else {
                "deriving preview..."
            };
            lines.push(Line::from(Span::styled(preview, ClinicTheme::text_muted())));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "Type a file path and press Enter, or drop an image onto the terminal",
                ClinicTheme::text_secondary(),
            )));
            lines.push(Line::from(Span::styled(
                "Supports: JPG, PNG, WEBP (Max 10MB)",
                ClinicTheme::text_muted(),
            )));
        }
    }

    lines.push(Line::from(vec![
        Span::styled("Path: ", ClinicTheme::text_secondary()),
        Span::styled(
            state.path_input.clone(),
            if focused {
                ClinicTheme::focused()
            } else {
                ClinicTheme::text()
            },
        ),
        Span::styled(if focused { "_" } else { "" }, ClinicTheme::focused()),
    ]));

    if let Some(notice) = &state.notice {
        lines.push(Line::from(Span::styled(
            notice.clone(),
            ClinicTheme::warning(),
        )));
    }

    let p = Paragraph::new(lines).block(block);
    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::MAX_UPLOAD_BYTES;

    fn write_temp(name: &str, bytes: &[u8]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(bytes).expect("write");
        (dir, path)
    }

    #[test]
    fn stages_a_small_jpeg() {
        let (_dir, path) = write_temp("lesion.jpg", &[0xFF, 0xD8, 0xFF, 0xE0]);
        let mut state = UploadState::default();
        assert!(state.stage_path(path.to_str().unwrap()));
        let staged = state.staged.as_ref().expect("staged");
        assert_eq!(staged.mime_type, "image/jpeg");
        assert!(state.notice.is_none());
    }

    #[test]
    fn oversize_file_is_rejected_and_staged_state_unchanged() {
        let (_dir, path) = write_temp("big.png", &vec![0u8; (MAX_UPLOAD_BYTES + 1024) as usize]);
        let mut state = UploadState::default();
        assert!(!state.stage_path(path.to_str().unwrap()));
        assert!(state.staged.is_none());
        assert!(state.notice.as_deref().unwrap_or("").contains("10MB"));
    }

    #[test]
    fn non_image_extension_is_rejected_regardless_of_size() {
        let (_dir, path) = write_temp("report.pdf", &[1, 2, 3]);
        let mut state = UploadState::default();
        assert!(!state.stage_path(path.to_str().unwrap()));
        assert!(state.staged.is_none());
        assert!(state.notice.is_some());
    }

    #[test]
    fn rejection_keeps_the_previously_staged_file() {
        let (_dir, good) = write_temp("lesion.jpg", &[0xFF, 0xD8]);
        let (_dir2, bad) = write_temp("notes.txt", &[1]);
        let mut state = UploadState::default();
        assert!(state.stage_path(good.to_str().unwrap()));
        assert!(!state.stage_path(bad.to_str().unwrap()));
        assert_eq!(
            state.staged.as_ref().map(|s| s.file_name.as_str()),
            Some("lesion.jpg")
        );
        assert!(state.notice.is_some());
    }

    #[test]
    fn dropped_paths_may_be_quoted() {
        let (_dir, path) = write_temp("lesion.png", &[0x89, 0x50]);
        let mut state = UploadState::default();
        let quoted = format!("'{}'", path.display());
        assert!(state.stage_path(&quoted));
    }

    #[test]
    fn clear_resets_the_zone_to_empty() {
        let (_dir, good) = write_temp("lesion.jpg", &[0xFF, 0xD8]);
        let (_dir2, bad) = write_temp("notes.txt", &[1]);
        let mut state = UploadState::default();
        assert!(state.stage_path(good.to_str().unwrap()));
        assert!(!state.stage_path(bad.to_str().unwrap()));
        state.path_input = "half-typed".to_string();

        state.clear();
        assert!(state.staged.is_none());
        assert!(state.notice.is_none());
        assert!(state.path_input.is_empty());
    }

    #[test]
    fn stale_preview_is_not_applied_to_a_replacement() {
        let (_dir, a) = write_temp("a.png", &[1]);
        let (_dir2, b) = write_temp("b.png", &[2]);
        let mut state = UploadState::default();
        assert!(state.stage_path(a.to_str().unwrap()));
        assert!(state.stage_path(b.to_str().unwrap()));
        state.apply_preview("a.png", "data:image/png;base64,AA==".to_string());
        assert!(state.staged.as_ref().expect("staged").preview.is_none());
    }
}
