//! Staged upload types and constraints.
//!
//! A staged file is an image that has been accepted for submission but not
//! yet submitted. Rejected files never become staged; rejection is a
//! non-fatal notice and leaves any existing staged file untouched.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Maximum accepted upload size: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Why a candidate file was refused staging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("File size must be less than 10MB (got {size} bytes)")]
    TooLarge { size: u64 },

    #[error("Please upload an image file (got {mime})")]
    NotAnImage { mime: String },
}

/// Check the upload constraints against a candidate's declared size and type.
///
/// The size check uses the declared size so oversize files can be refused
/// before their content is read.
///
/// # Errors
/// Returns the applicable [`UploadRejection`].
pub fn check_constraints(size: u64, mime_type: &str) -> Result<(), UploadRejection> {
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge { size });
    }
    if !mime_type.starts_with("image/") {
        return Err(UploadRejection::NotAnImage {
            mime: mime_type.to_string(),
        });
    }
    Ok(())
}

/// An accepted, not-yet-submitted image.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,

    /// `data:` URL preview, derived off-thread after acceptance.
    pub preview: Option<String>,
}

impl StagedFile {
    /// Stage a candidate file, enforcing the upload constraints.
    ///
    /// # Errors
    /// Returns [`UploadRejection`] if the file is oversize or not an image.
    pub fn stage(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, UploadRejection> {
        let mime_type = mime_type.into();
        check_constraints(bytes.len() as u64, &mime_type)?;
        Ok(Self {
            file_name: file_name.into(),
            mime_type,
            bytes,
            preview: None,
        })
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Size formatted for display, e.g. `"241.3 KB"`.
    #[must_use]
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.bytes.len() as f64 / 1024.0)
    }

    /// Encode the staged bytes as a `data:` URL.
    ///
    /// This is the preview derivation; it runs on a background thread so
    /// acceptance is never blocked on it.
    #[must_use]
    pub fn encode_preview(mime_type: &str, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", mime_type, BASE64.encode(bytes))
    }
}

/// Map a file path to an image MIME type by extension.
///
/// Returns `None` for extensions that do not indicate an image, which the
/// staging handler treats as a type-constraint rejection.
#[must_use]
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversize_file_is_rejected() {
        let err = check_constraints(MAX_UPLOAD_BYTES + 1, "image/jpeg").unwrap_err();
        assert!(matches!(err, UploadRejection::TooLarge { .. }));
    }

    #[test]
    fn size_limit_is_exclusive_above_10_mib() {
        assert!(check_constraints(MAX_UPLOAD_BYTES, "image/jpeg").is_ok());
    }

    #[test]
    fn non_image_type_is_rejected_regardless_of_size() {
        let err = check_constraints(12, "application/pdf").unwrap_err();
        assert_eq!(
            err,
            UploadRejection::NotAnImage {
                mime: "application/pdf".to_string()
            }
        );
    }

    #[test]
    fn staging_accepts_a_small_image() {
        let staged = StagedFile::stage("lesion.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF])
            .expect("should stage");
        assert_eq!(staged.size(), 3);
        assert!(staged.preview.is_none());
    }

    #[test]
    fn preview_is_a_data_url_with_the_staged_mime() {
        let url = StagedFile::encode_preview("image/png", &[1, 2, 3]);
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn mime_mapping_covers_supported_formats() {
        assert_eq!(mime_for_path(Path::new("a.JPG")), Some("image/jpeg"));
        assert_eq!(mime_for_path(Path::new("a.webp")), Some("image/webp"));
        assert_eq!(mime_for_path(Path::new("a.txt")), None);
        assert_eq!(mime_for_path(Path::new("noext")), None);
    }
}
