//! Log sanitization: PII filtering for log output.
//!
//! The intake form carries patient-identifying text (names, contact
//! details); log lines must not. The primary protection is to never pass
//! those fields to logging calls, and this writer is the fallback that
//! redacts anything that slips through: email addresses, phone-shaped
//! numbers, and UUIDs.
//!
//! Input is capped per line; sanitizing unbounded untrusted strings is
//! expensive.

use std::sync::OnceLock;

use regex::Regex;
use tracing_subscriber::fmt::MakeWriter;

/// Maximum number of bytes sanitized per line.
const SANITIZE_MAX_BYTES: usize = 16 * 1024;

struct PiiPattern {
    regex: Regex,
    replacement: &'static str,
}

static PII_PATTERNS: OnceLock<Vec<PiiPattern>> = OnceLock::new();

fn patterns() -> &'static [PiiPattern] {
    PII_PATTERNS.get_or_init(|| {
        let rules: &[(&str, &str)] = &[
            // UUIDs (prediction ids double as submission correlators)
            (
                r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
                "[REDACTED-UUID]",
            ),
            // Email addresses (clinician logins, patient contact field)
            (
                r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            // Phone-shaped numbers (patient contact field); grouped so
            // ISO dates in log timestamps are not caught
            (
                r"(?:\+?\d{1,3}[\s.-]?)?(?:\(\d{3}\)|\b\d{3})[\s.-]?\d{3}[\s.-]?\d{4}\b",
                "[REDACTED-PHONE]",
            ),
        ];
        rules
            .iter()
            .map(|(pattern, replacement)| PiiPattern {
                regex: Regex::new(pattern).expect("static pattern compiles"),
                replacement,
            })
            .collect()
    })
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> &str {
    if input.len() <= max_bytes {
        return input;
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    &input[..end]
}

/// Redact PII patterns from a string.
#[must_use]
pub fn sanitize(input: &str) -> String {
    let truncated = truncate_to_char_boundary(input, SANITIZE_MAX_BYTES);
    let mut output = truncated.to_string();
    for pattern in patterns() {
        output = pattern
            .regex
            .replace_all(&output, pattern.replacement)
            .into_owned();
    }
    output
}

/// `MakeWriter` wrapper that sanitizes complete lines before writing.
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

/// Line-buffering writer applying [`sanitize`] to each completed line.
pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line);
            self.inner.write_all(sanitize(&text).as_bytes())?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            let text = String::from_utf8_lossy(&rest);
            self.inner.write_all(sanitize(&text).as_bytes())?;
        }
        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}
