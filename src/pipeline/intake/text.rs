use super::format::DocumentKind;
use super::IntakeError;

/// Turns an uploaded document into prescription text.
///
/// OCR engines and PDF text-layer readers plug in here. Implementations
/// return raw text; callers run [`sanitize_text`] on the result.
pub trait DocumentTextSource {
    fn extract_text(&self, bytes: &[u8], kind: DocumentKind) -> Result<String, IntakeError>;
}

/// Handles plain text uploads only. Needs no OCR or PDF backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl DocumentTextSource for PlainTextSource {
    fn extract_text(&self, bytes: &[u8], kind: DocumentKind) -> Result<String, IntakeError> {
        match kind {
            DocumentKind::PlainText => String::from_utf8(bytes.to_vec())
                .map_err(|e| IntakeError::Encoding(e.to_string())),
            other => Err(IntakeError::UnsupportedFormat(other.as_str().to_string())),
        }
    }
}

/// Strip control and zero-width characters, trim lines and drop blank ones.
pub fn sanitize_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_whitespace() || !(c.is_control() || is_zero_width(*c)))
        .collect::<String>()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_zero_width(c: char) -> bool {
    matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}')
}
