use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::IntakeError;
use crate::config;

/// Broad document categories accepted as prescriptions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Image,
    PlainText,
    Unsupported,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::PlainText => "plain_text",
            Self::Unsupported => "unsupported",
        }
    }

    pub fn needs_ocr(&self) -> bool {
        matches!(self, Self::Image)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

/// Detect the document kind from magic bytes. The file name plays no part.
pub fn detect_kind(bytes: &[u8]) -> DocumentKind {
    if bytes.len() as u64 > config::MAX_UPLOAD_BYTES {
        return DocumentKind::Unsupported;
    }

    match bytes {
        // %PDF
        [0x25, 0x50, 0x44, 0x46, ..] => DocumentKind::Pdf,
        // JPEG
        [0xFF, 0xD8, 0xFF, ..] => DocumentKind::Image,
        // PNG
        [0x89, 0x50, 0x4E, 0x47, ..] => DocumentKind::Image,
        [] => DocumentKind::Unsupported,
        _ if is_likely_text(bytes) => DocumentKind::PlainText,
        _ => DocumentKind::Unsupported,
    }
}

/// Valid UTF-8 with no NUL bytes in the first 8 KiB.
fn is_likely_text(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(8192)];
    if head.contains(&0) {
        return false;
    }
    match std::str::from_utf8(head) {
        Ok(_) => true,
        // A multi-byte sequence cut at the window edge is still text.
        Err(e) => e.error_len().is_none(),
    }
}

/// Upload filter on the file name's extension, ignoring case.
pub fn is_allowed_file(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            config::ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Read a prescription document from disk, refusing files over the upload limit.
pub fn read_document(path: &Path) -> Result<Vec<u8>, IntakeError> {
    let file_size = std::fs::metadata(path)?.len();
    if file_size > config::MAX_UPLOAD_BYTES {
        return Err(IntakeError::FileTooLarge {
            size_mb: file_size as f64 / (1024.0 * 1024.0),
            max_mb: config::MAX_UPLOAD_BYTES / (1024 * 1024),
        });
    }

    let mut bytes = Vec::with_capacity(file_size as usize);
    std::fs::File::open(path)?.read_to_end(&mut bytes)?;
    Ok(bytes)
}
