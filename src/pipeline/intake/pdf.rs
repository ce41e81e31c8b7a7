use super::format::DocumentKind;
use super::text::{DocumentTextSource, PlainTextSource};
use super::IntakeError;

/// Reads the embedded text layer of digital PDFs with pdf-extract.
///
/// Scanned PDFs have no text layer and come back empty; callers treat that
/// as "no text extracted".
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl DocumentTextSource for PdfTextSource {
    fn extract_text(&self, bytes: &[u8], kind: DocumentKind) -> Result<String, IntakeError> {
        if kind != DocumentKind::Pdf {
            return Err(IntakeError::UnsupportedFormat(kind.as_str().to_string()));
        }

        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| IntakeError::PdfParsing(e.to_string()))?;
        tracing::debug!(text_length = text.len(), "PDF text layer extracted");
        Ok(text)
    }
}

/// Built-in source for uploads: plain text and digital PDFs.
///
/// Images need an OCR engine plugged in through [`DocumentTextSource`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLayerSource;

impl DocumentTextSource for TextLayerSource {
    fn extract_text(&self, bytes: &[u8], kind: DocumentKind) -> Result<String, IntakeError> {
        match kind {
            DocumentKind::PlainText => PlainTextSource.extract_text(bytes, kind),
            DocumentKind::Pdf => PdfTextSource.extract_text(bytes, kind),
            DocumentKind::Image | DocumentKind::Unsupported => {
                Err(IntakeError::UnsupportedFormat(kind.as_str().to_string()))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::pipeline::intake::detect_kind;

    /// Single-page PDF with `text` in its text layer, built with lopdf.
    pub(crate) fn make_test_pdf(text: &str) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let resources = dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        };

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        });

        if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(page_id) {
            dict.set("Parent", pages_id);
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn generated_pdf_is_detected_as_pdf() {
        let pdf = make_test_pdf("Prescribed warfarin");
        assert_eq!(detect_kind(&pdf), DocumentKind::Pdf);
    }

    #[test]
    fn extracts_text_layer_from_digital_pdf() {
        let pdf = make_test_pdf("Prescribed warfarin 5 mg daily");
        let text = PdfTextSource.extract_text(&pdf, DocumentKind::Pdf).unwrap();
        assert!(
            text.to_lowercase().contains("warfarin"),
            "Expected text to mention warfarin, got: {text}"
        );
    }

    #[test]
    fn invalid_pdf_returns_error() {
        let err = PdfTextSource
            .extract_text(b"%PDF-1.4 not really a pdf", DocumentKind::Pdf)
            .unwrap_err();
        assert!(matches!(err, IntakeError::PdfParsing(_)));
    }

    #[test]
    fn pdf_source_rejects_other_kinds() {
        let err = PdfTextSource
            .extract_text(b"plain notes", DocumentKind::PlainText)
            .unwrap_err();
        assert!(matches!(err, IntakeError::UnsupportedFormat(ref k) if k == "plain_text"));
    }

    #[test]
    fn text_layer_source_dispatches_by_kind() {
        let text = TextLayerSource
            .extract_text(b"Take lisinopril", DocumentKind::PlainText)
            .unwrap();
        assert_eq!(text, "Take lisinopril");

        let pdf = make_test_pdf("Take lisinopril");
        let text = TextLayerSource.extract_text(&pdf, DocumentKind::Pdf).unwrap();
        assert!(text.to_lowercase().contains("lisinopril"));
    }

    #[test]
    fn text_layer_source_leaves_images_to_ocr() {
        let err = TextLayerSource
            .extract_text(&[0xFF, 0xD8, 0xFF, 0xE0], DocumentKind::Image)
            .unwrap_err();
        assert!(matches!(err, IntakeError::UnsupportedFormat(ref k) if k == "image"));
    }
}
