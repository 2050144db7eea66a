//! PDF text extraction using lopdf and pdf-extract.

use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use lopdf::Document;
use tracing::{debug, trace};

use super::{PdfProcessor, Result, TextSource};
use crate::error::PdfError;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Text of the first page, `None` when the page has no text.
    pub fn first_page_text(&self) -> Result<Option<String>> {
        let text = self.extract_page_text(1)?;
        if text.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        match extract_pages(&self.raw_data) {
            Ok(pages) => {
                let text = pages.into_iter().nth((page - 1) as usize).unwrap_or_default();
                trace!("pdf-extract returned {} chars for page {}", text.len(), page);
                Ok(text)
            }
            Err(e) => {
                // Fall back to lopdf's own text operator walk
                debug!("pdf-extract failed ({}), falling back to lopdf", e);
                doc.extract_text(&[page])
                    .map_err(|e| PdfError::TextExtraction(e.to_string()))
            }
        }
    }
}

/// Run pdf-extract over the whole document, turning a panic inside it into
/// an error.
fn extract_pages(data: &[u8]) -> Result<Vec<String>> {
    match panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(data)
    })) {
        Ok(pages) => pages.map_err(|e| PdfError::TextExtraction(e.to_string())),
        Err(payload) => Err(PdfError::TextExtraction(format!(
            "pdf-extract panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

/// [`TextSource`] reading PDFs from disk.
///
/// Each call opens its own document; the file contents are dropped before
/// the call returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl PdfTextSource {
    pub fn new() -> Self {
        Self
    }
}

impl TextSource for PdfTextSource {
    fn first_page_text(&self, path: &Path) -> crate::Result<Option<String>> {
        let data = fs::read(path)?;
        let mut extractor = PdfExtractor::new();
        extractor.load(&data)?;
        Ok(extractor.first_page_text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixtures;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_extract_without_document() {
        let extractor = PdfExtractor::new();
        assert!(matches!(extractor.extract_page_text(1), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_load_garbage() {
        let mut extractor = PdfExtractor::new();
        assert!(matches!(
            extractor.load(b"this is not a pdf"),
            Err(PdfError::Parse(_))
        ));
    }

    #[test]
    fn test_text_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdfTextSource::new().first_page_text(&dir.path().join("missing.pdf"));
        assert!(matches!(result, Err(crate::ReciboError::Io(_))));
    }

    #[test]
    fn test_first_page_text() {
        let mut extractor = PdfExtractor::new();
        extractor.load(&fixtures::pdf_with_lines(&fixtures::BILL_LINES)).unwrap();

        assert_eq!(extractor.page_count(), 1);
        let text = extractor.first_page_text().unwrap().unwrap();
        assert!(text.contains("NO. DE SERVICIO:441000800801"));
        assert!(text.contains("LÍMITE DE PAGO:29 JUN 25"));
        assert!(text.contains("PERIODO FACTURADO:10 ABR 25-11 JUN 25"));
    }

    #[test]
    fn test_page_out_of_range() {
        let mut extractor = PdfExtractor::new();
        extractor.load(&fixtures::pdf_with_lines(&fixtures::BILL_LINES)).unwrap();

        assert!(matches!(extractor.extract_page_text(0), Err(PdfError::InvalidPage(0))));
        assert!(matches!(extractor.extract_page_text(2), Err(PdfError::InvalidPage(2))));
    }

    #[test]
    fn test_blank_page_is_none() {
        let mut extractor = PdfExtractor::new();
        extractor.load(&fixtures::pdf_with_lines(&[])).unwrap();
        assert_eq!(extractor.first_page_text().unwrap(), None);
    }

    #[test]
    fn test_text_without_font_falls_back_to_lopdf() {
        let mut extractor = PdfExtractor::new();
        extractor
            .load(&fixtures::pdf_without_font("NO. DE SERVICIO:441000800801"))
            .unwrap();

        // lopdf cannot decode text shown without a font, so the page is blank.
        assert_eq!(extractor.first_page_text().unwrap(), None);
    }

    #[test]
    fn test_extract_pages_contains_panics() {
        let data = fixtures::pdf_without_font("NO. DE SERVICIO:441000800801");
        assert!(matches!(extract_pages(&data), Err(PdfError::TextExtraction(_))));
    }

    #[test]
    fn test_text_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recibo.pdf");
        fs::write(&path, fixtures::pdf_with_lines(&fixtures::BILL_LINES)).unwrap();

        let text = PdfTextSource::new().first_page_text(&path).unwrap().unwrap();
        assert!(text.contains("NO. DE SERVICIO"));
    }
}
