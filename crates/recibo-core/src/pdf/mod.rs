//! PDF processing module.

mod extractor;
#[cfg(test)]
pub(crate) mod fixtures;

pub use extractor::{PdfExtractor, PdfTextSource};
pub(crate) use extractor::panic_message;

use std::path::Path;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;
}

/// Anything able to produce the first page text of a document on disk.
///
/// `Ok(None)` means the document opened fine but its first page carries
/// no extractable text.
pub trait TextSource {
    fn first_page_text(&self, path: &Path) -> crate::Result<Option<String>>;
}
