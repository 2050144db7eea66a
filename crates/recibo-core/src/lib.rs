//! Core library for CFE utility bill processing.
//!
//! This crate provides:
//! - First page text extraction from PDF bills
//! - Field extraction (service number, payment due date, billing period)
//! - A validated bill record and its canonical file name
//! - In-place batch renaming of a directory of bills

pub mod batch;
pub mod bill;
pub mod error;
pub mod models;
pub mod pdf;

pub use batch::{BatchRenamer, BatchReport, FileOutcome, FileReport, SkipReason, list_pdfs};
pub use bill::{BillParser, CfeBillParser, ExtractionResult};
pub use error::{ExtractionError, PdfError, ReciboError, Result};
pub use models::config::{ReciboConfig, RenameConfig};
pub use models::record::{BillingPeriod, ExtractedRecord};
pub use pdf::{PdfExtractor, PdfProcessor, PdfTextSource, TextSource};
