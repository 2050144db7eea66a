//! CFE bill field extraction module.

mod normalize;
mod parser;
pub mod rules;

pub use normalize::normalize_text;
pub use parser::{BillParser, CfeBillParser, ExtractionResult, FieldMatch};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
