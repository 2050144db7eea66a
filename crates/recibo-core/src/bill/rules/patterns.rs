//! Common regex patterns for CFE bill extraction.
//!
//! All anchors expect text that went through
//! [`normalize_text`](crate::bill::normalize_text), so they are written in
//! uppercase only.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Service number: "NO. DE SERVICIO:441000800801"
    pub static ref ACCOUNT_ID: Regex = Regex::new(
        r"NO\.?\s*DE\s*SERVICIO\s*[:.]?\s*(\d+(?:-\d+)*)"
    ).unwrap();

    // Payment deadline: "LÍMITE DE PAGO:29 JUN 25"
    pub static ref DUE_DATE: Regex = Regex::new(
        r"LÍMITE\s+DE\s+PAGO\s*:?\s*(\d{1,2})\s+([A-Z]{3})\s+(\d{2,4})"
    ).unwrap();

    // Billing period: "PERIODO FACTURADO:10 ABR 25-11 JUN 25"
    pub static ref BILLING_PERIOD: Regex = Regex::new(
        r"PERIODO\s+FACTURADO\s*:?\s*\d{1,2}\s+([A-Z]{3}).*?-\s*\d{1,2}\s+([A-Z]{3})"
    ).unwrap();

    // Normalized period token
    pub static ref PERIOD_TOKEN: Regex = Regex::new(
        r"^([A-Z]{3})-([A-Z]{3})$"
    ).unwrap();

    // Output naming scheme: "2025_06_29_CFE_441000800801_ABR-JUN.pdf"
    pub static ref CANONICAL_FILE_NAME: Regex = Regex::new(
        r"^(\d{4})_(\d{2})_(\d{2})_CFE_(\d{10,20})_([A-Z]{3}-[A-Z]{3})\.(?i:pdf)$"
    ).unwrap();
}
