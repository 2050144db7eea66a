//! Service number (account id) extraction.

use super::patterns::ACCOUNT_ID;
use super::{ExtractionMatch, FieldExtractor};

/// Account id field extractor.
///
/// Yields the raw digit run that follows the "NO. DE SERVICIO" anchor.
/// Length and digit-only checks happen when the record is built.
pub struct AccountIdExtractor;

impl AccountIdExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AccountIdExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AccountIdExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = ACCOUNT_ID.captures(text)?;
        let full_match = caps.get(0)?;

        Some(
            ExtractionMatch::new(caps[1].to_string(), full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }
}

/// Extract the raw account id from normalized text.
pub fn extract_account_id(text: &str) -> Option<String> {
    AccountIdExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_no_space() {
        assert_eq!(
            extract_account_id("NO. DE SERVICIO:441000800801"),
            Some("441000800801".to_string())
        );
    }

    #[test]
    fn test_extract_spacing_variants() {
        for text in [
            "NO. DE SERVICIO: 441000800801",
            "NO DE SERVICIO 441000800801",
            "NO.DE SERVICIO441000800801",
            "NO. DE SERVICIO . 441000800801",
            "NO.  DE  SERVICIO :441000800801",
        ] {
            assert_eq!(
                extract_account_id(text),
                Some("441000800801".to_string()),
                "failed on {:?}",
                text
            );
        }
    }

    #[test]
    fn test_extract_hyphenated_groups() {
        assert_eq!(
            extract_account_id("NO. DE SERVICIO: 441-000-800801 TARIFA 1"),
            Some("441-000-800801".to_string())
        );
    }

    #[test]
    fn test_extract_stops_at_digit_run() {
        let text = "NO. DE SERVICIO:441000800801 RMU:12345";
        assert_eq!(extract_account_id(text), Some("441000800801".to_string()));
    }

    #[test]
    fn test_extract_with_position() {
        let text = "CFE SUMINISTRADOR\nNO. DE SERVICIO:441000800801\n";
        let m = AccountIdExtractor::new().extract(text).unwrap();
        assert_eq!(m.source, "NO. DE SERVICIO:441000800801");
        let (start, end) = m.position.unwrap();
        assert_eq!(&text[start..end], m.source);
    }

    #[test]
    fn test_missing_anchor() {
        assert_eq!(extract_account_id("NUMERO 441000800801"), None);
        assert_eq!(extract_account_id("NO. DE SERVICIO: N/A"), None);
        assert_eq!(extract_account_id(""), None);
    }

    #[test]
    fn test_lowercase_text_is_not_matched() {
        // Callers normalize first.
        assert_eq!(extract_account_id("no. de servicio:441000800801"), None);
    }
}
