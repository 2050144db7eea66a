//! Text normalization ahead of anchor matching.

/// Uppercase the raw page text so anchors can be matched in one casing.
///
/// A page without extractable text (`None`) normalizes to the empty string;
/// every anchor search then simply fails to match.
pub fn normalize_text(raw: Option<&str>) -> String {
    raw.map(str::to_uppercase).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_uppercases_accents() {
        assert_eq!(
            normalize_text(Some("Fecha límite de pago: 29 jun 25")),
            "FECHA LÍMITE DE PAGO: 29 JUN 25"
        );
    }

    #[test]
    fn test_whitespace_untouched() {
        assert_eq!(normalize_text(Some("no.  de\tservicio:\n1")), "NO.  DE\tSERVICIO:\n1");
    }

    #[test]
    fn test_missing_text() {
        assert_eq!(normalize_text(None), "");
        assert_eq!(normalize_text(Some("")), "");
    }
}
