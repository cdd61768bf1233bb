use serde::Serialize;
use std::fmt;

/// A coerced zone-grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Null,
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => write!(f, "null"),
        }
    }
}

/// Coerces raw cell text into a number, text or null. Never fails.
///
/// The site renders negative numbers right-to-left, so `12-` means `-12`.
/// Text that went through lossy decoding (contains U+FFFD) is not
/// representable and becomes [`CellValue::Null`].
pub fn coerce(raw: &str) -> CellValue {
    let text = raw.trim();
    if let Some(n) = parse_float_or_null(text) {
        return CellValue::Number(n);
    }
    if text.contains(char::REPLACEMENT_CHARACTER) {
        return CellValue::Null;
    }
    if let Some(digits) = text.strip_suffix('-') {
        if let Ok(n) = format!("-{}", digits.trim_end()).parse::<f64>() {
            return CellValue::Number(n);
        }
    }
    CellValue::Text(text.to_string())
}

/// Plain float parse used by the station pages; no sign repair.
pub fn parse_float_or_null(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_minus_is_moved_to_the_front() {
        assert_eq!(coerce("12-"), CellValue::Number(-12.0));
        assert_eq!(coerce("0.5-"), CellValue::Number(-0.5));
    }

    #[test]
    fn plain_numbers_parse() {
        assert_eq!(coerce("12"), CellValue::Number(12.0));
        assert_eq!(coerce(" 3.2 "), CellValue::Number(3.2));
        assert_eq!(coerce("-4"), CellValue::Number(-4.0));
    }

    #[test]
    fn lone_minus_is_left_alone() {
        assert_eq!(coerce("-"), CellValue::Text("-".to_string()));
    }

    #[test]
    fn non_numeric_text_is_kept_trimmed() {
        assert_eq!(coerce("  08:00 "), CellValue::Text("08:00".to_string()));
        assert_eq!(coerce("NoData"), CellValue::Text("NoData".to_string()));
        assert_eq!(coerce(""), CellValue::Text(String::new()));
        assert_eq!(coerce("abc-"), CellValue::Text("abc-".to_string()));
    }

    #[test]
    fn undecodable_text_is_null() {
        assert_eq!(coerce("\u{FFFD}\u{FFFD}"), CellValue::Null);
    }

    #[test]
    fn coerce_never_panics() {
        for raw in ["", "-", "--", "1--", "\u{FFFD}-", "[]", "1e3-", "nan", "ק\"מ", "\t\r\n"] {
            let _ = coerce(raw);
        }
        assert_eq!(coerce("1e3-"), CellValue::Number(-1000.0));
        assert_eq!(coerce("-12-"), CellValue::Text("-12-".to_string()));
    }

    #[test]
    fn station_parse_has_no_sign_repair() {
        assert_eq!(parse_float_or_null("12-"), None);
        assert_eq!(parse_float_or_null(" 7.25 "), Some(7.25));
        assert_eq!(parse_float_or_null(""), None);
    }

    #[test]
    fn accessors_match_variant() {
        assert_eq!(coerce("2.5").as_number(), Some(2.5));
        assert_eq!(coerce("2.5").as_text(), None);
        assert_eq!(coerce("08:00").as_text(), Some("08:00"));
        assert_eq!(CellValue::Null.as_number(), None);
    }

    #[test]
    fn serializes_untagged() {
        let values = vec![
            CellValue::Number(1.5),
            CellValue::Text("x".to_string()),
            CellValue::Null,
        ];
        assert_eq!(serde_json::to_string(&values).unwrap(), r#"[1.5,"x",null]"#);
    }
}
