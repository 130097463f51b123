//! Value-shape scorers over sample strings.
//!
//! Each scorer returns the fraction of samples (0.0-1.0) that look like the
//! given shape. An empty sample list scores 0: no evidence, not a failure.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::PlaceholderType;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(), // YYYY-MM-DD
        Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap(), // MM/DD/YYYY
        Regex::new(r"^\d{2}-\d{2}-\d{4}$").unwrap(), // MM-DD-YYYY
    ]
});

static CURRENCY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\$\d+(\.\d+)?$").unwrap(),
        Regex::new(r"(?i)^\d+(\.\d+)?\s(USD|EUR|GBP)$").unwrap(),
    ]
});

static URL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^https?://\S+").unwrap(),
        Regex::new(r"^www\.\S+").unwrap(),
    ]
});

static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)$").unwrap());

/// Named phone-number shapes, in display order.
pub static PHONE_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        ("E.164 format", Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap()),
        ("10-15 digit number", Regex::new(r"^\d{10,15}$").unwrap()),
        ("Indian mobile (+91)", Regex::new(r"^\+91\d{10}$").unwrap()),
        ("US/Canada (+1)", Regex::new(r"^\+1\d{10}$").unwrap()),
    ]
});

static LONG_DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{10,}").unwrap());

/// Fraction of samples satisfying `predicate`, over all samples.
fn fraction<F>(samples: &[String], predicate: F) -> f64
where
    F: Fn(&str) -> bool,
{
    if samples.is_empty() {
        return 0.0;
    }
    let hits = samples.iter().filter(|s| predicate(s.trim())).count();
    hits as f64 / samples.len() as f64
}

fn matches_any(patterns: &[Regex], value: &str) -> bool {
    patterns.iter().any(|p| p.is_match(value))
}

/// Fraction of samples shaped like `YYYY-MM-DD`, `MM/DD/YYYY` or `MM-DD-YYYY`.
pub fn date_score(samples: &[String]) -> f64 {
    fraction(samples, |v| matches_any(&DATE_PATTERNS, v))
}

/// Fraction of samples shaped like `$12.50` or `12.50 USD` (EUR, GBP too).
pub fn currency_score(samples: &[String]) -> f64 {
    fraction(samples, |v| matches_any(&CURRENCY_PATTERNS, v))
}

/// Fraction of samples starting with `http://`, `https://` or `www.`.
pub fn url_score(samples: &[String]) -> f64 {
    fraction(samples, |v| matches_any(&URL_PATTERNS, v))
}

/// Fraction of non-blank samples that are not purely numeric.
///
/// Blank samples are left out of the denominator; all-blank scores 0.
pub fn text_score(samples: &[String]) -> f64 {
    let non_blank: Vec<&str> = samples
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    if non_blank.is_empty() {
        return 0.0;
    }
    let textual = non_blank.iter().filter(|v| !is_numeric(v)).count();
    textual as f64 / non_blank.len() as f64
}

/// Score samples against the validator for a placeholder type.
pub fn type_score(placeholder_type: PlaceholderType, samples: &[String]) -> f64 {
    match placeholder_type {
        PlaceholderType::Date => date_score(samples),
        PlaceholderType::Currency => currency_score(samples),
        PlaceholderType::Url => url_score(samples),
        PlaceholderType::Text => text_score(samples),
    }
}

/// Whether a value is a plain number, optionally signed.
pub fn is_numeric(value: &str) -> bool {
    NUMERIC.is_match(value.trim())
}

/// Whether a value matches any named phone shape.
pub fn is_phone_like(value: &str) -> bool {
    let value = value.trim();
    PHONE_PATTERNS.iter().any(|(_, p)| p.is_match(value))
}

/// Fraction of samples matching any named phone shape.
pub fn phone_score(samples: &[String]) -> f64 {
    fraction(samples, is_phone_like)
}

/// Labels of the phone shapes matched by at least one sample.
pub fn matched_phone_patterns(samples: &[String]) -> Vec<String> {
    PHONE_PATTERNS
        .iter()
        .filter(|(_, p)| samples.iter().any(|s| p.is_match(s.trim())))
        .map(|(label, _)| label.to_string())
        .collect()
}

/// Whether the concatenated samples contain a `+` or a run of 10+ digits.
pub fn has_raw_phone_signal(samples: &[String]) -> bool {
    let joined = samples.concat();
    joined.contains('+') || LONG_DIGIT_RUN.is_match(&joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_empty_samples_score_zero() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(date_score(&empty), 0.0);
        assert_eq!(currency_score(&empty), 0.0);
        assert_eq!(url_score(&empty), 0.0);
        assert_eq!(text_score(&empty), 0.0);
        assert_eq!(phone_score(&empty), 0.0);
    }

    #[test]
    fn test_date_score() {
        let samples = s(&["2024-01-15", "01/15/2024", "01-15-2024", "Jan 15"]);
        assert_eq!(date_score(&samples), 0.75);
    }

    #[test]
    fn test_currency_score() {
        let samples = s(&["$10", "$10.50", "12.5 usd", "7 GBP", "10 JPY", "ten"]);
        assert!((currency_score(&samples) - 4.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_url_score() {
        let samples = s(&["https://example.com", "http://a.b/c", "www.shop.in", "example.com"]);
        assert_eq!(url_score(&samples), 0.75);
    }

    #[test]
    fn test_currency_needs_one_space_and_url_is_case_sensitive() {
        assert_eq!(currency_score(&s(&["12USD"])), 0.0);
        assert_eq!(currency_score(&s(&["12   usd"])), 0.0);
        assert_eq!(currency_score(&s(&["12 usd"])), 1.0);

        assert_eq!(url_score(&s(&["HTTPS://x.com"])), 0.0);
        assert_eq!(url_score(&s(&["WWW.shop.in"])), 0.0);
        assert_eq!(url_score(&s(&["https://x.com"])), 1.0);
    }

    #[test]
    fn test_text_score_ignores_blanks() {
        let samples = s(&["Alice", "", "42", "  "]);
        assert_eq!(text_score(&samples), 0.5);
        assert_eq!(text_score(&s(&["", " "])), 0.0);
    }

    #[test]
    fn test_signed_numbers_are_numeric() {
        assert!(is_numeric("+919999999999"));
        assert!(is_numeric("-3.5"));
        assert!(is_numeric(".5"));
        assert!(!is_numeric("12 USD"));
        assert!(!is_numeric("NaN"));
    }

    #[test]
    fn test_type_score_dispatch() {
        let samples = s(&["2024-02-01"]);
        assert_eq!(type_score(PlaceholderType::Date, &samples), 1.0);
        assert_eq!(type_score(PlaceholderType::Url, &samples), 0.0);
        assert_eq!(type_score(PlaceholderType::Text, &samples), 1.0);
    }

    #[test]
    fn test_phone_patterns() {
        let samples = s(&["+919999999999", "5551234567", "hello"]);
        assert!((phone_score(&samples) - 2.0 / 3.0).abs() < 1e-9);

        let labels = matched_phone_patterns(&samples);
        assert!(labels.contains(&"E.164 format".to_string()));
        assert!(labels.contains(&"10-15 digit number".to_string()));
        assert!(labels.contains(&"Indian mobile (+91)".to_string()));
        assert!(!labels.contains(&"US/Canada (+1)".to_string()));
    }

    #[test]
    fn test_raw_phone_signal() {
        assert!(has_raw_phone_signal(&s(&["+44"])));
        assert!(has_raw_phone_signal(&s(&["call 98765 43210", "9876543210"])));
        assert!(!has_raw_phone_signal(&s(&["123", "456", "Alice"])));
        // Samples are concatenated without a separator.
        assert!(has_raw_phone_signal(&s(&["12345", "67890"])));
    }
}
