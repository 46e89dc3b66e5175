//! Normalization of on-screen text before cross-view comparison
//!
//! The same logical value renders differently across ERP surfaces: the list
//! shows `№ 25-4545 /0 от 18.11.2025`, the deficit report shows
//! `25-4545 /0`, and dates appear both as `17.11.2025` and `Ноя 17, 2025`.
//! Comparisons always go through these functions, never raw cell text.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

/// Full order identity as generated by the ERP: `NN-NNNN /N от DD.MM.YYYY`.
pub fn order_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{2}-\d{4} /\d+ от \d{2}\.\d{2}\.\d{4}$").expect("order number regex")
    })
}

/// Strip a leading `№` (with or without a following space). Idempotent.
pub fn strip_number_prefix(s: &str) -> &str {
    s.trim().strip_prefix('№').map(str::trim_start).unwrap_or_else(|| s.trim())
}

/// Split a trailing ` от <date>` fragment off an order string.
///
/// Works independently of whether the `№` prefix is present; input without
/// the fragment comes back unchanged with `None`.
pub fn split_order_date(s: &str) -> (&str, Option<&str>) {
    match s.rfind(" от ") {
        Some(idx) => {
            let (left, right) = s.split_at(idx);
            (left.trim(), Some(right[" от ".len()..].trim()))
        }
        None => (s.trim(), None),
    }
}

/// The comparable order key: prefix stripped, date fragment dropped.
pub fn order_key(s: &str) -> String {
    let (key, _) = split_order_date(strip_number_prefix(s));
    key.to_string()
}

/// The `NN-NNNN` part of an order key, shared by all `/N` variants.
pub fn order_base(key: &str) -> &str {
    key.split(" /").next().unwrap_or(key).trim()
}

/// The `/N` variant index of an order key, if present.
pub fn variant_of(key: &str) -> Option<u32> {
    let (_, suffix) = key.rsplit_once('/')?;
    suffix.trim().parse().ok()
}

/// Month-name date tokens as the ERP renders them.
const RU_MONTHS: [&str; 12] = [
    "Янв", "Фев", "Мар", "Апр", "Май", "Июн", "Июл", "Авг", "Сен", "Окт", "Ноя", "Дек",
];

/// Parse either UI date form: `17.11.2025` or `Ноя 17, 2025`.
pub fn parse_ui_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%d.%m.%Y") {
        return Some(date);
    }

    // Month-name form: "<Мон> <D>, <YYYY>"
    let rest = s.trim_start_matches(|c: char| c.is_alphabetic());
    let month_token = &s[..s.len() - rest.len()];
    let month = RU_MONTHS.iter().position(|m| *m == month_token)? as u32 + 1;

    let mut parts = rest.trim().trim_end_matches(',').splitn(2, ',');
    let day: u32 = parts.next()?.trim().trim_end_matches(',').parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Render any accepted date form canonically as `DD.MM.YYYY`.
pub fn canonical_date(s: &str) -> Option<String> {
    parse_ui_date(s).map(|d| d.format("%d.%m.%Y").to_string())
}

/// Strip digit-group separators (regular, no-break and narrow spaces) from
/// a rendered quantity, keeping the sign.
pub fn normalize_qty(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{2009}' | '\u{202f}'))
        .collect()
}

/// Parse a rendered quantity cell into a signed integer.
pub fn parse_qty(s: &str) -> Option<i64> {
    normalize_qty(s).parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("№ 25-4545 /0", "25-4545 /0"; "prefix with space")]
    #[test_case("№25-4545 /0", "25-4545 /0"; "prefix without space")]
    #[test_case("25-4545 /0", "25-4545 /0"; "no prefix")]
    #[test_case("  № 25-4545 /0  ", "25-4545 /0"; "surrounding whitespace")]
    fn strips_number_prefix(input: &str, expected: &str) {
        assert_eq!(strip_number_prefix(input), expected);
        // Idempotent
        assert_eq!(strip_number_prefix(strip_number_prefix(input)), expected);
    }

    #[test]
    fn splits_trailing_date_fragment() {
        let (key, date) = split_order_date("25-4545 /0 от 18.11.2025");
        assert_eq!(key, "25-4545 /0");
        assert_eq!(date, Some("18.11.2025"));
    }

    #[test]
    fn split_without_fragment_returns_input() {
        let (key, date) = split_order_date("25-4545 /2");
        assert_eq!(key, "25-4545 /2");
        assert_eq!(date, None);
    }

    #[test]
    fn prefix_and_date_decorations_are_independent() {
        // Both decorations
        assert_eq!(order_key("№ 25-4545 /0 от 18.11.2025"), "25-4545 /0");
        // Only prefix
        assert_eq!(order_key("№ 25-4545 /0"), "25-4545 /0");
        // Only date
        assert_eq!(order_key("25-4545 /0 от 18.11.2025"), "25-4545 /0");
        // Neither
        assert_eq!(order_key("25-4545 /0"), "25-4545 /0");
    }

    #[test]
    fn base_and_variant_extraction() {
        assert_eq!(order_base("25-4545 /2"), "25-4545");
        assert_eq!(variant_of("25-4545 /2"), Some(2));
        assert_eq!(variant_of("25-4545"), None);
    }

    #[test]
    fn generated_number_matches_pattern() {
        assert!(order_number_re().is_match("25-4545 /0 от 18.11.2025"));
        assert!(!order_number_re().is_match("№ 25-4545 /0 от 18.11.2025"));
        assert!(!order_number_re().is_match("25-4545 /0"));
    }

    #[test_case("17.11.2025"; "numeric form")]
    #[test_case("Ноя 17, 2025"; "month name form")]
    fn both_date_forms_are_the_same_day(input: &str) {
        let expected = NaiveDate::from_ymd_opt(2025, 11, 17).unwrap();
        assert_eq!(parse_ui_date(input), Some(expected));
        assert_eq!(canonical_date(input).as_deref(), Some("17.11.2025"));
    }

    #[test_case("Янв 2, 2026", "02.01.2026")]
    #[test_case("Дек 31, 2024", "31.12.2024")]
    #[test_case("23.01.2025", "23.01.2025")]
    fn canonicalizes_dates(input: &str, expected: &str) {
        assert_eq!(canonical_date(input).as_deref(), Some(expected));
    }

    #[test]
    fn rejects_unknown_date_forms(){
        assert_eq!(parse_ui_date("November 17, 2025"), None);
        assert_eq!(parse_ui_date("17/11/2025"), None);
        assert_eq!(canonical_date(""), None);
    }

    #[test_case("1\u{a0}250", "1250"; "no break space")]
    #[test_case(" -3 ", "-3"; "signed")]
    #[test_case("1 000 000", "1000000"; "regular spaces")]
    fn normalizes_quantities(input: &str, expected: &str) {
        assert_eq!(normalize_qty(input), expected);
    }

    #[test]
    fn parses_signed_quantities() {
        assert_eq!(parse_qty("-12"), Some(-12));
        assert_eq!(parse_qty("1\u{a0}250"), Some(1250));
        assert_eq!(parse_qty("n/a"), None);
    }
}
