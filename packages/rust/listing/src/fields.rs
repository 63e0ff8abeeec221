//! Field-level parsing for listing results: ordinals and years.

/// Separator used by the listing site for year ranges (en dash).
const RANGE_DASH: char = '–';

/// Leading ordinal of a listing title (`"12. Heat"` → `Some("12")`).
fn leading_ordinal(title: &str) -> Option<&str> {
    let (head, _) = title.split_once('.')?;
    (!head.is_empty() && head.bytes().all(|b| b.is_ascii_digit())).then_some(head)
}

/// Format the position marker for a result at 0-based `index`.
///
/// Uses the title's own ordinal when present, else `index + 1`.
pub fn position_marker(title: &str, index: usize) -> String {
    match leading_ordinal(title) {
        Some(n) => format!("{n}. "),
        None => format!("{}. ", index + 1),
    }
}

/// Title text after the first `.`, trimmed; the whole trimmed title when
/// there is no `.`.
pub fn strip_ordinal(title: &str) -> &str {
    match title.split_once('.') {
        Some((_, rest)) => rest.trim(),
        None => title.trim(),
    }
}

/// Pick the year from a result's metadata fragments.
///
/// The first fragment that is either a range starting with a digit or a
/// bare 4-digit year wins. Open ranges (`"2015–"`) get a trailing space.
pub fn extract_year<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
    for raw in fragments {
        let text = raw.trim();
        let starts_with_digit = text.chars().next().is_some_and(|c| c.is_ascii_digit());

        if text.contains(RANGE_DASH) && starts_with_digit {
            if text.ends_with(RANGE_DASH) {
                return format!("{text} ");
            }
            return text.to_string();
        }

        if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) {
            return text.to_string();
        }
    }

    String::new()
}
