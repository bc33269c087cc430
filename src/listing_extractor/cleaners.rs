//! Field cleaners
//!
//! Pure functions turning raw text fragments into canonical scalar strings.
//! Each is idempotent: cleaning an already-clean value returns it unchanged.

use regex::Regex;
use std::sync::LazyLock;

use crate::utils::ZERO_REVIEWS;

// First run of digits/dots/commas that contains at least one digit
static PRICE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9.,]*[0-9][0-9.,]*").expect("BUG: hardcoded price regex is invalid")
});

static RATING_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9.]*[0-9][0-9.]*").expect("BUG: hardcoded rating regex is invalid")
});

// Decimal number (whole part optional before a fraction), optional "k" suffix
static REVIEW_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?|\.[0-9]+)(k?)")
        .expect("BUG: hardcoded review-count regex is invalid")
});

/// Extract a price as a plain decimal string (`"$1,200.50"` -> `"1200.50"`)
///
/// Thousands separators are dropped and stray leading/trailing dots are
/// normalized away. Returns `None` when the text contains no digit.
#[must_use]
pub fn clean_price(raw: &str) -> Option<String> {
    let run = PRICE_RUN.find(raw)?.as_str();
    let number: String = run.chars().filter(|c| *c != ',').collect();

    let number = number.trim_end_matches('.');
    let digits = number.trim_start_matches('.');
    if digits.len() < number.len() {
        Some(format!("0.{digits}"))
    } else {
        Some(digits.to_string())
    }
}

/// Extract a rating (`"4.9 stars"` -> `"4.9"`)
#[must_use]
pub fn clean_rating(raw: &str) -> Option<String> {
    RATING_RUN.find(raw).map(|m| m.as_str().to_string())
}

/// Normalize a review count (`"(1.2k)"` -> `"1200"`, `"25"` -> `"25"`)
///
/// Always resolves to a value: text without a number yields `"0"`.
/// Without the `k` suffix any fractional part is truncated.
#[must_use]
pub fn clean_reviews(raw: &str) -> String {
    let normalized: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | ','))
        .collect();

    let Some(caps) = REVIEW_COUNT.captures(&normalized) else {
        return ZERO_REVIEWS.to_string();
    };

    let (whole, fraction) = caps[1].split_once('.').unwrap_or((&caps[1], ""));
    let whole = if whole.is_empty() { "0" } else { whole };
    let thousands = !caps[2].is_empty();

    let count = if thousands {
        scale_thousands(whole, fraction)
    } else {
        whole.parse::<u64>().ok()
    };

    match count {
        Some(n) => n.to_string(),
        // too large for u64: keep the whole-part digits
        None => match whole.trim_start_matches('0') {
            "" => ZERO_REVIEWS.to_string(),
            digits => digits.to_string(),
        },
    }
}

/// `whole.fraction * 1000`, truncated, without going through floats
fn scale_thousands(whole: &str, fraction: &str) -> Option<u64> {
    let mut millis: String = fraction.chars().take(3).collect();
    while millis.len() < 3 {
        millis.push('0');
    }
    whole
        .parse::<u64>()
        .ok()?
        .checked_mul(1000)?
        .checked_add(millis.parse::<u64>().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_scaling_is_exact() {
        assert_eq!(scale_thousands("1", "2"), Some(1200));
        assert_eq!(scale_thousands("4", "35"), Some(4350));
        assert_eq!(scale_thousands("2", "0375"), Some(2037));
        assert_eq!(scale_thousands("12", ""), Some(12000));
        assert_eq!(scale_thousands("0", "5"), Some(500));
    }

    #[test]
    fn price_edge_dots() {
        assert_eq!(clean_price("From $5."), Some("5".to_string()));
        assert_eq!(clean_price("$.50"), Some("0.50".to_string()));
        assert_eq!(clean_price("..."), None);
    }
}
