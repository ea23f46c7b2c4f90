//! Price bounds and display helpers.

use crate::error::CoreError;
use crate::types::Cents;

/// Highest price accepted for a single vehicle or gear product (10 M€).
pub const MAX_PRICE_CENTS: Cents = 1_000_000_000;

/// Reject negative prices and prices above [`MAX_PRICE_CENTS`].
pub fn validate_price(field: &str, cents: Cents) -> Result<(), CoreError> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(CoreError::Validation(format!(
            "{field} must be between 0 and {MAX_PRICE_CENTS}"
        )));
    }
    Ok(())
}

/// Percentage saved relative to the compare-at price.
///
/// Returns `None` unless `compare_price_cents` is strictly greater than
/// `price_cents`, so no discount badge is shown for equal or lower compare
/// prices. The result is rounded to the nearest whole percent.
pub fn discount_percent(price_cents: Cents, compare_price_cents: Option<Cents>) -> Option<u8> {
    let compare = compare_price_cents?;
    if compare <= price_cents || compare <= 0 {
        return None;
    }
    let saved = (compare - price_cents.max(0)) as f64;
    let percent = (saved / compare as f64 * 100.0).round();
    Some(percent.clamp(0.0, 100.0) as u8)
}

/// Format an amount in cents as euros, e.g. `12 990,00 €`.
pub fn format_eur(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let units = abs / 100;
    let fraction = abs % 100;

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped},{fraction:02} €")
}
