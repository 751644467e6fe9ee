//! Price normalization.
//!
//! Only basic normalization: no currency conversion, no locale-aware
//! parsing. Thousands separators and currency symbols are stripped.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Renders an amount as a decimal string with exactly two fraction digits,
/// rounding half away from zero at the cent: `9.99 -> "9.99"`,
/// `10 -> "10.00"`, `4.005 -> "4.01"`.
#[must_use]
pub fn decimal_string(amount: Decimal) -> String {
    let mut rounded =
        amount.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Parses a display price such as `"$1,299.99"` into a number by keeping
/// only ASCII digits and `.`.
///
/// Returns `None` when nothing numeric remains or the remainder is not a
/// valid decimal (e.g. `"1.2.3"`).
#[must_use]
pub fn parse_display_price(display: &str) -> Option<Decimal> {
    let digits: String = display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }
    Decimal::from_str(&digits).ok()
}
