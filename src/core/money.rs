use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places carried by every rupee amount leaving the system.
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount to money scale, half-up.
///
/// Internal accumulation (line amounts, subtotals, tax) runs on unrounded
/// values; this is applied only at display and persistence boundaries so
/// rounding error never compounds across line items.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount with exactly two decimal places, no grouping.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount))
}

/// Formats an amount with thousands separators for documents, e.g. "1,23,456.78" -> "123,456.78".
pub fn format_grouped(amount: Decimal) -> String {
    let plain = format_amount(amount);
    let (int_part, dec_part) = match plain.split_once('.') {
        Some((i, d)) => (i, d),
        None => (plain.as_str(), "00"),
    };

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::new();
    let chars: Vec<char> = digits.chars().collect();
    for (i, ch) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    format!("{}{}.{}", sign, grouped, dec_part)
}

/// Number of significant decimal places in a value, trailing zeros ignored.
pub fn decimal_places(value: Decimal) -> u32 {
    value.normalize().scale()
}
