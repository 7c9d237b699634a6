//! Display formatting for money, identifiers and dates.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

pub const CURRENCY_SYMBOL: &str = "$";
pub const DEFAULT_DATE_FORMAT: &str = "%d %b %Y";

/// Format money as `$1,234.56` (or `-$1,234.56`) with `decimals` fraction digits
pub fn format_currency(amount: Decimal, decimals: u32) -> String {
    format_currency_with(amount, decimals, CURRENCY_SYMBOL)
}

/// Like [`format_currency`] but an absent amount renders as zero
pub fn format_currency_opt(amount: Option<Decimal>, decimals: u32) -> String {
    format_currency(amount.unwrap_or(Decimal::ZERO), decimals)
}

pub fn format_currency_with(amount: Decimal, decimals: u32, symbol: &str) -> String {
    let (negative, body) = fixed_point(amount, decimals);
    let sign = if negative { "-" } else { "" };
    format!("{sign}{symbol}{body}")
}

/// Up to two fraction digits, trailing zeros dropped: `1,234.5`
pub fn format_number(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let body = match text.split_once('.') {
        Some((whole, frac)) => format!("{}.{}", group_thousands(whole), frac),
        None => group_thousands(&text),
    };
    if negative {
        format!("-{body}")
    } else {
        body
    }
}

/// Round half away from zero and render the absolute value with grouped thousands
fn fixed_point(amount: Decimal, decimals: u32) -> (bool, String) {
    let mut rounded =
        amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded = rounded.abs();
    rounded.rescale(decimals);

    let text = rounded.to_string();
    let body = match text.split_once('.') {
        Some((whole, frac)) => format!("{}.{}", group_thousands(whole), frac),
        None => group_thousands(&text),
    };
    (negative, body)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}

/// Group an 11-digit ABN as `XX XXX XXX XXX`.
///
/// Anything that is not exactly 11 digits once non-digits are stripped comes back unchanged.
pub fn format_abn(abn: &str) -> String {
    let digits: String = abn.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 11 {
        return abn.to_string();
    }
    format!(
        "{} {} {} {}",
        &digits[0..2],
        &digits[2..5],
        &digits[5..8],
        &digits[8..11]
    )
}

/// Parse user-entered money such as `$1,250.00`; `None` when empty or not a number
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let cleaned: String = input
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Like [`parse_amount`] but falls back to zero
pub fn parse_number_input(input: &str) -> Decimal {
    parse_amount(input).unwrap_or(Decimal::ZERO)
}

/// Default PayID for an invoice number: `asp<number>@<domain>`
pub fn generate_pay_id(invoice_number: &str, domain: &str) -> String {
    if invoice_number.is_empty() {
        return String::new();
    }
    format!("asp{invoice_number}@{domain}")
}

pub fn format_date(date: Option<NaiveDate>, fmt: &str) -> String {
    date.map(|d| d.format(fmt).to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec("1234.5"), 2), "$1,234.50");
        assert_eq!(format_currency(dec("0"), 2), "$0.00");
        assert_eq!(format_currency(dec("999"), 2), "$999.00");
        assert_eq!(format_currency(dec("1234567.891"), 2), "$1,234,567.89");
        assert_eq!(format_currency(dec("-60000"), 2), "-$60,000.00");
    }

    #[test]
    fn test_format_currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec("0.005"), 2), "$0.01");
        assert_eq!(format_currency(dec("-0.005"), 2), "-$0.01");
        assert_eq!(format_currency(dec("-0.001"), 2), "$0.00");
    }

    #[test]
    fn test_format_currency_whole_dollars() {
        assert_eq!(format_currency(dec("1249.5"), 0), "$1,250");
        assert_eq!(format_currency(dec("12.49"), 0), "$12");
    }

    #[test]
    fn test_format_currency_opt() {
        assert_eq!(format_currency_opt(None, 2), "$0.00");
        assert_eq!(format_currency_with(dec("5"), 2, "A$"), "A$5.00");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(dec("1234.50")), "1,234.5");
        assert_eq!(format_number(dec("1200")), "1,200");
        assert_eq!(format_number(dec("0.126")), "0.13");
        assert_eq!(format_number(dec("-98765.4321")), "-98,765.43");
    }

    #[test]
    fn test_format_abn() {
        assert_eq!(format_abn("51824753556"), "51 824 753 556");
        assert_eq!(format_abn("51 824 753 556"), "51 824 753 556");
        assert_eq!(format_abn("51-824-753-556"), "51 824 753 556");
        assert_eq!(format_abn("123"), "123");
        assert_eq!(format_abn(""), "");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,250.00"), Some(dec("1250")));
        assert_eq!(parse_amount(" 42 "), Some(dec("42")));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_number_input("oops"), Decimal::ZERO);
    }

    #[test]
    fn test_generate_pay_id() {
        assert_eq!(
            generate_pay_id("INV-001", "clearitt.com"),
            "aspINV-001@clearitt.com"
        );
        assert_eq!(generate_pay_id("", "clearitt.com"), "");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7);
        assert_eq!(format_date(date, DEFAULT_DATE_FORMAT), "07 Mar 2026");
        assert_eq!(format_date(None, DEFAULT_DATE_FORMAT), "");
    }
}
