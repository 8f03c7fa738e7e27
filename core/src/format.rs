//! Display formatting for amounts, rates and terms.
//!
//! Currency follows en-US conventions: symbol prefix, comma thousands
//! separators, two decimals. Cents are rounded half away from zero.

use crate::types::Money;

/// `1798.6516` with `"$"` → `"$1,798.65"`.
///
/// Digits come from the rounded float itself, so amounts of any
/// magnitude keep their exact grouping. Non-finite values render as
/// `inf` / `NaN`.
pub fn format_currency(value: Money, symbol: &str) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let cents = (value.abs() * 100.0).round();
    let digits = if cents.is_finite() {
        format!("{cents:03.0}")
    } else {
        // Too large to scale by 100; whole units carry no cents here.
        format!("{:.0}00", value.abs().round())
    };
    let (units, frac) = digits.split_at(digits.len() - 2);
    let sign = if value < 0.0 && cents != 0.0 { "-" } else { "" };
    format!("{sign}{symbol}{}.{frac}", group_digits(units))
}

/// Currency without the cents part, e.g. `"$50,000"`. Used in messages.
pub fn format_whole_currency(value: Money, symbol: &str) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let units = value.abs().round();
    let sign = if value < 0.0 && units != 0.0 { "-" } else { "" };
    format!("{sign}{symbol}{}", group_digits(&format!("{units:.0}")))
}

/// `6.0` → `"6%"`, `4.25` → `"4.25%"`.
pub fn format_percent(value: f64) -> String {
    format!("{value}%")
}

pub fn format_term(years: u32) -> String {
    format!("{years} Years")
}

/// Insert commas every three digits from the right: `"1234567"` → `"1,234,567"`.
pub fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_digits("0"), "0");
        assert_eq!(group_digits("999"), "999");
        assert_eq!(group_digits("1000"), "1,000");
        assert_eq!(group_digits("1234567"), "1,234,567");
    }

    #[test]
    fn currency_rounds_to_cents() {
        assert_eq!(format_currency(1798.6515754, "$"), "$1,798.65");
        assert_eq!(format_currency(1000.0, "$"), "$1,000.00");
        assert_eq!(format_currency(0.125, "$"), "$0.13");
        assert_eq!(format_currency(300_000.0, "$"), "$300,000.00");
    }

    #[test]
    fn negative_currency_keeps_sign_outside_symbol() {
        assert_eq!(format_currency(-12.5, "$"), "-$12.50");
        // Rounds to zero, so no sign.
        assert_eq!(format_currency(-0.001, "$"), "$0.00");
    }

    #[test]
    fn large_amounts_keep_every_digit() {
        assert_eq!(
            format_currency(1e20, "$"),
            "$100,000,000,000,000,000,000.00"
        );
        assert_eq!(
            format_whole_currency(1e20, "$"),
            "$100,000,000,000,000,000,000"
        );

        let huge = format_currency(1e307, "$");
        assert!(huge.starts_with("$9,999") || huge.starts_with("$10,000"), "{huge}");
        assert!(huge.ends_with(".00"), "{huge}");
        assert!(!huge.contains("inf"), "{huge}");
    }

    #[test]
    fn non_finite_values_are_not_dressed_as_money() {
        assert_eq!(format_currency(f64::INFINITY, "$"), "inf");
        assert_eq!(format_currency(f64::NAN, "$"), "NaN");
    }

    #[test]
    fn whole_currency_drops_cents() {
        assert_eq!(format_whole_currency(50_000.0, "$"), "$50,000");
        assert_eq!(format_whole_currency(1_000_000.4, "€"), "€1,000,000");
    }

    #[test]
    fn percent_and_term_strings() {
        assert_eq!(format_percent(6.0), "6%");
        assert_eq!(format_percent(4.25), "4.25%");
        assert_eq!(format_term(30), "30 Years");
        assert_eq!(format_term(1), "1 Years");
    }
}
