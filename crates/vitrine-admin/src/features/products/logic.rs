//! Parsing and formatting for the product editor.
//!
//! Prices are integer minor units end to end; the decimal string only exists
//! at the form boundary.

use chrono::DateTime;

/// Parse a user-entered decimal price into minor units.
///
/// Accepts `"50"`, `"50.5"`, and `"50.00"`. More than two fraction digits,
/// signs, or anything non-numeric is rejected.
pub fn parse_price_minor(input: &str) -> Result<i64, String> {
    let input = input.trim();
    let (whole, fraction) = match input.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (input, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err("Enter a price.".to_string());
    }
    if fraction.len() > 2 {
        return Err("Prices have at most two decimal places.".to_string());
    }
    let digits_ok =
        whole.chars().all(|c| c.is_ascii_digit()) && fraction.chars().all(|c| c.is_ascii_digit());
    if !digits_ok {
        return Err("Enter a valid price, e.g. 50.00.".to_string());
    }
    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| "Enter a valid price, e.g. 50.00.".to_string())?
    };
    let cents: i64 = match fraction.len() {
        0 => 0,
        1 => {
            fraction
                .parse::<i64>()
                .map_err(|_| "Enter a valid price, e.g. 50.00.".to_string())?
                * 10
        }
        _ => fraction
            .parse()
            .map_err(|_| "Enter a valid price, e.g. 50.00.".to_string())?,
    };
    whole
        .checked_mul(100)
        .and_then(|minor| minor.checked_add(cents))
        .ok_or_else(|| "That price is too large.".to_string())
}

/// Parse a user-entered stock quantity.
pub fn parse_quantity(input: &str) -> Result<u32, String> {
    input
        .trim()
        .parse()
        .map_err(|_| "Enter a whole number of items in stock.".to_string())
}

/// Render minor units as a display price, `5000` to `"$50.00"`.
#[must_use]
pub fn price_label(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let minor = minor.unsigned_abs();
    format!("{sign}${}.{:02}", minor / 100, minor % 100)
}

/// Render a server RFC 3339 timestamp as a short date, or echo the raw
/// string when it does not parse.
#[must_use]
pub fn format_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map_or_else(|_| raw.to_string(), |ts| ts.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::{format_date, parse_price_minor, parse_quantity, price_label};

    #[test]
    fn prices_parse_to_minor_units() {
        assert_eq!(parse_price_minor("50"), Ok(5_000));
        assert_eq!(parse_price_minor("50.5"), Ok(5_050));
        assert_eq!(parse_price_minor("50.00"), Ok(5_000));
        assert_eq!(parse_price_minor(" 0.99 "), Ok(99));
        assert_eq!(parse_price_minor(".50"), Ok(50));
    }

    #[test]
    fn malformed_prices_are_rejected() {
        assert!(parse_price_minor("").is_err());
        assert!(parse_price_minor(".").is_err());
        assert!(parse_price_minor("-5").is_err());
        assert!(parse_price_minor("50.005").is_err());
        assert!(parse_price_minor("fifty").is_err());
        assert!(parse_price_minor("5,00").is_err());
    }

    #[test]
    fn quantities_are_whole_and_non_negative() {
        assert_eq!(parse_quantity("12"), Ok(12));
        assert_eq!(parse_quantity(" 0 "), Ok(0));
        assert!(parse_quantity("-1").is_err());
        assert!(parse_quantity("1.5").is_err());
        assert!(parse_quantity("").is_err());
    }

    #[test]
    fn minor_units_render_as_dollars() {
        assert_eq!(price_label(5_000), "$50.00");
        assert_eq!(price_label(99), "$0.99");
        assert_eq!(price_label(5), "$0.05");
    }

    #[test]
    fn timestamps_render_short_or_verbatim() {
        assert_eq!(format_date("2026-08-25T10:30:00Z"), "2026-08-25");
        assert_eq!(format_date("not-a-date"), "not-a-date");
    }
}
