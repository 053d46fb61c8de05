//! Custom Askama template filters.

use std::fmt::Display;

/// Format a decimal amount as a dollar price string.
///
/// Usage in templates: `{{ item.price|currency }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn currency(amount: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("${amount:.2}"))
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    #[test]
    fn test_currency_two_decimal_places() {
        let price: Decimal = "18.5".parse().unwrap();
        assert_eq!(format!("${price:.2}"), "$18.50");

        let price: Decimal = "55.5".parse().unwrap();
        assert_eq!(format!("${price:.2}"), "$55.50");
    }
}
