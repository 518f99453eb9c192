//! Input parsing and validation shared by the category, transaction and budget services.
//!
//! One policy applies everywhere: amounts must be strictly positive with at most
//! two decimal places, descriptions must be non-empty after trimming, dates are
//! ISO `YYYY-MM-DD`. Nothing is silently coerced.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

use crate::error::{Result, TrackerError};

pub const MAX_DESCRIPTION_LENGTH: usize = 256;
pub const MAX_CATEGORY_NAME_LENGTH: usize = 64;
pub const MAX_AMOUNT_SCALE: u32 = 2;

/// Largest single amount accepted: one trillion
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Parse a user-entered money amount such as `"12.50"`
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::validation("Amount is required"));
    }

    let amount = Decimal::from_str(trimmed)
        .map_err(|_| TrackerError::validation(format!("Invalid amount: '{}'", trimmed)))?;

    if amount <= Decimal::ZERO {
        return Err(TrackerError::validation("Amount must be greater than zero"));
    }
    if amount > MAX_AMOUNT {
        return Err(TrackerError::validation(format!(
            "Amount cannot exceed {}",
            MAX_AMOUNT
        )));
    }

    let amount = amount.normalize();
    if amount.scale() > MAX_AMOUNT_SCALE {
        return Err(TrackerError::validation(format!(
            "Amount cannot have more than {} decimal places",
            MAX_AMOUNT_SCALE
        )));
    }

    Ok(amount)
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| TrackerError::validation(format!("Invalid date: '{}' (expected YYYY-MM-DD)", trimmed)))
}

/// Parse an optional date filter where an empty string means "no constraint"
pub fn parse_optional_date(input: Option<&str>) -> Result<Option<NaiveDate>> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(value).map(Some),
    }
}

pub fn validate_description(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::validation("Description cannot be empty"));
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(TrackerError::validation(format!(
            "Description cannot exceed {} characters",
            MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_category_name(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::validation("Category name cannot be empty"));
    }
    if trimmed.chars().count() > MAX_CATEGORY_NAME_LENGTH {
        return Err(TrackerError::validation(format!(
            "Category name cannot exceed {} characters",
            MAX_CATEGORY_NAME_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

/// Accepts `#rrggbb` (any case) and returns it lowercased
pub fn validate_color(input: &str) -> Result<String> {
    let trimmed = input.trim();
    let valid = trimmed.len() == 7
        && trimmed.starts_with('#')
        && trimmed[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(TrackerError::validation(format!(
            "Invalid color: '{}' (expected #rrggbb)",
            trimmed
        )));
    }
    Ok(trimmed.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_amount_accepts_plain_decimals() {
        assert_eq!(parse_amount("12.50").unwrap(), dec!(12.5));
        assert_eq!(parse_amount(" 7 ").unwrap(), dec!(7));
        assert_eq!(parse_amount("0.01").unwrap(), dec!(0.01));
        assert_eq!(parse_amount("3.500").unwrap(), dec!(3.5));
    }

    #[test]
    fn test_parse_amount_rejects_bad_input() {
        assert!(matches!(parse_amount(""), Err(TrackerError::Validation(_))));
        assert!(matches!(parse_amount("abc"), Err(TrackerError::Validation(_))));
        assert!(matches!(parse_amount("0"), Err(TrackerError::Validation(_))));
        assert!(matches!(parse_amount("-5.00"), Err(TrackerError::Validation(_))));
        assert!(matches!(parse_amount("1.234"), Err(TrackerError::Validation(_))));
    }

    #[test]
    fn test_parse_amount_upper_bound() {
        assert_eq!(parse_amount("1000000000000").unwrap(), MAX_AMOUNT);
        assert!(matches!(parse_amount("1000000000000.01"), Err(TrackerError::Validation(_))));
        assert!(matches!(
            parse_amount("79228162514264337593543950335"),
            Err(TrackerError::Validation(_))
        ));
        // Beyond what a Decimal can hold at all
        assert!(matches!(
            parse_amount("792281625142643375935439503350"),
            Err(TrackerError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert!(parse_date("15/01/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_parse_optional_date_treats_empty_as_absent() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_date(Some("")).unwrap(), None);
        assert_eq!(parse_optional_date(Some("  ")).unwrap(), None);
        assert!(parse_optional_date(Some("2024-01-01")).unwrap().is_some());
        assert!(parse_optional_date(Some("yesterday")).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert_eq!(validate_description("  Coffee  ").unwrap(), "Coffee");
        assert!(validate_description("   ").is_err());
        assert!(validate_description(&"x".repeat(MAX_DESCRIPTION_LENGTH + 1)).is_err());
        assert!(validate_description(&"x".repeat(MAX_DESCRIPTION_LENGTH)).is_ok());
    }

    #[test]
    fn test_validate_color() {
        assert_eq!(validate_color("#3498DB").unwrap(), "#3498db");
        assert!(validate_color("3498db").is_err());
        assert!(validate_color("#3498d").is_err());
        assert!(validate_color("#zzzzzz").is_err());
    }
}
