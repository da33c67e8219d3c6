//! # Validation Module
//!
//! Write-side validation for pricing rules and discounts, plus request checks
//! used by the quote orchestrator.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Admin surface creates rule/discount                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_rule / validate_discount  ← THIS MODULE (reject bad config)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Repository insert                                                      │
//! │                                                                         │
//! │  Quote time: the engine NEVER raises on stored config. A malformed      │
//! │  rule that slipped through simply fails to match.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveTime;

use crate::discount::normalize_discount_code;
use crate::error::ValidationError;
use crate::types::{Discount, DiscountType, PricingRule};
use crate::{MAX_DURATION_HOURS, MAX_PERCENTAGE_DISCOUNT, MIN_DISCOUNT_CODE_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Discount Codes
// =============================================================================

/// Normalizes a new discount code and enforces the minimum length.
///
/// ## Returns
/// The canonical code to store.
///
/// ## Example
/// ```rust
/// use parkrate_core::validation::validate_discount_code;
///
/// assert_eq!(validate_discount_code("summer-24").unwrap(), "SUMMER24");
/// assert!(validate_discount_code("a-b").is_err()); // "AB" is too short
/// ```
pub fn validate_discount_code(raw: &str) -> ValidationResult<String> {
    let code = normalize_discount_code(raw);

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() < MIN_DISCOUNT_CODE_LEN {
        return Err(ValidationError::TooShort {
            field: "code".to_string(),
            min: MIN_DISCOUNT_CODE_LEN,
        });
    }

    Ok(code)
}

/// Validates a discount before it is stored.
///
/// ## Rules
/// - Code must already be canonical and at least 3 characters
/// - Percentage amount: 0..=100
/// - Fixed amount: >= 0 cents
/// - Usage limit and count: >= 0
pub fn validate_discount(discount: &Discount) -> ValidationResult<()> {
    let canonical = validate_discount_code(&discount.code)?;
    if canonical != discount.code {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only uppercase letters and digits".to_string(),
        });
    }

    match discount.discount_type {
        DiscountType::Percentage => {
            if !(0..=MAX_PERCENTAGE_DISCOUNT).contains(&discount.amount) {
                return Err(ValidationError::OutOfRange {
                    field: "amount".to_string(),
                    min: 0,
                    max: MAX_PERCENTAGE_DISCOUNT,
                });
            }
        }
        DiscountType::FixedAmount => validate_amount_cents("amount", discount.amount)?,
    }

    if let Some(limit) = discount.usage_limit {
        if limit < 0 {
            return Err(ValidationError::OutOfRange {
                field: "usage_limit".to_string(),
                min: 0,
                max: i64::MAX,
            });
        }
    }

    if discount.usage_count < 0 {
        return Err(ValidationError::OutOfRange {
            field: "usage_count".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Pricing Rules
// =============================================================================

/// Validates a pricing rule before it is stored.
///
/// ## Rules
/// - Amount must be non-negative
/// - Days of week must be 0 (Sunday) ..= 6 (Saturday)
/// - Start and end time must both be set or both be empty
///
/// An end time earlier than the start time is valid: it is an overnight window.
pub fn validate_rule(rule: &PricingRule) -> ValidationResult<()> {
    if rule.property_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "property_id".to_string(),
        });
    }

    validate_amount_cents("amount_cents", rule.amount_cents)?;

    if let Some(days) = &rule.days_of_week {
        if days.iter().any(|d| *d > 6) {
            return Err(ValidationError::OutOfRange {
                field: "days_of_week".to_string(),
                min: 0,
                max: 6,
            });
        }
    }

    if rule.has_partial_window() {
        return Err(ValidationError::Incomplete {
            first: "start_time".to_string(),
            second: "end_time".to_string(),
        });
    }

    Ok(())
}

/// Parses a stored or submitted time-of-day (`HH:MM:SS` or `HH:MM`).
///
/// ## Example
/// ```rust
/// use parkrate_core::validation::parse_time_of_day;
///
/// assert!(parse_time_of_day("start_time", "22:00").is_ok());
/// assert!(parse_time_of_day("start_time", "06:30:15").is_ok());
/// assert!(parse_time_of_day("start_time", "25:00").is_err());
/// ```
pub fn parse_time_of_day(field: &str, value: &str) -> ValidationResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected HH:MM or HH:MM:SS".to_string(),
        })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a non-negative amount in cents.
pub fn validate_amount_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a requested parking duration.
///
/// ## Rules
/// - Must be a finite number
/// - Must be >= 0 (fractional hours are fine for extensions)
/// - Must not exceed [`MAX_DURATION_HOURS`]
pub fn validate_duration_hours(hours: f64) -> ValidationResult<()> {
    if !hours.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "duration_hours".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if !(0.0..=MAX_DURATION_HOURS).contains(&hours) {
        return Err(ValidationError::OutOfRange {
            field: "duration_hours".to_string(),
            min: 0,
            max: MAX_DURATION_HOURS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RateType;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_validate_discount_code() {
        assert_eq!(validate_discount_code("save20").unwrap(), "SAVE20");
        assert_eq!(validate_discount_code("abc").unwrap(), "ABC");

        assert!(matches!(
            validate_discount_code("ab"),
            Err(ValidationError::TooShort { min: 3, .. })
        ));
        assert!(matches!(
            validate_discount_code("!!!"),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_discount_code("a-b"),
            Err(ValidationError::TooShort { .. })
        ));
    }

    #[test]
    fn test_validate_discount() {
        let ok = Discount::new("d1", "p1", "SAVE20", DiscountType::Percentage, 20);
        assert!(validate_discount(&ok).is_ok());

        let mut bad = ok.clone();
        bad.amount = 101;
        assert!(validate_discount(&bad).is_err());

        let mut bad = ok.clone();
        bad.code = "save20".to_string();
        assert!(matches!(
            validate_discount(&bad),
            Err(ValidationError::InvalidFormat { .. })
        ));

        let fixed = Discount::new("d2", "p1", "FIVE", DiscountType::FixedAmount, 500);
        assert!(validate_discount(&fixed).is_ok());
        assert!(validate_discount(&Discount { amount: -1, ..fixed.clone() }).is_err());
        assert!(validate_discount(&fixed.with_usage(Some(-1), 0)).is_err());
    }

    #[test]
    fn test_validate_rule() {
        let rule = PricingRule::new("r1", "p1", RateType::Hourly, 300);
        assert!(validate_rule(&rule).is_ok());

        let overnight = rule.clone().with_window(time(22, 0), time(6, 0));
        assert!(validate_rule(&overnight).is_ok());

        let mut partial = rule.clone();
        partial.end_time = Some(time(6, 0));
        assert!(matches!(
            validate_rule(&partial),
            Err(ValidationError::Incomplete { .. })
        ));

        assert!(validate_rule(&rule.clone().with_days(vec![0, 6])).is_ok());
        assert!(validate_rule(&rule.clone().with_days(vec![7])).is_err());

        assert!(validate_rule(&PricingRule::new("r2", "p1", RateType::Flat, -5)).is_err());
        assert!(validate_rule(&PricingRule::new("r3", " ", RateType::Flat, 5)).is_err());
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("t", "22:00").unwrap(), time(22, 0));
        assert_eq!(parse_time_of_day("t", "06:00:00").unwrap(), time(6, 0));
        assert!(parse_time_of_day("t", "6pm").is_err());
        assert!(parse_time_of_day("t", "").is_err());
    }

    #[test]
    fn test_validate_duration_hours() {
        assert!(validate_duration_hours(0.0).is_ok());
        assert!(validate_duration_hours(2.5).is_ok());
        assert!(validate_duration_hours(-0.5).is_err());
        assert!(validate_duration_hours(f64::NAN).is_err());
        assert!(validate_duration_hours(f64::INFINITY).is_err());
        assert!(validate_duration_hours(MAX_DURATION_HOURS).is_ok());
        assert!(matches!(
            validate_duration_hours(1e18),
            Err(ValidationError::OutOfRange { max: 87_600, .. })
        ));
    }
}
