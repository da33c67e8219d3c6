//! # Rule Amounts
//!
//! Nominal charge of a single rule for a requested duration.
//!
//! ```text
//! FLAT    amount                          (duration ignored)
//! HOURLY  round(amount × hours)           (ties away from zero)
//! DAILY   amount × ceil(hours / 24)       (partial day = full day)
//! ```

use crate::money::Money;
use crate::types::{PricingRule, RateType};
use crate::HOURS_PER_DAY;

/// Computes `rule`'s charge for `duration_hours`.
///
/// ## Example
/// ```rust
/// use parkrate_core::pricing::amount_for_duration;
/// use parkrate_core::types::{PricingRule, RateType};
///
/// let daily = PricingRule::new("d", "lot-a", RateType::Daily, 2000);
/// assert_eq!(amount_for_duration(&daily, 25.0).cents(), 4000);
/// ```
pub fn amount_for_duration(rule: &PricingRule, duration_hours: f64) -> Money {
    match rule.rate_type {
        RateType::Flat => rule.amount(),
        RateType::Hourly => rule.amount().multiply_hours(duration_hours),
        RateType::Daily => rule.amount().multiply_days(billable_days(duration_hours)),
    }
}

/// Number of started 24-hour days.
fn billable_days(duration_hours: f64) -> i64 {
    (duration_hours / HOURS_PER_DAY).ceil() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(rate_type: RateType, cents: i64) -> PricingRule {
        PricingRule::new("r1", "p1", rate_type, cents)
    }

    #[test]
    fn test_flat_ignores_duration() {
        let flat = rule(RateType::Flat, 1000);
        assert_eq!(amount_for_duration(&flat, 0.5).cents(), 1000);
        assert_eq!(amount_for_duration(&flat, 3.0).cents(), 1000);
        assert_eq!(amount_for_duration(&flat, 72.0).cents(), 1000);
    }

    #[test]
    fn test_hourly() {
        let hourly = rule(RateType::Hourly, 500);
        assert_eq!(amount_for_duration(&hourly, 3.0).cents(), 1500);
        assert_eq!(amount_for_duration(&hourly, 1.25).cents(), 625);
    }

    #[test]
    fn test_hourly_rounds_fractional_extension() {
        // 333 × 0.5 = 166.5 → 167
        let hourly = rule(RateType::Hourly, 333);
        assert_eq!(amount_for_duration(&hourly, 0.5).cents(), 167);
    }

    #[test]
    fn test_daily_charges_started_days() {
        let daily = rule(RateType::Daily, 2000);
        assert_eq!(amount_for_duration(&daily, 2.0).cents(), 2000);
        assert_eq!(amount_for_duration(&daily, 24.0).cents(), 2000);
        assert_eq!(amount_for_duration(&daily, 24.5).cents(), 4000);
        assert_eq!(amount_for_duration(&daily, 72.0).cents(), 6000);
    }

    #[test]
    fn test_zero_duration() {
        assert_eq!(amount_for_duration(&rule(RateType::Hourly, 500), 0.0).cents(), 0);
        assert_eq!(amount_for_duration(&rule(RateType::Daily, 2000), 0.0).cents(), 0);
    }

    #[test]
    fn test_huge_duration_saturates_instead_of_wrapping() {
        let daily = amount_for_duration(&rule(RateType::Daily, 2000), 1e18);
        assert_eq!(daily.cents(), i64::MAX);

        let hourly = amount_for_duration(&rule(RateType::Hourly, 500), 1e18);
        assert_eq!(hourly.cents(), i64::MAX);
        assert_eq!(amount_for_duration(&rule(RateType::Flat, 700), 0.0).cents(), 700);
    }
}
