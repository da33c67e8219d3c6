//! # Domain Types
//!
//! Core domain types used throughout ParkRate.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  PricingRule    │   │    Discount     │   │  PriceResult    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  priority       │   │  code (CANON)   │   │  amount_cents   │       │
//! │  │  days_of_week   │   │  discount_type  │   │  rule_applied   │       │
//! │  │  start/end time │   │  amount         │   │  discount_...   │       │
//! │  │  rate_type      │   │  usage limit    │   │                 │       │
//! │  │  amount_cents   │   │  expires_at     │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    RateType     │   │  DiscountType   │                              │
//! │  │  FLAT           │   │  PERCENTAGE     │                              │
//! │  │  HOURLY         │   │  FIXED_AMOUNT   │                              │
//! │  │  DAILY          │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Ownership
//! Rules and discounts are owned by the administrative surface. The engine
//! only ever borrows a snapshot for the duration of one quote and never
//! mutates it. `PriceResult` is built fresh per call and owned by the caller.

use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Rate Type
// =============================================================================

/// How a rule's `amount_cents` scales with the requested duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateType {
    /// One fixed charge regardless of duration.
    Flat,
    /// Charge per hour, fractional hours allowed.
    Hourly,
    /// Charge per started 24-hour day.
    Daily,
}

// =============================================================================
// Pricing Rule
// =============================================================================

/// A configured rate for a property, gated by an optional applicability window.
///
/// ## Applicability Window
/// - `days_of_week`: 0=Sunday..6=Saturday, `None` or empty = every day
/// - `start_time`/`end_time`: local wall-clock times; both or neither.
///   `end_time < start_time` is an overnight window (e.g. 22:00 → 06:00).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingRule {
    pub id: String,

    /// Property this rule belongs to.
    pub property_id: String,

    /// Higher priorities are evaluated first.
    pub priority: i64,

    pub name: Option<String>,

    pub days_of_week: Option<Vec<u8>>,

    #[ts(as = "Option<String>")]
    pub start_time: Option<NaiveTime>,

    #[ts(as = "Option<String>")]
    pub end_time: Option<NaiveTime>,

    pub rate_type: RateType,

    /// Non-negative rate in cents (per hour, per day, or flat).
    pub amount_cents: i64,

    pub is_active: bool,
}

impl PricingRule {
    /// Creates an active, unrestricted rule with priority 0.
    ///
    /// ## Example
    /// ```rust
    /// use parkrate_core::types::{PricingRule, RateType};
    ///
    /// let rule = PricingRule::new("r1", "lot-a", RateType::Flat, 1000)
    ///     .with_priority(10)
    ///     .with_days(vec![1, 2, 3, 4, 5]);
    /// assert_eq!(rule.priority, 10);
    /// ```
    pub fn new(
        id: impl Into<String>,
        property_id: impl Into<String>,
        rate_type: RateType,
        amount_cents: i64,
    ) -> Self {
        PricingRule {
            id: id.into(),
            property_id: property_id.into(),
            priority: 0,
            name: None,
            days_of_week: None,
            start_time: None,
            end_time: None,
            rate_type,
            amount_cents,
            is_active: true,
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_days(mut self, days: Vec<u8>) -> Self {
        self.days_of_week = Some(days);
        self
    }

    /// Sets a local time-of-day window. `end < start` wraps past midnight.
    pub fn with_window(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Returns the rate as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// Day restriction, `None` when the rule applies every day.
    pub fn restricted_days(&self) -> Option<&[u8]> {
        match self.days_of_week.as_deref() {
            Some(days) if !days.is_empty() => Some(days),
            _ => None,
        }
    }

    /// True when exactly one side of the time window is configured.
    ///
    /// Such a rule never matches; the admin surface should correct it.
    pub fn has_partial_window(&self) -> bool {
        self.start_time.is_some() != self.end_time.is_some()
    }
}

/// Maps chrono's weekday to the 0=Sunday..6=Saturday numbering.
pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

// =============================================================================
// Discount Type
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// `amount` is a whole percentage, 0-100.
    Percentage,
    /// `amount` is in cents.
    FixedAmount,
}

// =============================================================================
// Discount
// =============================================================================

/// A redeemable discount code for a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub id: String,
    pub property_id: String,

    /// Canonical form: uppercase `[A-Z0-9]`, at least 3 characters.
    pub code: String,

    pub discount_type: DiscountType,

    /// Percentage (0-100) or cents, depending on `discount_type`.
    pub amount: i64,

    pub usage_limit: Option<i64>,

    /// Redemptions so far. Read-only for the engine.
    pub usage_count: i64,

    #[ts(as = "Option<String>")]
    pub expires_at: Option<DateTime<Utc>>,

    pub is_active: bool,
}

impl Discount {
    /// Creates an active, unlimited, non-expiring discount.
    ///
    /// `code` is stored as given; use
    /// [`normalize_discount_code`](crate::discount::normalize_discount_code)
    /// on user input first.
    pub fn new(
        id: impl Into<String>,
        property_id: impl Into<String>,
        code: impl Into<String>,
        discount_type: DiscountType,
        amount: i64,
    ) -> Self {
        Discount {
            id: id.into(),
            property_id: property_id.into(),
            code: code.into(),
            discount_type,
            amount,
            usage_limit: None,
            usage_count: 0,
            expires_at: None,
            is_active: true,
        }
    }

    pub fn with_usage(mut self, limit: Option<i64>, count: i64) -> Self {
        self.usage_limit = limit;
        self.usage_count = count;
        self
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Usage limit reached (`usage_count >= usage_limit`).
    pub fn is_exhausted(&self) -> bool {
        matches!(self.usage_limit, Some(limit) if self.usage_count >= limit)
    }

    /// Expired strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires_at) if expires_at < now)
    }
}

// =============================================================================
// Price Result
// =============================================================================

/// The authoritative charge for one parking session.
///
/// `rule_applied == None` means the fallback rate was used. That is a normal
/// outcome and must be recorded as such in any audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceResult {
    /// Final charge after discount, never negative.
    pub amount_cents: i64,

    /// Resolved charge before any discount.
    pub base_amount_cents: i64,

    /// Rule that determined the base amount.
    pub rule_applied: Option<PricingRule>,

    pub discount_applied: Option<Discount>,

    /// Amount requested by the discount (may exceed the base amount).
    pub discount_amount_cents: i64,
}

impl PriceResult {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// True when no configured rule matched and the fallback rate applied.
    #[inline]
    pub fn is_fallback(&self) -> bool {
        self.rule_applied.is_none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_weekday_index() {
        assert_eq!(weekday_index(Weekday::Sun), 0);
        assert_eq!(weekday_index(Weekday::Mon), 1);
        assert_eq!(weekday_index(Weekday::Sat), 6);
    }

    #[test]
    fn test_restricted_days() {
        let rule = PricingRule::new("r1", "p1", RateType::Flat, 100);
        assert!(rule.restricted_days().is_none());

        let rule = rule.with_days(vec![]);
        assert!(rule.restricted_days().is_none());

        let rule = rule.with_days(vec![0, 6]);
        assert_eq!(rule.restricted_days(), Some(&[0u8, 6][..]));
    }

    #[test]
    fn test_partial_window() {
        let mut rule = PricingRule::new("r1", "p1", RateType::Flat, 100);
        assert!(!rule.has_partial_window());

        rule.start_time = Some(time(9, 0));
        assert!(rule.has_partial_window());

        let rule = rule.with_window(time(9, 0), time(17, 0));
        assert!(!rule.has_partial_window());
    }

    #[test]
    fn test_discount_exhausted() {
        let d = Discount::new("d1", "p1", "SAVE10", DiscountType::Percentage, 10);
        assert!(!d.is_exhausted());
        assert!(!d.clone().with_usage(Some(5), 4).is_exhausted());
        assert!(d.clone().with_usage(Some(5), 5).is_exhausted());
        assert!(d.with_usage(Some(0), 0).is_exhausted());
    }

    #[test]
    fn test_discount_expiry_is_strict() {
        let expires = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let d = Discount::new("d1", "p1", "SAVE10", DiscountType::Percentage, 10)
            .with_expiry(expires);

        assert!(!d.is_expired_at(expires));
        assert!(d.is_expired_at(expires + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_rule_serializes_camel_case() {
        let rule = PricingRule::new("r1", "p1", RateType::Hourly, 250)
            .with_window(time(22, 0), time(6, 0));
        let json = serde_json::to_value(&rule).unwrap();

        assert_eq!(json["rateType"], "HOURLY");
        assert_eq!(json["amountCents"], 250);
        assert_eq!(json["startTime"], "22:00:00");
        assert_eq!(json["endTime"], "06:00:00");
    }

    #[test]
    fn test_discount_type_serialization() {
        let json = serde_json::to_string(&DiscountType::FixedAmount).unwrap();
        assert_eq!(json, "\"FIXED_AMOUNT\"");
    }
}
