//! # Money Module
//!
//! Provides the `Money` type for handling parking charges safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing float charges drifts:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + explicit rounding points                 │
//! │    • Hourly rate × fractional hours → ONE multiplication, ONE round     │
//! │    • Percentage discounts → pure integer math, round half away          │
//! │    • Nothing is ever accumulated in floating point                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use parkrate_core::money::Money;
//!
//! let rate = Money::from_cents(500); // $5.00/hour
//! assert_eq!(rate.multiply_hours(2.5).cents(), 1250);
//! assert_eq!(rate.percentage(20).cents(), 100);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate differences may go negative before the
///   discount floor is applied
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Single currency**: multi-currency is out of scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a per-hour amount by a (possibly fractional) number of hours.
    ///
    /// ## Rounding
    /// Exactly one floating-point multiplication followed by one explicit
    /// round to the nearest cent, ties away from zero (`f64::round`). Results
    /// beyond the i64 range saturate.
    ///
    /// ```text
    /// 500¢/h × 3.0h   = 1500.0  → 1500
    /// 333¢/h × 1.5h   =  499.5  →  500   (tie → away from zero)
    /// 200¢/h × 0.25h  =   50.0  →   50
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use parkrate_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(333).multiply_hours(1.5).cents(), 500);
    /// ```
    pub fn multiply_hours(&self, hours: f64) -> Money {
        Money::from_cents((self.0 as f64 * hours).round() as i64)
    }

    /// Multiplies a per-day amount by a whole number of billable days.
    ///
    /// Saturates at the i64 bounds instead of wrapping.
    #[inline]
    pub const fn multiply_days(&self, days: i64) -> Self {
        Money(self.0.saturating_mul(days))
    }

    /// Returns `pct` percent of this amount, rounded to the nearest cent.
    ///
    /// ## Implementation
    /// Integer math in i128 to avoid overflow:
    /// `(amount × pct ± 50) / 100`, the sign of the bias following the sign of
    /// the product so that ties round away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use parkrate_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1000).percentage(20).cents(), 200);
    /// assert_eq!(Money::from_cents(1005).percentage(10).cents(), 101); // 100.5 → 101
    /// ```
    pub fn percentage(&self, pct: i64) -> Money {
        let product = self.0 as i128 * pct as i128;
        let rounded = if product >= 0 {
            (product + 50) / 100
        } else {
            (product - 50) / 100
        };
        Money::from_cents(rounded as i64)
    }

    /// Subtracts `other`, flooring the result at zero.
    ///
    /// A discount can never turn a charge into a payout.
    #[inline]
    pub fn saturating_sub_floor_zero(&self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).max(0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money in a human-readable format (debugging and CLI only).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_multiply_hours_whole_and_fractional() {
        let rate = Money::from_cents(500);
        assert_eq!(rate.multiply_hours(3.0).cents(), 1500);
        assert_eq!(rate.multiply_hours(0.5).cents(), 250);
        assert_eq!(rate.multiply_hours(0.0).cents(), 0);
    }

    #[test]
    fn test_multiply_hours_ties_round_away_from_zero() {
        // 333 × 1.5 = 499.5
        assert_eq!(Money::from_cents(333).multiply_hours(1.5).cents(), 500);
        // 101 × 0.5 = 50.5
        assert_eq!(Money::from_cents(101).multiply_hours(0.5).cents(), 51);
    }

    #[test]
    fn test_multiply_days() {
        assert_eq!(Money::from_cents(2000).multiply_days(2).cents(), 4000);
        assert_eq!(Money::from_cents(2000).multiply_days(0).cents(), 0);
    }

    #[test]
    fn test_multiply_days_saturates() {
        assert_eq!(Money::from_cents(2000).multiply_days(i64::MAX).cents(), i64::MAX);
    }

    #[test]
    fn test_multiply_hours_saturates() {
        assert_eq!(Money::from_cents(500).multiply_hours(1e30).cents(), i64::MAX);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(Money::from_cents(1000).percentage(20).cents(), 200);
        assert_eq!(Money::from_cents(1000).percentage(100).cents(), 1000);
        assert_eq!(Money::from_cents(1000).percentage(0).cents(), 0);
        // 1005 × 10% = 100.5 → 101
        assert_eq!(Money::from_cents(1005).percentage(10).cents(), 101);
        // 999 × 33% = 329.67 → 330
        assert_eq!(Money::from_cents(999).percentage(33).cents(), 330);
    }

    #[test]
    fn test_percentage_negative_rounds_away_from_zero() {
        assert_eq!(Money::from_cents(-1005).percentage(10).cents(), -101);
    }

    #[test]
    fn test_saturating_sub_floor_zero() {
        let base = Money::from_cents(300);
        assert_eq!(base.saturating_sub_floor_zero(Money::from_cents(500)).cents(), 0);
        assert_eq!(base.saturating_sub_floor_zero(Money::from_cents(100)).cents(), 200);
        assert_eq!(
            Money::from_cents(i64::MIN).saturating_sub_floor_zero(Money::from_cents(1)).cents(),
            0
        );
    }
}
