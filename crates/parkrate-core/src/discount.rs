//! # Discounts
//!
//! Eligibility checks, application to a resolved base amount, and the code
//! normalization shared by the write side and the lookup side.
//!
//! ## Application Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  discount?  ── None ──────────────────────────┐                         │
//! │     │                                         │                         │
//! │     ▼                                         │                         │
//! │  is_active? ── no ──► Inactive ───────────────┤                         │
//! │  expires_at < now? ── yes ──► Expired ────────┤  pass through:          │
//! │  usage_count >= limit? ── yes ──► Exhausted ──┤  final = base           │
//! │     │                                         │  discount = 0           │
//! │     ▼ Eligible                                │                         │
//! │  PERCENTAGE: round(base × pct / 100)          │                         │
//! │  FIXED_AMOUNT: amount                         │                         │
//! │     │                                         │                         │
//! │     ▼                                         ▼                         │
//! │  final = max(0, base − discount)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of the skip reasons are errors. The engine never touches
//! `usage_count`; redeeming is the caller's job, after pricing.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::money::Money;
use crate::types::{Discount, DiscountType};

/// Why a discount would or would not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountEligibility {
    Eligible,
    Inactive,
    Expired,
    Exhausted,
}

impl DiscountEligibility {
    /// Checks `discount` against `now`, in the order inactive → expired → exhausted.
    pub fn of(discount: &Discount, now: DateTime<Utc>) -> Self {
        if !discount.is_active {
            DiscountEligibility::Inactive
        } else if discount.is_expired_at(now) {
            DiscountEligibility::Expired
        } else if discount.is_exhausted() {
            DiscountEligibility::Exhausted
        } else {
            DiscountEligibility::Eligible
        }
    }
}

/// Result of running a (possibly absent) discount over a base amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedDiscount<'a> {
    pub final_amount: Money,
    /// `None` when no discount was applied.
    pub discount: Option<&'a Discount>,
    /// Requested discount, which may exceed the base amount.
    pub discount_amount: Money,
}

impl<'a> AppliedDiscount<'a> {
    fn pass_through(base: Money) -> Self {
        AppliedDiscount {
            final_amount: base,
            discount: None,
            discount_amount: Money::zero(),
        }
    }
}

/// Applies `discount` to `base`, evaluating expiry against `now`.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use parkrate_core::discount::apply_discount;
/// use parkrate_core::money::Money;
/// use parkrate_core::types::{Discount, DiscountType};
///
/// let d = Discount::new("d1", "lot-a", "SAVE20", DiscountType::Percentage, 20);
/// let applied = apply_discount(Some(&d), Money::from_cents(1000), Utc::now());
/// assert_eq!(applied.final_amount.cents(), 800);
/// assert_eq!(applied.discount_amount.cents(), 200);
/// ```
pub fn apply_discount(
    discount: Option<&Discount>,
    base: Money,
    now: DateTime<Utc>,
) -> AppliedDiscount<'_> {
    let Some(discount) = discount else {
        return AppliedDiscount::pass_through(base);
    };

    let eligibility = DiscountEligibility::of(discount, now);
    if eligibility != DiscountEligibility::Eligible {
        debug!(discount_id = %discount.id, ?eligibility, "Discount not applied");
        return AppliedDiscount::pass_through(base);
    }

    let discount_amount = match discount.discount_type {
        DiscountType::Percentage => base.percentage(discount.amount),
        DiscountType::FixedAmount => Money::from_cents(discount.amount),
    };

    AppliedDiscount {
        final_amount: base.saturating_sub_floor_zero(discount_amount),
        discount: Some(discount),
        discount_amount,
    }
}

/// Canonicalizes a discount code: uppercase, keep only `[A-Z0-9]`.
///
/// Used both when a code is created and when a customer types one in, so
/// `" save-20 "` and `"SAVE20"` find the same discount. Length is not checked
/// here; see [`validate_discount_code`](crate::validation::validate_discount_code).
///
/// ## Example
/// ```rust
/// use parkrate_core::discount::normalize_discount_code;
///
/// assert_eq!(normalize_discount_code(" save-20 "), "SAVE20");
/// assert_eq!(normalize_discount_code("summer_sale!"), "SUMMERSALE");
/// ```
pub fn normalize_discount_code(raw: &str) -> String {
    raw.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
