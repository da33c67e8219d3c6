//! # Repository Traits
//!
//! The seams between the pure engine and whatever stores rules and discounts.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PricingService (core)                                                  │
//! │       │ get_active_rules(property)      │ find_active(property, CODE)   │
//! │       ▼                                 ▼                               │
//! │  RuleRepository                    DiscountRepository                   │
//! │       │                                 │                               │
//! │       └──── parkrate-db (SQLite) ───────┘   or in-memory test doubles   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations own timeouts and retries. The engine calls each
//! repository at most once per quote and performs no retry itself.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::types::{Discount, PricingRule};

/// Rules and timezone for one property, as returned by a repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    /// Active rules, ordered by priority descending.
    pub rules: Vec<PricingRule>,
    /// IANA zone name of the property, if configured.
    pub timezone: Option<String>,
}

/// Source of pricing rules.
pub trait RuleRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Active rules for `property_id` plus the property's timezone.
    ///
    /// An unknown property yields an empty rule set, which prices at the
    /// fallback rate.
    fn get_active_rules(
        &self,
        property_id: &str,
    ) -> impl Future<Output = Result<RuleSet, Self::Error>> + Send;
}

/// Source of discounts.
pub trait DiscountRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Active discount with the given canonical `code`, if any.
    fn find_active(
        &self,
        property_id: &str,
        code: &str,
    ) -> impl Future<Output = Result<Option<Discount>, Self::Error>> + Send;
}

// =============================================================================
// Clock
// =============================================================================

/// Provides "now" for discount expiry checks.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant, for deterministic quotes and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
