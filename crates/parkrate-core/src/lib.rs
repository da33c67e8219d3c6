//! # parkrate-core: Pure Pricing Engine for ParkRate
//!
//! This crate is the **heart** of ParkRate. Given a property's pricing rules,
//! a start instant, a duration and an optional discount code, it computes the
//! authoritative charge for a parking session in integer cents.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ParkRate Quote Flow                              │
//! │                                                                         │
//! │  Checkout / Extension flow (caller)                                    │
//! │       │  QuoteRequest { property, start, hours, code }                  │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             ★ parkrate-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  PricingService ──► RuleRepository::get_active_rules            │   │
//! │  │       │                                                         │   │
//! │  │       ▼                                                         │   │
//! │  │  PriceResolver ──► is_applicable (×N) ──► amount_for_duration   │   │
//! │  │       │              └── daily/hourly optimization rescan       │   │
//! │  │       ▼                                                         │   │
//! │  │  DiscountRepository::find_active ──► apply_discount             │   │
//! │  │       │                                                         │   │
//! │  │       ▼                                                         │   │
//! │  │  PriceResult                                                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          parkrate-db (SQLite repositories, redeem)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (PricingRule, Discount, PriceResult)
//! - [`money`] - Money type with integer arithmetic (no float accumulation!)
//! - [`pricing`] - Rule applicability, rule amounts, price resolution
//! - [`discount`] - Discount eligibility, application and code normalization
//! - [`service`] - Quote orchestration over the repository traits
//! - [`repository`] - Repository and clock traits implemented by callers
//! - [`validation`] - Write-side validation shared with the admin surface
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use parkrate_core::pricing::PriceResolver;
//! use parkrate_core::types::{PricingRule, RateType};
//!
//! let rule = PricingRule::new("r1", "lot-a", RateType::Hourly, 500);
//! let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
//!
//! let rules = [rule];
//! let resolved = PriceResolver::resolve(&rules, start, 3.0, chrono_tz::UTC);
//! assert_eq!(resolved.amount.cents(), 1500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod error;
pub mod money;
pub mod pricing;
pub mod repository;
pub mod service;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use discount::{apply_discount, normalize_discount_code, AppliedDiscount, DiscountEligibility};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{amount_for_duration, is_applicable, resolve_timezone, PriceResolver, ResolvedPrice};
pub use repository::{Clock, DiscountRepository, FixedClock, RuleRepository, RuleSet, SystemClock};
pub use service::{PricingService, QuoteRequest};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Hourly rate charged when no configured rule matches ($5.00/hour).
///
/// Checkout must never block on missing configuration, so the resolver falls
/// back to this rate instead of failing.
pub const FALLBACK_HOURLY_RATE_CENTS: i64 = 500;

/// Minimum length of a discount code after normalization.
pub const MIN_DISCOUNT_CODE_LEN: usize = 3;

/// Upper bound for a percentage discount amount.
pub const MAX_PERCENTAGE_DISCOUNT: i64 = 100;

/// Hours in one daily billing unit.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Longest session a quote accepts (ten years of 365 days).
pub const MAX_DURATION_HOURS: f64 = 87_600.0;
