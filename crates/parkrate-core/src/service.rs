//! # Quote Service
//!
//! Runs the full caller flow around the pure engine: fetch, resolve,
//! discount, assemble.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Driver picks "3 hours" at Lot A, enters code " save-20 "               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PricingService::quote  ← THIS MODULE                                   │
//! │       ├── validate duration                                             │
//! │       ├── rules.get_active_rules("lot-a")  → rules + "America/Chicago"  │
//! │       ├── PriceResolver::resolve           → 1500¢ via "Daytime"        │
//! │       ├── normalize code                   → "SAVE20"                   │
//! │       ├── discounts.find_active("lot-a", "SAVE20")                      │
//! │       └── apply_discount(…, clock.now())   → 1200¢                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PriceResult { amount 1200, base 1500, rule, discount, 300 }            │
//! │                                                                         │
//! │  Redeeming the code (usage_count + 1) is up to the caller, afterwards.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::discount::{apply_discount, normalize_discount_code};
use crate::error::{CoreError, CoreResult};
use crate::pricing::{resolve_timezone, PriceResolver};
use crate::repository::{Clock, DiscountRepository, RuleRepository, SystemClock};
use crate::types::PriceResult;
use crate::validation::validate_duration_hours;

/// What the checkout or extension flow asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub property_id: String,
    pub start: DateTime<Utc>,
    /// Fractional hours are allowed (extensions).
    pub duration_hours: f64,
    /// Raw code as typed by the customer.
    pub discount_code: Option<String>,
}

impl QuoteRequest {
    pub fn new(property_id: impl Into<String>, start: DateTime<Utc>, duration_hours: f64) -> Self {
        QuoteRequest {
            property_id: property_id.into(),
            start,
            duration_hours,
            discount_code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.discount_code = Some(code.into());
        self
    }
}

/// Quote orchestrator over the repository traits.
///
/// Holds no mutable state; a single instance can serve concurrent quotes.
#[derive(Debug, Clone)]
pub struct PricingService<R, D, C = SystemClock> {
    rules: R,
    discounts: D,
    clock: C,
}

impl<R, D> PricingService<R, D, SystemClock>
where
    R: RuleRepository,
    D: DiscountRepository,
{
    pub fn new(rules: R, discounts: D) -> Self {
        PricingService {
            rules,
            discounts,
            clock: SystemClock,
        }
    }
}

impl<R, D, C> PricingService<R, D, C>
where
    R: RuleRepository,
    D: DiscountRepository,
    C: Clock,
{
    /// Replaces the clock used for discount expiry.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> PricingService<R, D, C2> {
        PricingService {
            rules: self.rules,
            discounts: self.discounts,
            clock,
        }
    }

    /// Prices one parking session.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidDuration`] for negative, non-finite or excessive hours
    /// - [`CoreError::Repository`] when a fetch fails
    ///
    /// A missing rule or discount is never an error.
    pub async fn quote(&self, request: &QuoteRequest) -> CoreResult<PriceResult> {
        if validate_duration_hours(request.duration_hours).is_err() {
            return Err(CoreError::InvalidDuration {
                hours: request.duration_hours,
            });
        }

        let rule_set = self
            .rules
            .get_active_rules(&request.property_id)
            .await
            .map_err(CoreError::repository)?;
        let tz = resolve_timezone(rule_set.timezone.as_deref());

        let resolved = PriceResolver::resolve(
            &rule_set.rules,
            request.start,
            request.duration_hours,
            tz,
        );

        let code = request
            .discount_code
            .as_deref()
            .map(normalize_discount_code)
            .filter(|code| !code.is_empty());

        let discount = match code {
            Some(code) => {
                let found = self
                    .discounts
                    .find_active(&request.property_id, &code)
                    .await
                    .map_err(CoreError::repository)?;
                if found.is_none() {
                    debug!(property_id = %request.property_id, code = %code, "Discount code not found");
                }
                found
            }
            None => None,
        };

        let applied = apply_discount(discount.as_ref(), resolved.amount, self.clock.now());

        let result = PriceResult {
            amount_cents: applied.final_amount.cents(),
            base_amount_cents: resolved.amount.cents(),
            rule_applied: resolved.rule.cloned(),
            discount_applied: applied.discount.cloned(),
            discount_amount_cents: applied.discount_amount.cents(),
        };

        info!(
            property_id = %request.property_id,
            amount_cents = result.amount_cents,
            rule_id = result.rule_applied.as_ref().map(|r| r.id.as_str()).unwrap_or("fallback"),
            discount_id = result.discount_applied.as_ref().map(|d| d.id.as_str()).unwrap_or("none"),
            "Quote computed"
        );

        Ok(result)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
