//! # Price Resolver
//!
//! Priority scan plus the daily/hourly optimization pass.
//!
//! ## Selection Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Order active rules by priority DESC (stable for equal priorities)   │
//! │  2. First applicable rule wins ─────────── none? → fallback 500¢/hour   │
//! │  3. base = amount_for_duration(matched)                                 │
//! │  4. matched is DAILY:                                                   │
//! │       take the FIRST applicable HOURLY rule among the others            │
//! │       if its amount < base → it becomes the applied rule                │
//! │  5. return { amount, rule }                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Step 4 deliberately looks at a single candidate. It is not a search for
//! the minimum over all hourly rules.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::money::Money;
use crate::pricing::amount::amount_for_duration;
use crate::pricing::applicability::is_applicable;
use crate::types::{PricingRule, RateType};
use crate::FALLBACK_HOURLY_RATE_CENTS;

/// Outcome of rule resolution, before any discount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPrice<'a> {
    pub amount: Money,
    /// `None` when the fallback rate applied.
    pub rule: Option<&'a PricingRule>,
}

/// Stateless rule-selection engine.
pub struct PriceResolver;

impl PriceResolver {
    /// Resolves the base charge for a session starting at `instant`.
    ///
    /// `rules` may arrive in any order; the resolver sorts a borrowed view and
    /// never mutates the snapshot.
    pub fn resolve(
        rules: &[PricingRule],
        instant: DateTime<Utc>,
        duration_hours: f64,
        tz: Tz,
    ) -> ResolvedPrice<'_> {
        let mut ordered: Vec<&PricingRule> = rules.iter().filter(|r| r.is_active).collect();
        // sort_by_key is stable: equal priorities keep their given order
        ordered.sort_by_key(|r| Reverse(r.priority));

        let Some(matched_idx) = ordered
            .iter()
            .position(|rule| is_applicable(rule, instant, tz))
        else {
            let amount = Money::from_cents(FALLBACK_HOURLY_RATE_CENTS).multiply_hours(duration_hours);
            debug!(%instant, duration_hours, amount = amount.cents(), "No rule matched, using fallback rate");
            return ResolvedPrice { amount, rule: None };
        };

        let matched = ordered[matched_idx];
        let base = amount_for_duration(matched, duration_hours);
        debug!(rule_id = %matched.id, amount = base.cents(), "Matched pricing rule");

        if matched.rate_type == RateType::Daily {
            let candidate = ordered
                .iter()
                .enumerate()
                .filter(|(idx, _)| *idx != matched_idx)
                .map(|(_, rule)| *rule)
                .find(|rule| rule.rate_type == RateType::Hourly && is_applicable(rule, instant, tz));

            if let Some(hourly) = candidate {
                let hourly_amount = amount_for_duration(hourly, duration_hours);
                if hourly_amount < base {
                    debug!(
                        daily_rule = %matched.id,
                        hourly_rule = %hourly.id,
                        daily = base.cents(),
                        hourly = hourly_amount.cents(),
                        "Hourly rate undercuts daily rate"
                    );
                    return ResolvedPrice {
                        amount: hourly_amount,
                        rule: Some(hourly),
                    };
                }
            }
        }

        ResolvedPrice {
            amount: base,
            rule: Some(matched),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn resolve(rules: &[PricingRule], hours: f64) -> ResolvedPrice<'_> {
        PriceResolver::resolve(rules, noon(), hours, chrono_tz::UTC)
    }

    #[test]
    fn test_single_flat_rule() {
        let rules = vec![PricingRule::new("flat", "p1", RateType::Flat, 1000)];
        for hours in [0.5, 1.0, 3.0, 48.0] {
            let resolved = resolve(&rules, hours);
            assert_eq!(resolved.amount.cents(), 1000);
            assert_eq!(resolved.rule.map(|r| r.id.as_str()), Some("flat"));
        }
    }

    #[test]
    fn test_single_hourly_rule() {
        let rules = vec![PricingRule::new("hourly", "p1", RateType::Hourly, 500)];
        assert_eq!(resolve(&rules, 3.0).amount.cents(), 1500);
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        let resolved = resolve(&[], 3.0);
        assert_eq!(resolved.amount.cents(), 1500);
        assert!(resolved.rule.is_none());

        let night_only = vec![PricingRule::new("night", "p1", RateType::Flat, 800)
            .with_window(time(22, 0), time(6, 0))];
        let resolved = resolve(&night_only, 1.5);
        assert_eq!(resolved.amount.cents(), 750);
        assert!(resolved.rule.is_none());
    }

    #[test]
    fn test_highest_priority_wins_regardless_of_input_order() {
        let rules = vec![
            PricingRule::new("low", "p1", RateType::Flat, 100).with_priority(1),
            PricingRule::new("high", "p1", RateType::Flat, 900).with_priority(10),
            PricingRule::new("mid", "p1", RateType::Flat, 500).with_priority(5),
        ];
        let resolved = resolve(&rules, 1.0);
        assert_eq!(resolved.rule.map(|r| r.id.as_str()), Some("high"));
        assert_eq!(resolved.amount.cents(), 900);
    }

    #[test]
    fn test_equal_priorities_keep_input_order() {
        let rules = vec![
            PricingRule::new("first", "p1", RateType::Flat, 300).with_priority(5),
            PricingRule::new("second", "p1", RateType::Flat, 100).with_priority(5),
        ];
        assert_eq!(resolve(&rules, 1.0).rule.map(|r| r.id.as_str()), Some("first"));
    }

    #[test]
    fn test_inapplicable_higher_priority_is_skipped() {
        let rules = vec![
            PricingRule::new("night", "p1", RateType::Flat, 800)
                .with_priority(10)
                .with_window(time(22, 0), time(6, 0)),
            PricingRule::new("day", "p1", RateType::Hourly, 300).with_priority(1),
        ];
        let resolved = resolve(&rules, 2.0);
        assert_eq!(resolved.rule.map(|r| r.id.as_str()), Some("day"));
        assert_eq!(resolved.amount.cents(), 600);
    }

    #[test]
    fn test_daily_rule_with_huge_duration_does_not_overflow() {
        let rules = vec![PricingRule::new("daily", "p1", RateType::Daily, 2000)];
        let resolved = resolve(&rules, 1e18);
        assert_eq!(resolved.amount.cents(), i64::MAX);
        assert_eq!(resolved.rule.map(|r| r.id.as_str()), Some("daily"));
    }

    #[test]
    fn test_inactive_rules_are_ignored() {
        let rules = vec![
            PricingRule::new("off", "p1", RateType::Flat, 1).with_priority(99).inactive(),
            PricingRule::new("on", "p1", RateType::Flat, 1000),
        ];
        assert_eq!(resolve(&rules, 1.0).rule.map(|r| r.id.as_str()), Some("on"));
    }

    #[test]
    fn test_daily_hourly_optimization() {
        let rules = vec![
            PricingRule::new("daily", "p1", RateType::Daily, 2000).with_priority(10),
            PricingRule::new("hourly", "p1", RateType::Hourly, 200).with_priority(1),
        ];
        let resolved = resolve(&rules, 2.0);
        assert_eq!(resolved.amount.cents(), 400);
        assert_eq!(resolved.rule.map(|r| r.id.as_str()), Some("hourly"));
    }

    #[test]
    fn test_daily_kept_when_hourly_is_not_cheaper() {
        let rules = vec![
            PricingRule::new("daily", "p1", RateType::Daily, 2000).with_priority(10),
            PricingRule::new("hourly", "p1", RateType::Hourly, 200).with_priority(1),
        ];
        // 200 × 10 = 2000, not strictly less
        let resolved = resolve(&rules, 10.0);
        assert_eq!(resolved.amount.cents(), 2000);
        assert_eq!(resolved.rule.map(|r| r.id.as_str()), Some("daily"));
    }

    #[test]
    fn test_optimization_only_considers_first_hourly_candidate() {
        let rules = vec![
            PricingRule::new("daily", "p1", RateType::Daily, 2000).with_priority(10),
            PricingRule::new("hourly-a", "p1", RateType::Hourly, 900).with_priority(5),
            PricingRule::new("hourly-b", "p1", RateType::Hourly, 100).with_priority(1),
        ];
        // hourly-a: 1800 < 2000 → chosen, although hourly-b (200) is cheaper
        let resolved = resolve(&rules, 2.0);
        assert_eq!(resolved.amount.cents(), 1800);
        assert_eq!(resolved.rule.map(|r| r.id.as_str()), Some("hourly-a"));
    }

    #[test]
    fn test_optimization_skips_inapplicable_hourly_rules() {
        let rules = vec![
            PricingRule::new("daily", "p1", RateType::Daily, 2000).with_priority(10),
            PricingRule::new("night-hourly", "p1", RateType::Hourly, 50)
                .with_priority(5)
                .with_window(time(22, 0), time(6, 0)),
            PricingRule::new("hourly", "p1", RateType::Hourly, 300).with_priority(1),
        ];
        let resolved = resolve(&rules, 2.0);
        assert_eq!(resolved.amount.cents(), 600);
        assert_eq!(resolved.rule.map(|r| r.id.as_str()), Some("hourly"));
    }

    #[test]
    fn test_no_optimization_for_non_daily_match() {
        let rules = vec![
            PricingRule::new("flat", "p1", RateType::Flat, 2000).with_priority(10),
            PricingRule::new("hourly", "p1", RateType::Hourly, 100).with_priority(1),
        ];
        let resolved = resolve(&rules, 2.0);
        assert_eq!(resolved.amount.cents(), 2000);
        assert_eq!(resolved.rule.map(|r| r.id.as_str()), Some("flat"));
    }

    #[test]
    fn test_resolver_does_not_reorder_snapshot() {
        let rules = vec![
            PricingRule::new("low", "p1", RateType::Flat, 100).with_priority(1),
            PricingRule::new("high", "p1", RateType::Flat, 900).with_priority(10),
        ];
        let before = rules.clone();
        let _ = resolve(&rules, 1.0);
        assert_eq!(rules, before);
    }
}
