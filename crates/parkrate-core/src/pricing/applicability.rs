//! # Rule Applicability
//!
//! Decides whether a rule governs a given instant at a property.
//!
//! ## Wall-Clock Evaluation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  instant (UTC) ──► property timezone (IANA, DST-aware) ──► local time  │
//! │                                                                         │
//! │  Same-day window  09:00 ─────── 17:00                                   │
//! │                   ├─ match ─────┤                                       │
//! │                                                                         │
//! │  Overnight window 22:00 ─────── 24:00 │ 00:00 ─────── 06:00             │
//! │                   ├─ match ─────────────────────────────┤               │
//! │                   (local >= start  OR  local <= end)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bounds are inclusive on both sides. A fixed UTC offset is never used:
//! conversion goes through `chrono-tz` so DST transitions move the window.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::types::{weekday_index, PricingRule};

/// Resolves an IANA zone name, defaulting to UTC.
///
/// Missing, blank or unknown names are not errors; the property is simply
/// evaluated in UTC.
///
/// ## Example
/// ```rust
/// use parkrate_core::pricing::resolve_timezone;
///
/// assert_eq!(resolve_timezone(Some("America/New_York")), chrono_tz::America::New_York);
/// assert_eq!(resolve_timezone(Some("Mars/Olympus")), chrono_tz::UTC);
/// assert_eq!(resolve_timezone(None), chrono_tz::UTC);
/// ```
pub fn resolve_timezone(name: Option<&str>) -> Tz {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return chrono_tz::UTC;
    };

    match name.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            debug!(timezone = %name, "Unknown timezone, defaulting to UTC");
            chrono_tz::UTC
        }
    }
}

/// Returns true when `rule` governs `instant` in `tz`.
///
/// Pure and deterministic. Does not look at `is_active`; the resolver filters
/// inactive rules before calling this.
pub fn is_applicable(rule: &PricingRule, instant: DateTime<Utc>, tz: Tz) -> bool {
    let local = instant.with_timezone(&tz);

    if let Some(days) = rule.restricted_days() {
        if !days.contains(&weekday_index(local.weekday())) {
            return false;
        }
    }

    match (rule.start_time, rule.end_time) {
        (None, None) => true,
        (Some(start), Some(end)) => {
            let now = local.time();
            if end >= start {
                start <= now && now <= end
            } else {
                now >= start || now <= end
            }
        }
        _ => {
            // Fail closed: half a window cannot be interpreted.
            warn!(rule_id = %rule.id, "Rule has a partial time window, treating as not applicable");
            false
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
