//! # Pricing Module
//!
//! Rule selection and rate math for a single parking session.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rules (any order)                                                      │
//! │       │                                                                 │
//! │       ▼  stable sort by priority DESC, skip inactive                    │
//! │  is_applicable(rule, instant, tz)  ← applicability.rs                   │
//! │       │                                                                 │
//! │       ├── no match ──► fallback: $5.00/hour, rule = None               │
//! │       │                                                                 │
//! │       ▼ first match wins                                                │
//! │  amount_for_duration(rule, hours)  ← amount.rs                          │
//! │       │                                                                 │
//! │       ▼ matched rule is DAILY?                                          │
//! │  first applicable HOURLY alternative cheaper? → swap  ← resolver.rs     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod amount;
pub mod applicability;
pub mod resolver;

pub use amount::amount_for_duration;
pub use applicability::{is_applicable, resolve_timezone};
pub use resolver::{PriceResolver, ResolvedPrice};
