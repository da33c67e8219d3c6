//! # Repository Module
//!
//! SQLite implementations of the stores behind the pricing engine.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PricingService (parkrate-core)                                         │
//! │       │                                                                 │
//! │       │  RuleRepository::get_active_rules / DiscountRepository::find_…  │
//! │       ▼                                                                 │
//! │  PricingRuleRepository      DiscountCodeRepository    PropertyRepository│
//! │  ├── list_active            ├── find_by_code          ├── upsert        │
//! │  ├── insert                 ├── insert                ├── get_by_id     │
//! │  ├── set_active             ├── redeem (atomic)       └── timezone      │
//! │  └── count                  └── get_by_id                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod discount;
pub mod property;
pub mod rule;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::pool::{Database, DbConfig};

    /// In-memory database with one property, `lot-a`, in New York time.
    pub async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.properties()
            .upsert("lot-a", "Lot A", Some("America/New_York"))
            .await
            .unwrap();
        db
    }
}
