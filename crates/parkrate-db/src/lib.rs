//! # parkrate-db: Database Layer for ParkRate
//!
//! SQLite storage for properties, pricing rules and discount codes, plus the
//! implementations of the repository traits `parkrate-core` prices through.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ParkRate Data Flow                               │
//! │                                                                         │
//! │  quote binary / host service                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PricingService (parkrate-core)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   parkrate-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │   │   │
//! │  │   │               │    │ PricingRule    │   │              │   │   │
//! │  │   │ SqlitePool    │◄───│ DiscountCode   │   │ 001_initial  │   │   │
//! │  │   │ DbConfig      │    │ Property       │   │ _schema.sql  │   │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (PARKRATE_DB_PATH, default ./parkrate.db)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`config`] - `DbConfig` from `PARKRATE_DB_*` environment variables
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Rule, discount and property repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use parkrate_core::{PricingService, QuoteRequest};
//! use parkrate_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//! let service = PricingService::new(db.rules(), db.discounts());
//!
//! let result = service
//!     .quote(&QuoteRequest::new("lot-a", start, 2.5).with_code("SAVE20"))
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::ConfigError;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::discount::DiscountCodeRepository;
pub use repository::property::{Property, PropertyRepository};
pub use repository::rule::PricingRuleRepository;
