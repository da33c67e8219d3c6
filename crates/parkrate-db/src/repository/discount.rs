//! # Discount Code Repository
//!
//! Lookup and redemption of discount codes.
//!
//! Codes are stored in canonical form (uppercase `[A-Z0-9]`), so lookups are
//! plain equality on `(property_id, code)`.
//!
//! ## Redemption
//! The engine never touches `usage_count`. Callers redeem after the charge
//! succeeds, and the increment is a single conditional UPDATE:
//! ```text
//! UPDATE discounts SET usage_count = usage_count + 1
//! WHERE id = ? AND is_active = 1
//!   AND (usage_limit IS NULL OR usage_count < usage_limit)
//! ```
//! Two sessions racing for the last use cannot both win.

use chrono::Utc;
use parkrate_core::validation::{validate_discount, validate_discount_code};
use parkrate_core::{Discount, DiscountRepository};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// Repository for discount code database operations.
#[derive(Debug, Clone)]
pub struct DiscountCodeRepository {
    pool: SqlitePool,
}

impl DiscountCodeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        DiscountCodeRepository { pool }
    }

    /// Finds an active discount by canonical code.
    ///
    /// Expired or exhausted discounts are still returned; eligibility is
    /// decided by the engine at quote time.
    pub async fn find_by_code(&self, property_id: &str, code: &str) -> DbResult<Option<Discount>> {
        debug!(property_id = %property_id, code = %code, "Looking up discount code");

        let discount = sqlx::query_as::<_, Discount>(
            r#"
            SELECT
                id, property_id, code, discount_type, amount,
                usage_limit, usage_count, expires_at, is_active
            FROM discounts
            WHERE property_id = ?1
            AND code = ?2
            AND is_active = 1
            "#,
        )
        .bind(property_id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(discount)
    }

    /// Gets a discount by its ID, active or not.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Discount>> {
        let discount = sqlx::query_as::<_, Discount>(
            r#"
            SELECT
                id, property_id, code, discount_type, amount,
                usage_limit, usage_count, expires_at, is_active
            FROM discounts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(discount)
    }

    /// Inserts a discount, normalizing its code first.
    ///
    /// ## Returns
    /// * `Ok(Discount)` - the stored discount with its canonical code
    /// * `Err(DbError::Invalid)` - code too short, amount out of range
    /// * `Err(DbError::UniqueViolation)` - code already used at this property
    pub async fn insert(&self, discount: &Discount) -> DbResult<Discount> {
        let mut discount = discount.clone();
        discount.code = validate_discount_code(&discount.code)?;
        validate_discount(&discount)?;

        debug!(id = %discount.id, code = %discount.code, "Inserting discount");

        sqlx::query(
            r#"
            INSERT INTO discounts (
                id, property_id, code, discount_type, amount,
                usage_limit, usage_count, expires_at, is_active, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&discount.id)
        .bind(&discount.property_id)
        .bind(&discount.code)
        .bind(discount.discount_type)
        .bind(discount.amount)
        .bind(discount.usage_limit)
        .bind(discount.usage_count)
        .bind(discount.expires_at)
        .bind(discount.is_active)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("code", discount.code.clone()),
            other => other,
        })?;

        Ok(discount)
    }

    /// Consumes one use of a discount.
    ///
    /// Returns `false` when the discount is inactive, unknown, or already at
    /// its usage limit.
    pub async fn redeem(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE discounts
            SET usage_count = usage_count + 1
            WHERE id = ?1
            AND is_active = 1
            AND (usage_limit IS NULL OR usage_count < usage_limit)
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        let redeemed = result.rows_affected() == 1;
        info!(id = %id, redeemed, "Discount redemption");

        Ok(redeemed)
    }
}

impl DiscountRepository for DiscountCodeRepository {
    type Error = DbError;

    async fn find_active(&self, property_id: &str, code: &str) -> DbResult<Option<Discount>> {
        self.find_by_code(property_id, code).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
