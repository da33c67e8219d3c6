//! # Pricing Rule Repository
//!
//! Stores pricing rules and serves the active, priority-ordered snapshot the
//! engine resolves against.
//!
//! ## Column Encoding
//! ```text
//! days_of_week  TEXT  JSON array, e.g. "[1,2,3,4,5]"   NULL = every day
//! start_time    TEXT  "HH:MM:SS" local wall clock      NULL = no window
//! end_time      TEXT  "HH:MM:SS" local wall clock
//! rate_type     TEXT  FLAT | HOURLY | DAILY
//! ```
//!
//! ## Fail-Closed Reads
//! A row whose JSON or time text cannot be parsed is logged and left out of
//! the snapshot: it never matches, exactly like a rule with a partial window.

use chrono::{NaiveTime, Utc};
use parkrate_core::validation::{parse_time_of_day, validate_rule};
use parkrate_core::{PricingRule, RateType, RuleRepository, RuleSet};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::repository::property::PropertyRepository;

const TIME_FORMAT: &str = "%H:%M:%S";

/// Raw `pricing_rules` row before decoding the text columns.
#[derive(Debug, sqlx::FromRow)]
struct PricingRuleRow {
    id: String,
    property_id: String,
    priority: i64,
    name: Option<String>,
    days_of_week: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    rate_type: RateType,
    amount_cents: i64,
    is_active: bool,
}

impl PricingRuleRow {
    /// Decodes the row, `None` when a text column is malformed.
    fn into_rule(self) -> Option<PricingRule> {
        let days_of_week = match self.days_of_week.as_deref() {
            None => None,
            Some(raw) => match serde_json::from_str::<Vec<u8>>(raw) {
                Ok(days) => Some(days),
                Err(e) => {
                    warn!(rule_id = %self.id, error = %e, "Malformed days_of_week, skipping rule");
                    return None;
                }
            },
        };

        let start_time = decode_time(&self.id, "start_time", self.start_time.as_deref())?;
        let end_time = decode_time(&self.id, "end_time", self.end_time.as_deref())?;

        Some(PricingRule {
            id: self.id,
            property_id: self.property_id,
            priority: self.priority,
            name: self.name,
            days_of_week,
            start_time,
            end_time,
            rate_type: self.rate_type,
            amount_cents: self.amount_cents,
            is_active: self.is_active,
        })
    }
}

/// `Some(None)` for NULL, `Some(Some(t))` for a valid time, `None` for garbage.
fn decode_time(rule_id: &str, field: &str, raw: Option<&str>) -> Option<Option<NaiveTime>> {
    match raw {
        None => Some(None),
        Some(raw) => match parse_time_of_day(field, raw) {
            Ok(time) => Some(Some(time)),
            Err(e) => {
                warn!(rule_id = %rule_id, error = %e, "Malformed time window, skipping rule");
                None
            }
        },
    }
}

/// Repository for pricing rule database operations.
#[derive(Debug, Clone)]
pub struct PricingRuleRepository {
    pool: SqlitePool,
}

impl PricingRuleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        PricingRuleRepository { pool }
    }

    /// Active rules for a property, priority DESC then insertion order.
    pub async fn list_active(&self, property_id: &str) -> DbResult<Vec<PricingRule>> {
        debug!(property_id = %property_id, "Loading active pricing rules");

        let rows = sqlx::query_as::<_, PricingRuleRow>(
            r#"
            SELECT
                id, property_id, priority, name, days_of_week,
                start_time, end_time, rate_type, amount_cents, is_active
            FROM pricing_rules
            WHERE property_id = ?1
            AND is_active = 1
            ORDER BY priority DESC, rowid ASC
            "#,
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        let total = rows.len();
        let rules: Vec<PricingRule> = rows.into_iter().filter_map(PricingRuleRow::into_rule).collect();

        debug!(count = rules.len(), skipped = total - rules.len(), "Loaded pricing rules");
        Ok(rules)
    }

    /// Inserts a validated rule.
    ///
    /// ## Returns
    /// * `Err(DbError::Invalid)` - partial window, negative amount, bad day
    /// * `Err(DbError::ForeignKeyViolation)` - unknown property
    pub async fn insert(&self, rule: &PricingRule) -> DbResult<()> {
        validate_rule(rule)?;

        debug!(id = %rule.id, property_id = %rule.property_id, "Inserting pricing rule");

        let days_json = rule
            .days_of_week
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DbError::Internal(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO pricing_rules (
                id, property_id, priority, name, days_of_week,
                start_time, end_time, rate_type, amount_cents, is_active, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&rule.id)
        .bind(&rule.property_id)
        .bind(rule.priority)
        .bind(&rule.name)
        .bind(days_json)
        .bind(rule.start_time.map(|t| t.format(TIME_FORMAT).to_string()))
        .bind(rule.end_time.map(|t| t.format(TIME_FORMAT).to_string()))
        .bind(rule.rate_type)
        .bind(rule.amount_cents)
        .bind(rule.is_active)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Activates or deactivates a rule.
    pub async fn set_active(&self, id: &str, active: bool) -> DbResult<()> {
        debug!(id = %id, active, "Toggling pricing rule");

        let result = sqlx::query("UPDATE pricing_rules SET is_active = ?2 WHERE id = ?1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("PricingRule", id));
        }

        Ok(())
    }

    /// Number of rules (active or not) for a property.
    pub async fn count(&self, property_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pricing_rules WHERE property_id = ?1")
            .bind(property_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

impl RuleRepository for PricingRuleRepository {
    type Error = DbError;

    async fn get_active_rules(&self, property_id: &str) -> DbResult<RuleSet> {
        let timezone = PropertyRepository::new(self.pool.clone())
            .timezone(property_id)
            .await?;
        let rules = self.list_active(property_id).await?;

        Ok(RuleSet { rules, timezone })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::seeded_db;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_list_round_trip() {
        let db = seeded_db().await;
        let rule = PricingRule::new("night", "lot-a", RateType::Flat, 800)
            .with_name("Overnight")
            .with_priority(10)
            .with_days(vec![5, 6])
            .with_window(time(22, 0), time(6, 0));

        db.rules().insert(&rule).await.unwrap();

        let rules = db.rules().list_active("lot-a").await.unwrap();
        assert_eq!(rules, vec![rule]);
    }

    #[tokio::test]
    async fn test_list_orders_by_priority_then_insertion() {
        let db = seeded_db().await;
        let repo = db.rules();
        repo.insert(&PricingRule::new("a", "lot-a", RateType::Flat, 1).with_priority(1)).await.unwrap();
        repo.insert(&PricingRule::new("b", "lot-a", RateType::Flat, 2).with_priority(5)).await.unwrap();
        repo.insert(&PricingRule::new("c", "lot-a", RateType::Flat, 3).with_priority(5)).await.unwrap();
        repo.insert(&PricingRule::new("d", "lot-a", RateType::Flat, 4).with_priority(9)).await.unwrap();

        let ids: Vec<String> = repo.list_active("lot-a").await.unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["d", "b", "c", "a"]);
    }

    #[tokio::test]
    async fn test_inactive_rules_are_not_listed() {
        let db = seeded_db().await;
        let repo = db.rules();
        repo.insert(&PricingRule::new("a", "lot-a", RateType::Flat, 1)).await.unwrap();
        repo.insert(&PricingRule::new("b", "lot-a", RateType::Flat, 2).inactive()).await.unwrap();

        assert_eq!(repo.list_active("lot-a").await.unwrap().len(), 1);
        assert_eq!(repo.count("lot-a").await.unwrap(), 2);

        repo.set_active("b", true).await.unwrap();
        assert_eq!(repo.list_active("lot-a").await.unwrap().len(), 2);

        assert!(matches!(
            repo.set_active("missing", true).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_rules() {
        let db = seeded_db().await;

        let mut partial = PricingRule::new("p", "lot-a", RateType::Flat, 100);
        partial.start_time = Some(time(9, 0));
        assert!(matches!(db.rules().insert(&partial).await, Err(DbError::Invalid(_))));

        let orphan = PricingRule::new("o", "nowhere", RateType::Flat, 100);
        assert!(matches!(
            db.rules().insert(&orphan).await,
            Err(DbError::ForeignKeyViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_rows_are_skipped() {
        let db = seeded_db().await;
        db.rules()
            .insert(&PricingRule::new("good", "lot-a", RateType::Hourly, 300))
            .await
            .unwrap();

        // Written by something other than this repository
        sqlx::query(
            r#"
            INSERT INTO pricing_rules
                (id, property_id, priority, days_of_week, start_time, end_time,
                 rate_type, amount_cents, is_active, created_at)
            VALUES
                ('bad-days', 'lot-a', 9, 'mon-fri', NULL, NULL, 'FLAT', 1, 1, '2024-01-01T00:00:00Z'),
                ('bad-time', 'lot-a', 9, NULL, 'noon', '13:00:00', 'FLAT', 1, 1, '2024-01-01T00:00:00Z'),
                ('half',     'lot-a', 8, NULL, '09:00:00', NULL, 'FLAT', 1, 1, '2024-01-01T00:00:00Z')
            "#,
        )
        .execute(db.pool())
        .await
        .unwrap();

        let ids: Vec<String> = db
            .rules()
            .list_active("lot-a")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        // The half window is kept; the evaluator will never match it.
        assert_eq!(ids, vec!["half", "good"]);
    }

    #[tokio::test]
    async fn test_rule_set_includes_timezone() {
        let db = seeded_db().await;
        db.rules()
            .insert(&PricingRule::new("r", "lot-a", RateType::Flat, 100))
            .await
            .unwrap();

        let set = db.rules().get_active_rules("lot-a").await.unwrap();
        assert_eq!(set.timezone.as_deref(), Some("America/New_York"));
        assert_eq!(set.rules.len(), 1);

        let unknown = db.rules().get_active_rules("nowhere").await.unwrap();
        assert_eq!(unknown, RuleSet::default());
    }
}
