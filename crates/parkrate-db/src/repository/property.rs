//! # Property Repository
//!
//! Properties carry the IANA timezone every rule window is evaluated in.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// A parking property.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Property {
    pub id: String,
    pub name: String,
    pub timezone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Repository for property rows.
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    pool: SqlitePool,
}

impl PropertyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        PropertyRepository { pool }
    }

    /// Inserts a property or updates its name and timezone.
    ///
    /// The timezone is stored as given; an unknown zone name prices in UTC.
    pub async fn upsert(&self, id: &str, name: &str, timezone: Option<&str>) -> DbResult<()> {
        debug!(id = %id, timezone = ?timezone, "Upserting property");

        sqlx::query(
            r#"
            INSERT INTO properties (id, name, timezone, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                timezone = excluded.timezone
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(timezone)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a property by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Property>> {
        let property = sqlx::query_as::<_, Property>(
            "SELECT id, name, timezone, created_at FROM properties WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(property)
    }

    /// Timezone of a property, `None` if unset or the property is unknown.
    pub async fn timezone(&self, id: &str) -> DbResult<Option<String>> {
        let tz: Option<Option<String>> =
            sqlx::query_scalar("SELECT timezone FROM properties WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(tz.flatten())
    }
}
