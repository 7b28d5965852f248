//! # Expenditure Repository
//!
//! Database operations for expenditures (money going out).
//!
//! Expenditures are append-only entries: category, amount, when the
//! money left. The report queries subtract them from sales over the
//! same window to produce the dashboard's net figures.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use duka_core::{validation, CoreError, Expenditure, ExpenditureCategory, Money};

/// Input for recording an expenditure.
///
/// `spent_at` defaults to now; set it to backdate an entry.
#[derive(Debug, Clone, Default)]
pub struct NewExpenditure {
    pub category: ExpenditureCategory,
    pub description: Option<String>,
    pub amount_cents: i64,
    pub spent_at: Option<DateTime<Utc>>,
}

/// Repository for expenditure database operations.
#[derive(Debug, Clone)]
pub struct ExpenditureRepository {
    pool: SqlitePool,
}

impl ExpenditureRepository {
    /// Creates a new ExpenditureRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ExpenditureRepository { pool }
    }

    /// Records an expenditure.
    pub async fn create(&self, new: NewExpenditure) -> DbResult<Expenditure> {
        validation::validate_amount_cents(new.amount_cents).map_err(CoreError::from)?;

        let now = Utc::now();
        let expenditure = Expenditure {
            id: Uuid::new_v4().to_string(),
            category: new.category,
            description: new.description,
            amount_cents: new.amount_cents,
            spent_at: new.spent_at.unwrap_or(now),
            created_at: now,
        };

        debug!(
            id = %expenditure.id,
            amount = %expenditure.amount(),
            "Recording expenditure"
        );

        sqlx::query(
            r#"
            INSERT INTO expenditures (id, category, description, amount_cents, spent_at, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&expenditure.id)
        .bind(expenditure.category)
        .bind(&expenditure.description)
        .bind(expenditure.amount_cents)
        .bind(expenditure.spent_at)
        .bind(expenditure.created_at)
        .execute(&self.pool)
        .await?;

        Ok(expenditure)
    }

    /// Gets an expenditure by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Expenditure>> {
        let expenditure = sqlx::query_as::<_, Expenditure>(
            r#"
            SELECT id, category, description, amount_cents, spent_at, created_at
            FROM expenditures
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(expenditure)
    }

    /// Lists expenditures spent in `[from, to)`, newest first.
    pub async fn list_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DbResult<Vec<Expenditure>> {
        let expenditures = sqlx::query_as::<_, Expenditure>(
            r#"
            SELECT id, category, description, amount_cents, spent_at, created_at
            FROM expenditures
            WHERE spent_at >= ?1 AND spent_at < ?2
            ORDER BY spent_at DESC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenditures)
    }

    /// Sums expenditures spent in `[from, to)`.
    pub async fn total_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> DbResult<Money> {
        let cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount_cents), 0)
            FROM expenditures
            WHERE spent_at >= ?1 AND spent_at < ?2
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(cents))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
