//! # Report Repository
//!
//! Read-only aggregation queries for the dashboard.
//!
//! Everything here is computed from the base tables at query time.
//! There are no counter rows or cached totals to drift out of sync;
//! the tradeoff is aggregate scans, which SQLite handles comfortably
//! at shop scale.
//!
//! Revenue and profit only count completed sales. Pending sales have
//! not moved stock or money yet, so they stay out of every number.
//! Net figures subtract expenditures from revenue over the same window.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use duka_core::{Money, StationeryItem};

// =============================================================================
// Dashboard Summary
// =============================================================================

/// One-screen snapshot of the shop, assembled by
/// [`ReportRepository::dashboard`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct DashboardSummary {
    /// Completed-sale revenue for the current UTC day.
    pub today_sales_cents: i64,
    pub today_profit_cents: i64,
    pub today_sales_count: i64,
    /// Completed-sale revenue for the current UTC month to date.
    pub month_sales_cents: i64,
    pub month_profit_cents: i64,
    /// Expenditures for the same windows.
    pub today_expenditure_cents: i64,
    pub month_expenditure_cents: i64,
    /// Revenue minus expenditures; may be negative on a heavy-spend day.
    pub today_net_cents: i64,
    pub month_net_cents: i64,
    /// Σ (amount − paid) over debts with a balance.
    pub outstanding_debt_cents: i64,
    /// Unpaid debts past their due date.
    pub overdue_debt_count: i64,
    /// Active items with stock strictly below their minimum.
    pub low_stock_count: i64,
}

impl DashboardSummary {
    /// Today's revenue as Money.
    #[inline]
    pub fn today_sales(&self) -> Money {
        Money::from_cents(self.today_sales_cents)
    }

    /// Month-to-date revenue as Money.
    #[inline]
    pub fn month_sales(&self) -> Money {
        Money::from_cents(self.month_sales_cents)
    }

    /// Today's revenue minus today's expenditures as Money.
    #[inline]
    pub fn today_net(&self) -> Money {
        Money::from_cents(self.today_net_cents)
    }

    /// Month-to-date revenue minus expenditures as Money.
    #[inline]
    pub fn month_net(&self) -> Money {
        Money::from_cents(self.month_net_cents)
    }

    /// Total money owed to the shop as Money.
    #[inline]
    pub fn outstanding_debt(&self) -> Money {
        Money::from_cents(self.outstanding_debt_cents)
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for read-only aggregation.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Sums completed-sale revenue over `[from, to)`.
    pub async fn sales_total_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DbResult<Money> {
        let cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(total_cents), 0)
            FROM sales
            WHERE status = 'completed' AND created_at >= ?1 AND created_at < ?2
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(cents))
    }

    /// Sums completed-sale profit over `[from, to)`.
    pub async fn profit_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> DbResult<Money> {
        let cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(profit_cents), 0)
            FROM sales
            WHERE status = 'completed' AND created_at >= ?1 AND created_at < ?2
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(cents))
    }

    /// Counts completed sales over `[from, to)`.
    pub async fn sales_count_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM sales
            WHERE status = 'completed' AND created_at >= ?1 AND created_at < ?2
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Sums expenditures spent in `[from, to)`.
    pub async fn expenditure_total_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DbResult<Money> {
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

    /// Total outstanding balance across all unpaid debts.
    pub async fn outstanding_debt_total(&self) -> DbResult<Money> {
        let cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount_cents - paid_cents), 0)
            FROM debts
            WHERE paid_cents < amount_cents
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(cents))
    }

    /// Counts unpaid debts past their due date as of `today`.
    pub async fn overdue_debt_count(&self, today: NaiveDate) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM debts
            WHERE paid_cents < amount_cents AND due_date < ?1
            "#,
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Active items with stock strictly below their minimum, by name.
    pub async fn low_stock_items(&self) -> DbResult<Vec<StationeryItem>> {
        let items = sqlx::query_as::<_, StationeryItem>(
            r#"
            SELECT id, sku, name, description, category_id, supplier_id,
                   unit_price_cents, cost_price_cents, stock_quantity, minimum_stock,
                   is_active, created_at, updated_at
            FROM stationery_items
            WHERE is_active = 1 AND stock_quantity < minimum_stock
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Assembles the dashboard as of `now`.
    ///
    /// Day and month windows are UTC: `[midnight, now]` and
    /// `[first of month, now]`. Taking `now` as a parameter keeps the
    /// aggregation deterministic under test.
    pub async fn dashboard(&self, now: DateTime<Utc>) -> DbResult<DashboardSummary> {
        debug!(%now, "Building dashboard");

        let day_start = day_start(now);
        let month_start = month_start(now);

        let today_sales = self.sales_total_between(day_start, now).await?;
        let today_profit = self.profit_between(day_start, now).await?;
        let today_count = self.sales_count_between(day_start, now).await?;
        let month_sales = self.sales_total_between(month_start, now).await?;
        let month_profit = self.profit_between(month_start, now).await?;
        let today_spent = self.expenditure_total_between(day_start, now).await?;
        let month_spent = self.expenditure_total_between(month_start, now).await?;
        let outstanding = self.outstanding_debt_total().await?;
        let overdue = self.overdue_debt_count(now.date_naive()).await?;
        let low_stock = self.low_stock_items().await?;

        Ok(DashboardSummary {
            today_sales_cents: today_sales.cents(),
            today_profit_cents: today_profit.cents(),
            today_sales_count: today_count,
            month_sales_cents: month_sales.cents(),
            month_profit_cents: month_profit.cents(),
            today_expenditure_cents: today_spent.cents(),
            month_expenditure_cents: month_spent.cents(),
            today_net_cents: (today_sales - today_spent).cents(),
            month_net_cents: (month_sales - month_spent).cents(),
            outstanding_debt_cents: outstanding.cents(),
            overdue_debt_count: overdue,
            low_stock_count: low_stock.len() as i64,
        })
    }
}

// =============================================================================
// Window Helpers
// =============================================================================

/// UTC midnight of the day containing `now`.
fn day_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
}

/// UTC midnight of the first day of the month containing `now`.
fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
        .and_utc()
}

// =============================================================================
// Unit Tests
// =============================================================================
