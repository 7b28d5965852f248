//! # Sale Repository
//!
//! Atomic sale recording and completion.
//!
//! ## Transaction Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 record_sale (one transaction)                   │
//! │                                                                 │
//! │  1. load each item, price the line (snapshot price/cost)        │
//! │  2. completed sale → guarded stock decrement per line           │
//! │       UPDATE ... WHERE id = ? AND stock_quantity - qty >= 0     │
//! │       0 rows affected → rollback, InsufficientStock             │
//! │  3. insert sale row with derived total/profit                   │
//! │  4. insert line rows                                            │
//! │  5. credit sale → open a debt for the customer                  │
//! │  6. COMMIT                                                      │
//! │                                                                 │
//! │  Any failure before COMMIT leaves no sale, no line, no stock    │
//! │  movement and no debt.                                          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pending sales skip step 2; stock moves when [`SaleRepository::complete_sale`]
//! runs the same guarded decrements. Completed sales are immutable.

use chrono::{Duration, NaiveDate, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use duka_core::sale::{self, LineDraft};
use duka_core::{
    CoreError, Money, PaymentMethod, Sale, SaleLine, SaleStatus, StationeryItem, ValidationError,
};

/// Default credit terms when the caller does not name a due date.
const CREDIT_TERMS_DAYS: i64 = 30;

// =============================================================================
// Inputs
// =============================================================================

/// One requested line of a new sale.
#[derive(Debug, Clone)]
pub struct NewSaleLine {
    pub item_id: String,
    pub quantity: i64,
    /// Haggled price replacing the catalog price. Cost is never overridden.
    pub price_override: Option<Money>,
}

/// Input for recording a sale.
#[derive(Debug, Clone)]
pub struct NewSale {
    /// `None` for walk-in sales. Required for credit sales.
    pub customer_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub status: SaleStatus,
    pub notes: Option<String>,
    /// Due date for the debt a credit sale opens. Defaults to 30 days out.
    pub credit_due_date: Option<NaiveDate>,
    pub lines: Vec<NewSaleLine>,
}

impl Default for NewSale {
    fn default() -> Self {
        NewSale {
            customer_id: None,
            payment_method: PaymentMethod::Cash,
            status: SaleStatus::Completed,
            notes: None,
            credit_due_date: None,
            lines: Vec::new(),
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale in a single transaction.
    ///
    /// A completed sale decrements stock per line; a pending sale leaves
    /// stock untouched until [`complete_sale`](Self::complete_sale). A
    /// completed credit sale opens a debt for the remaining balance in
    /// the same transaction.
    ///
    /// ## Errors
    /// - `Domain(ItemNotFound)` for an unknown line item
    /// - `Domain(InsufficientStock)` when any line exceeds the shelf;
    ///   nothing is persisted in that case
    /// - validation errors for empty lines or a credit sale without a
    ///   customer
    pub async fn record_sale(&self, new: NewSale) -> DbResult<Sale> {
        if new.lines.is_empty() {
            return Err(CoreError::from(ValidationError::Required {
                field: "lines".to_string(),
            })
            .into());
        }
        sale::check_line_count(new.lines.len())?;

        if new.payment_method == PaymentMethod::Credit && new.customer_id.is_none() {
            return Err(CoreError::from(ValidationError::Required {
                field: "customer_id".to_string(),
            })
            .into());
        }

        let mut tx = self.pool.begin().await?;

        // Price every line against current item state inside the
        // transaction, so the snapshots and the stock check agree.
        let mut drafts: Vec<LineDraft> = Vec::with_capacity(new.lines.len());
        for line in &new.lines {
            let item = fetch_item(&mut tx, &line.item_id)
                .await?
                .ok_or_else(|| CoreError::ItemNotFound(line.item_id.clone()))?;

            drafts.push(sale::price_line(&item, line.quantity, line.price_override)?);
        }

        if new.status == SaleStatus::Completed {
            for draft in &drafts {
                decrement_stock(&mut tx, &draft.item_id, draft.quantity).await?;
            }
        }

        let total = sale::compute_total(&drafts);
        let profit = sale::compute_profit(&drafts);

        let now = Utc::now();
        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            customer_id: new.customer_id.clone(),
            status: new.status,
            payment_method: new.payment_method,
            total_cents: total.cents(),
            profit_cents: profit.cents(),
            notes: new.notes,
            credit_due_date: new.credit_due_date,
            created_at: now,
            updated_at: now,
            completed_at: (new.status == SaleStatus::Completed).then_some(now),
        };

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, customer_id, status, payment_method, total_cents, profit_cents,
                notes, credit_due_date, created_at, updated_at, completed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.customer_id)
        .bind(sale.status)
        .bind(sale.payment_method)
        .bind(sale.total_cents)
        .bind(sale.profit_cents)
        .bind(&sale.notes)
        .bind(sale.credit_due_date)
        .bind(sale.created_at)
        .bind(sale.updated_at)
        .bind(sale.completed_at)
        .execute(&mut *tx)
        .await?;

        for draft in &drafts {
            sqlx::query(
                r#"
                INSERT INTO sale_lines (
                    id, sale_id, item_id, sku_snapshot, name_snapshot,
                    unit_price_cents, cost_price_cents, quantity, line_total_cents, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&sale.id)
            .bind(&draft.item_id)
            .bind(&draft.sku_snapshot)
            .bind(&draft.name_snapshot)
            .bind(draft.unit_price_cents)
            .bind(draft.cost_price_cents)
            .bind(draft.quantity)
            .bind(draft.line_total_cents)
            .bind(sale.created_at)
            .execute(&mut *tx)
            .await?;
        }

        // A completed credit sale opens the debt atomically with the sale.
        if sale.payment_method == PaymentMethod::Credit && sale.status == SaleStatus::Completed {
            if let Some(customer_id) = &sale.customer_id {
                let due = sale
                    .credit_due_date
                    .unwrap_or_else(|| (now + Duration::days(CREDIT_TERMS_DAYS)).date_naive());
                open_credit_debt(&mut tx, customer_id, &sale.id, sale.total_cents, due).await?;
            }
        }

        tx.commit().await?;

        info!(
            sale_id = %sale.id,
            status = sale.status.as_str(),
            total = %sale.total(),
            lines = drafts.len(),
            "Recorded sale"
        );

        Ok(sale)
    }

    /// Completes a pending sale: decrements stock per line and stamps
    /// `completed_at`. The only legal transition is pending → completed.
    ///
    /// ## Errors
    /// - `NotFound` for an unknown sale
    /// - `Domain(InvalidSaleStatus)` when the sale is already completed
    /// - `Domain(InsufficientStock)` when stock has drained since the
    ///   sale was recorded; the sale stays pending and stock untouched
    pub async fn complete_sale(&self, id: &str) -> DbResult<Sale> {
        let mut tx = self.pool.begin().await?;

        let sale = fetch_sale(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Sale", id))?;

        if sale.status != SaleStatus::Pending {
            return Err(CoreError::InvalidSaleStatus {
                sale_id: sale.id,
                current_status: sale.status.as_str().to_string(),
            }
            .into());
        }

        let lines = fetch_lines(&mut tx, id).await?;
        for line in &lines {
            decrement_stock(&mut tx, &line.item_id, line.quantity).await?;
        }

        let now = Utc::now();

        // Status guard in the WHERE clause; a concurrent completion
        // loses the race here rather than double-decrementing.
        let result = sqlx::query(
            r#"
            UPDATE sales
            SET status = 'completed', updated_at = ?2, completed_at = ?2
            WHERE id = ?1 AND status = 'pending'
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::InvalidSaleStatus {
                sale_id: id.to_string(),
                current_status: "completed".to_string(),
            }
            .into());
        }

        if sale.payment_method == PaymentMethod::Credit {
            if let Some(customer_id) = &sale.customer_id {
                // The terms the caller asked for at recording time, if any.
                let due = sale
                    .credit_due_date
                    .unwrap_or_else(|| (now + Duration::days(CREDIT_TERMS_DAYS)).date_naive());
                open_credit_debt(&mut tx, customer_id, id, sale.total_cents, due).await?;
            }
        }

        tx.commit().await?;

        info!(sale_id = %id, "Completed sale");

        Ok(Sale {
            status: SaleStatus::Completed,
            updated_at: now,
            completed_at: Some(now),
            ..sale
        })
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, customer_id, status, payment_method, total_cents, profit_cents,
                   notes, credit_due_date, created_at, updated_at, completed_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets the lines of a sale, in insertion order.
    pub async fn lines(&self, sale_id: &str) -> DbResult<Vec<SaleLine>> {
        let lines = sqlx::query_as::<_, SaleLine>(
            r#"
            SELECT id, sale_id, item_id, sku_snapshot, name_snapshot,
                   unit_price_cents, cost_price_cents, quantity, line_total_cents, created_at
            FROM sale_lines
            WHERE sale_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Lists sales created in `[from, to)`, newest first.
    pub async fn list_between(
        &self,
        from: chrono::DateTime<Utc>,
        to: chrono::DateTime<Utc>,
    ) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, customer_id, status, payment_method, total_cents, profit_cents,
                   notes, credit_due_date, created_at, updated_at, completed_at
            FROM sales
            WHERE created_at >= ?1 AND created_at < ?2
            ORDER BY created_at DESC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists a customer's sales, newest first.
    pub async fn list_by_customer(&self, customer_id: &str) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, customer_id, status, payment_method, total_cents, profit_cents,
                   notes, credit_due_date, created_at, updated_at, completed_at
            FROM sales
            WHERE customer_id = ?1
            ORDER BY created_at DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}

// =============================================================================
// Transaction Helpers
// =============================================================================

async fn fetch_item(
    tx: &mut Transaction<'_, Sqlite>,
    id: &str,
) -> DbResult<Option<StationeryItem>> {
    let item = sqlx::query_as::<_, StationeryItem>(
        r#"
        SELECT id, sku, name, description, category_id, supplier_id,
               unit_price_cents, cost_price_cents, stock_quantity, minimum_stock,
               is_active, created_at, updated_at
        FROM stationery_items
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(item)
}

async fn fetch_sale(tx: &mut Transaction<'_, Sqlite>, id: &str) -> DbResult<Option<Sale>> {
    let sale = sqlx::query_as::<_, Sale>(
        r#"
        SELECT id, customer_id, status, payment_method, total_cents, profit_cents,
               notes, credit_due_date, created_at, updated_at, completed_at
        FROM sales
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(sale)
}

async fn fetch_lines(tx: &mut Transaction<'_, Sqlite>, sale_id: &str) -> DbResult<Vec<SaleLine>> {
    let lines = sqlx::query_as::<_, SaleLine>(
        r#"
        SELECT id, sale_id, item_id, sku_snapshot, name_snapshot,
               unit_price_cents, cost_price_cents, quantity, line_total_cents, created_at
        FROM sale_lines
        WHERE sale_id = ?1
        ORDER BY rowid
        "#,
    )
    .bind(sale_id)
    .fetch_all(&mut **tx)
    .await?;

    Ok(lines)
}

/// Guarded decrement within the transaction. Zero rows affected means the
/// guard failed; the caller's transaction rolls back on drop.
async fn decrement_stock(
    tx: &mut Transaction<'_, Sqlite>,
    item_id: &str,
    quantity: i64,
) -> DbResult<()> {
    debug!(item_id = %item_id, quantity = %quantity, "Decrementing stock");

    let now = Utc::now();

    let result = sqlx::query(
        r#"
        UPDATE stationery_items
        SET stock_quantity = stock_quantity - ?2,
            updated_at = ?3
        WHERE id = ?1 AND stock_quantity - ?2 >= 0
        "#,
    )
    .bind(item_id)
    .bind(quantity)
    .bind(now)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        let item = fetch_item(tx, item_id)
            .await?
            .ok_or_else(|| DbError::not_found("Item", item_id))?;

        return Err(CoreError::InsufficientStock {
            sku: item.sku,
            available: item.stock_quantity,
            requested: quantity,
        }
        .into());
    }

    Ok(())
}

async fn open_credit_debt(
    tx: &mut Transaction<'_, Sqlite>,
    customer_id: &str,
    sale_id: &str,
    amount_cents: i64,
    due_date: NaiveDate,
) -> DbResult<()> {
    debug!(sale_id = %sale_id, amount_cents, "Opening debt for credit sale");

    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO debts (
            id, customer_id, sale_id, amount_cents, paid_cents,
            due_date, description, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6, ?7, ?7)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(customer_id)
    .bind(sale_id)
    .bind(amount_cents)
    .bind(due_date)
    .bind(format!("Credit sale {sale_id}"))
    .bind(now)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::customer::NewCustomer;
    use crate::repository::item::NewItem;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_item(db: &Database, sku: &str, price: i64, cost: i64, stock: i64) -> String {
        let category = db.categories().get_or_create("Pens", None).await.unwrap();
        db.items()
            .create(NewItem {
                sku: Some(sku.to_string()),
                name: format!("Item {sku}"),
                description: None,
                category_id: category.id,
                supplier_id: None,
                unit_price_cents: price,
                cost_price_cents: cost,
                stock_quantity: stock,
                minimum_stock: 0,
            })
            .await
            .unwrap()
            .id
    }

    fn line(item_id: &str, quantity: i64) -> NewSaleLine {
        NewSaleLine {
            item_id: item_id.to_string(),
            quantity,
            price_override: None,
        }
    }

    /// Two lines: 2 @ 1000 (cost 800) + 1 @ 500 (cost 300)
    /// → total 2500, profit 600, stock decremented.
    #[tokio::test]
    async fn test_record_completed_sale() {
        let db = db().await;
        let a = seed_item(&db, "A", 1000, 800, 10).await;
        let b = seed_item(&db, "B", 500, 300, 10).await;

        let sale = db
            .sales()
            .record_sale(NewSale {
                lines: vec![line(&a, 2), line(&b, 1)],
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(sale.total_cents, 2500);
        assert_eq!(sale.profit_cents, 600);
        assert_eq!(sale.status, SaleStatus::Completed);
        assert!(sale.completed_at.is_some());

        let stock_a = db.items().get_by_id(&a).await.unwrap().unwrap();
        let stock_b = db.items().get_by_id(&b).await.unwrap().unwrap();
        assert_eq!(stock_a.stock_quantity, 8);
        assert_eq!(stock_b.stock_quantity, 9);

        let lines = db.sales().lines(&sale.id).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].sku_snapshot, "A");
        assert_eq!(lines[0].line_total_cents, 2000);
    }

    /// One over-stock line voids the whole sale: no sale row, no lines,
    /// and the first (fulfillable) item keeps its stock.
    #[tokio::test]
    async fn test_record_sale_is_atomic() {
        let db = db().await;
        let a = seed_item(&db, "A", 1000, 800, 10).await;
        let b = seed_item(&db, "B", 500, 300, 1).await;

        let err = db
            .sales()
            .record_sale(NewSale {
                lines: vec![line(&a, 2), line(&b, 5)],
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientStock { .. })
        ));

        let stock_a = db.items().get_by_id(&a).await.unwrap().unwrap();
        assert_eq!(stock_a.stock_quantity, 10);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_pending_sale_defers_stock() {
        let db = db().await;
        let a = seed_item(&db, "A", 1000, 800, 10).await;

        let sale = db
            .sales()
            .record_sale(NewSale {
                status: SaleStatus::Pending,
                lines: vec![line(&a, 3)],
                ..Default::default()
            })
            .await
            .unwrap();

        // Nothing left the shelf yet.
        let before = db.items().get_by_id(&a).await.unwrap().unwrap();
        assert_eq!(before.stock_quantity, 10);
        assert!(sale.completed_at.is_none());

        let completed = db.sales().complete_sale(&sale.id).await.unwrap();
        assert_eq!(completed.status, SaleStatus::Completed);
        assert!(completed.completed_at.is_some());

        let after = db.items().get_by_id(&a).await.unwrap().unwrap();
        assert_eq!(after.stock_quantity, 7);
    }

    #[tokio::test]
    async fn test_complete_sale_twice_fails() {
        let db = db().await;
        let a = seed_item(&db, "A", 1000, 800, 10).await;

        let sale = db
            .sales()
            .record_sale(NewSale {
                status: SaleStatus::Pending,
                lines: vec![line(&a, 1)],
                ..Default::default()
            })
            .await
            .unwrap();

        db.sales().complete_sale(&sale.id).await.unwrap();
        let err = db.sales().complete_sale(&sale.id).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InvalidSaleStatus { .. })
        ));

        // Stock moved exactly once.
        let item = db.items().get_by_id(&a).await.unwrap().unwrap();
        assert_eq!(item.stock_quantity, 9);
    }

    #[tokio::test]
    async fn test_completing_drained_sale_fails_cleanly() {
        let db = db().await;
        let a = seed_item(&db, "A", 1000, 800, 5).await;

        let pending = db
            .sales()
            .record_sale(NewSale {
                status: SaleStatus::Pending,
                lines: vec![line(&a, 4)],
                ..Default::default()
            })
            .await
            .unwrap();

        // Stock drains through another completed sale first.
        db.sales()
            .record_sale(NewSale {
                lines: vec![line(&a, 3)],
                ..Default::default()
            })
            .await
            .unwrap();

        let err = db.sales().complete_sale(&pending.id).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientStock { .. })
        ));

        // Sale stays pending, stock stays at 2.
        let sale = db.sales().get_by_id(&pending.id).await.unwrap().unwrap();
        assert_eq!(sale.status, SaleStatus::Pending);
        let item = db.items().get_by_id(&a).await.unwrap().unwrap();
        assert_eq!(item.stock_quantity, 2);
    }

    #[tokio::test]
    async fn test_credit_sale_opens_debt() {
        let db = db().await;
        let a = seed_item(&db, "A", 1000, 800, 10).await;
        let customer = db
            .customers()
            .create(NewCustomer {
                name: "Asha".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let sale = db
            .sales()
            .record_sale(NewSale {
                customer_id: Some(customer.id.clone()),
                payment_method: PaymentMethod::Credit,
                lines: vec![line(&a, 2)],
                ..Default::default()
            })
            .await
            .unwrap();

        let debts = db.debts().list_by_customer(&customer.id).await.unwrap();
        assert_eq!(debts.len(), 1);
        assert_eq!(debts[0].amount_cents, 2000);
        assert_eq!(debts[0].paid_cents, 0);
        assert_eq!(debts[0].sale_id.as_deref(), Some(sale.id.as_str()));
    }

    /// The due date requested when a credit sale is recorded pending
    /// must be the one on the debt opened at completion.
    #[tokio::test]
    async fn test_pending_credit_sale_keeps_requested_due_date() {
        let db = db().await;
        let a = seed_item(&db, "A", 1000, 800, 10).await;
        let customer = db
            .customers()
            .create(NewCustomer {
                name: "Neema".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let due = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
        let sale = db
            .sales()
            .record_sale(NewSale {
                customer_id: Some(customer.id.clone()),
                payment_method: PaymentMethod::Credit,
                status: SaleStatus::Pending,
                credit_due_date: Some(due),
                lines: vec![line(&a, 2)],
                ..Default::default()
            })
            .await
            .unwrap();

        // No debt while pending.
        assert!(db.debts().list_by_customer(&customer.id).await.unwrap().is_empty());

        db.sales().complete_sale(&sale.id).await.unwrap();

        let debts = db.debts().list_by_customer(&customer.id).await.unwrap();
        assert_eq!(debts.len(), 1);
        assert_eq!(debts[0].due_date, due);
        assert_eq!(debts[0].amount_cents, 2000);
    }

    #[tokio::test]
    async fn test_credit_sale_requires_customer() {
        let db = db().await;
        let a = seed_item(&db, "A", 1000, 800, 10).await;

        let err = db
            .sales()
            .record_sale(NewSale {
                payment_method: PaymentMethod::Credit,
                lines: vec![line(&a, 1)],
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Domain(_)));
    }

    #[tokio::test]
    async fn test_record_sale_rejects_empty_lines() {
        let db = db().await;
        let err = db.sales().record_sale(NewSale::default()).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(_)));
    }

    #[tokio::test]
    async fn test_price_override_changes_total_not_cost() {
        let db = db().await;
        let a = seed_item(&db, "A", 1000, 800, 10).await;

        let sale = db
            .sales()
            .record_sale(NewSale {
                lines: vec![NewSaleLine {
                    item_id: a,
                    quantity: 2,
                    price_override: Some(Money::from_cents(900)),
                }],
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(sale.total_cents, 1800);
        // Profit uses the frozen cost: 2 × (900 − 800).
        assert_eq!(sale.profit_cents, 200);
    }

    #[tokio::test]
    async fn test_list_between_and_by_customer() {
        let db = db().await;
        let a = seed_item(&db, "A", 1000, 800, 10).await;
        let customer = db
            .customers()
            .create(NewCustomer {
                name: "Juma".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        db.sales()
            .record_sale(NewSale {
                customer_id: Some(customer.id.clone()),
                lines: vec![line(&a, 1)],
                ..Default::default()
            })
            .await
            .unwrap();
        db.sales()
            .record_sale(NewSale {
                lines: vec![line(&a, 1)],
                ..Default::default()
            })
            .await
            .unwrap();

        let now = Utc::now();
        let today = db
            .sales()
            .list_between(now - Duration::hours(1), now + Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(today.len(), 2);

        let tomorrow = db
            .sales()
            .list_between(now + Duration::days(1), now + Duration::days(2))
            .await
            .unwrap();
        assert!(tomorrow.is_empty());

        let mine = db.sales().list_by_customer(&customer.id).await.unwrap();
        assert_eq!(mine.len(), 1);
    }
}
