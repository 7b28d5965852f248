//! # Debt Repository
//!
//! Debts and the payments made against them.
//!
//! There is no status column anywhere here. Status (open / overdue /
//! paid) is derived from `amount_cents`, `paid_cents` and `due_date` on
//! every read, so a debt flips to overdue at midnight without a batch
//! job, and a paid debt stays paid no matter how the due date moves.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use duka_core::{debt, CoreError, Debt, DebtPayment, PaymentMethod};

/// Input for manually opening a debt (credit sales open theirs through
/// the sale transaction).
#[derive(Debug, Clone)]
pub struct NewDebt {
    pub customer_id: String,
    pub amount_cents: i64,
    pub due_date: NaiveDate,
    pub description: Option<String>,
}

/// Repository for debt database operations.
#[derive(Debug, Clone)]
pub struct DebtRepository {
    pool: SqlitePool,
}

impl DebtRepository {
    /// Creates a new DebtRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DebtRepository { pool }
    }

    /// Opens a debt for a customer.
    pub async fn create(&self, new: NewDebt) -> DbResult<Debt> {
        duka_core::validation::validate_amount_cents(new.amount_cents)
            .map_err(CoreError::from)?;

        let now = Utc::now();
        let debt = Debt {
            id: Uuid::new_v4().to_string(),
            customer_id: new.customer_id,
            sale_id: None,
            amount_cents: new.amount_cents,
            paid_cents: 0,
            due_date: new.due_date,
            description: new.description,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %debt.id, amount = %debt.amount(), "Opening debt");

        sqlx::query(
            r#"
            INSERT INTO debts (
                id, customer_id, sale_id, amount_cents, paid_cents,
                due_date, description, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&debt.id)
        .bind(&debt.customer_id)
        .bind(&debt.sale_id)
        .bind(debt.amount_cents)
        .bind(debt.paid_cents)
        .bind(debt.due_date)
        .bind(&debt.description)
        .bind(debt.created_at)
        .bind(debt.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(debt)
    }

    /// Gets a debt by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Debt>> {
        let debt = sqlx::query_as::<_, Debt>(
            r#"
            SELECT id, customer_id, sale_id, amount_cents, paid_cents,
                   due_date, description, created_at, updated_at
            FROM debts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(debt)
    }

    /// Lists a customer's debts, newest first.
    pub async fn list_by_customer(&self, customer_id: &str) -> DbResult<Vec<Debt>> {
        let debts = sqlx::query_as::<_, Debt>(
            r#"
            SELECT id, customer_id, sale_id, amount_cents, paid_cents,
                   due_date, description, created_at, updated_at
            FROM debts
            WHERE customer_id = ?1
            ORDER BY created_at DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(debts)
    }

    /// Lists debts with an outstanding balance, soonest due first.
    pub async fn list_unpaid(&self) -> DbResult<Vec<Debt>> {
        let debts = sqlx::query_as::<_, Debt>(
            r#"
            SELECT id, customer_id, sale_id, amount_cents, paid_cents,
                   due_date, description, created_at, updated_at
            FROM debts
            WHERE paid_cents < amount_cents
            ORDER BY due_date
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(debts)
    }

    /// Lists unpaid debts whose due date has passed as of `today`.
    ///
    /// The SQL predicate matches [`duka_core::debt::derive_status`]:
    /// unpaid AND due strictly before today.
    pub async fn list_overdue(&self, today: NaiveDate) -> DbResult<Vec<Debt>> {
        let debts = sqlx::query_as::<_, Debt>(
            r#"
            SELECT id, customer_id, sale_id, amount_cents, paid_cents,
                   due_date, description, created_at, updated_at
            FROM debts
            WHERE paid_cents < amount_cents AND due_date < ?1
            ORDER BY due_date
            "#,
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(debts)
    }

    /// Records a payment against a debt and bumps its running balance,
    /// in one transaction.
    ///
    /// ## Errors
    /// - `NotFound` for an unknown debt
    /// - `Domain(Validation(Overpayment))` when the payment exceeds the
    ///   remaining balance; the debt is left untouched
    pub async fn record_payment(
        &self,
        debt_id: &str,
        amount_cents: i64,
        method: PaymentMethod,
        notes: Option<String>,
    ) -> DbResult<Debt> {
        duka_core::validation::validate_amount_cents(amount_cents).map_err(CoreError::from)?;

        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Debt>(
            r#"
            SELECT id, customer_id, sale_id, amount_cents, paid_cents,
                   due_date, description, created_at, updated_at
            FROM debts
            WHERE id = ?1
            "#,
        )
        .bind(debt_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Debt", debt_id))?;

        debt::validate_payment(amount_cents, current.remaining().cents())
            .map_err(CoreError::from)?;

        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO debt_payments (id, debt_id, amount_cents, method, notes, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(debt_id)
        .bind(amount_cents)
        .bind(method)
        .bind(&notes)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE debts
            SET paid_cents = paid_cents + ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(debt_id)
        .bind(amount_cents)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let updated = Debt {
            paid_cents: current.paid_cents + amount_cents,
            updated_at: now,
            ..current
        };

        info!(
            debt_id = %debt_id,
            amount_cents,
            remaining = %updated.remaining(),
            "Recorded debt payment"
        );

        Ok(updated)
    }

    /// Lists the payments made against a debt, oldest first.
    pub async fn payments(&self, debt_id: &str) -> DbResult<Vec<DebtPayment>> {
        let payments = sqlx::query_as::<_, DebtPayment>(
            r#"
            SELECT id, debt_id, amount_cents, method, notes, created_at
            FROM debt_payments
            WHERE debt_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(debt_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::customer::NewCustomer;
    use duka_core::{DebtStatus, ValidationError};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_customer(db: &Database) -> String {
        db.customers()
            .create(NewCustomer {
                name: "Asha".to_string(),
                ..Default::default()
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_and_derive_status() {
        let db = db().await;
        let customer = seed_customer(&db).await;
        let due = NaiveDate::from_ymd_opt(2026, 9, 30).unwrap();

        let debt = db
            .debts()
            .create(NewDebt {
                customer_id: customer,
                amount_cents: 10_000,
                due_date: due,
                description: Some("School supplies".to_string()),
            })
            .await
            .unwrap();

        let before_due = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let after_due = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        assert_eq!(debt.status(before_due), DebtStatus::Open);
        assert_eq!(debt.status(due), DebtStatus::Open);
        assert_eq!(debt.status(after_due), DebtStatus::Overdue);
    }

    /// The reference payment scenario: a 10 000 debt past its due date is
    /// overdue; paying 10 000 makes it paid, and paid absorbs overdue.
    #[tokio::test]
    async fn test_full_payment_absorbs_overdue() {
        let db = db().await;
        let customer = seed_customer(&db).await;
        let due = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();

        let debt = db
            .debts()
            .create(NewDebt {
                customer_id: customer,
                amount_cents: 10_000,
                due_date: due,
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(debt.status(today), DebtStatus::Overdue);

        let paid = db
            .debts()
            .record_payment(&debt.id, 10_000, PaymentMethod::Cash, None)
            .await
            .unwrap();
        assert_eq!(paid.remaining().cents(), 0);
        assert_eq!(paid.status(today), DebtStatus::Paid);
    }

    #[tokio::test]
    async fn test_partial_payments_accumulate() {
        let db = db().await;
        let customer = seed_customer(&db).await;

        let debt = db
            .debts()
            .create(NewDebt {
                customer_id: customer,
                amount_cents: 5_000,
                due_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
                description: None,
            })
            .await
            .unwrap();

        db.debts()
            .record_payment(&debt.id, 2_000, PaymentMethod::Cash, None)
            .await
            .unwrap();
        let after = db
            .debts()
            .record_payment(&debt.id, 1_500, PaymentMethod::MobileMoney, None)
            .await
            .unwrap();

        assert_eq!(after.paid_cents, 3_500);
        assert_eq!(after.remaining().cents(), 1_500);

        let trail = db.debts().payments(&debt.id).await.unwrap();
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[0].amount_cents, 2_000);
        assert_eq!(trail[1].method, PaymentMethod::MobileMoney);
    }

    #[tokio::test]
    async fn test_overpayment_rejected_unchanged() {
        let db = db().await;
        let customer = seed_customer(&db).await;

        let debt = db
            .debts()
            .create(NewDebt {
                customer_id: customer,
                amount_cents: 3_000,
                due_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
                description: None,
            })
            .await
            .unwrap();

        let err = db
            .debts()
            .record_payment(&debt.id, 3_001, PaymentMethod::Cash, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::Validation(ValidationError::Overpayment { .. }))
        ));

        // Balance and audit trail untouched.
        let unchanged = db.debts().get_by_id(&debt.id).await.unwrap().unwrap();
        assert_eq!(unchanged.paid_cents, 0);
        assert!(db.debts().payments(&debt.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_unpaid_and_overdue() {
        let db = db().await;
        let customer = seed_customer(&db).await;
        let today = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();

        let overdue = db
            .debts()
            .create(NewDebt {
                customer_id: customer.clone(),
                amount_cents: 1_000,
                due_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                description: None,
            })
            .await
            .unwrap();
        let open = db
            .debts()
            .create(NewDebt {
                customer_id: customer.clone(),
                amount_cents: 2_000,
                due_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
                description: None,
            })
            .await
            .unwrap();
        let settled = db
            .debts()
            .create(NewDebt {
                customer_id: customer,
                amount_cents: 500,
                due_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                description: None,
            })
            .await
            .unwrap();
        db.debts()
            .record_payment(&settled.id, 500, PaymentMethod::Cash, None)
            .await
            .unwrap();

        let unpaid = db.debts().list_unpaid().await.unwrap();
        assert_eq!(unpaid.len(), 2);
        // Soonest due first.
        assert_eq!(unpaid[0].id, overdue.id);
        assert_eq!(unpaid[1].id, open.id);

        let late = db.debts().list_overdue(today).await.unwrap();
        assert_eq!(late.len(), 1);
        assert_eq!(late[0].id, overdue.id);
    }

    #[tokio::test]
    async fn test_payment_on_missing_debt() {
        let db = db().await;
        let err = db
            .debts()
            .record_payment("no-such-id", 100, PaymentMethod::Cash, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
