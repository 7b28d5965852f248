//! # Item Repository
//!
//! Database operations for stationery items (the inventory).
//!
//! ## Stock Adjustment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  Guarded Delta Update                           │
//! │                                                                 │
//! │  ❌ WRONG: read-check-write (racy between requests)             │
//! │     let item = get(id); if item.stock >= 3 { set(stock - 3) }   │
//! │                                                                 │
//! │  ✅ CORRECT: single guarded statement                           │
//! │     UPDATE stationery_items                                     │
//! │     SET stock_quantity = stock_quantity + :delta                │
//! │     WHERE id = :id AND stock_quantity + :delta >= 0             │
//! │                                                                 │
//! │  Zero rows affected = the guard failed; state is untouched      │
//! │  and the caller gets InsufficientStock. A CHECK constraint      │
//! │  backstops the invariant at the schema level.                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use duka_core::{sku, validation, CoreError, StationeryItem};

/// Input for creating a new stationery item.
///
/// Leave `sku` as `None` to have one generated from the category and
/// item names (`CAT-NAM-YY-NNN`).
#[derive(Debug, Clone)]
pub struct NewItem {
    pub sku: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub category_id: String,
    pub supplier_id: Option<String>,
    pub unit_price_cents: i64,
    pub cost_price_cents: i64,
    pub stock_quantity: i64,
    pub minimum_stock: i64,
}

/// Repository for stationery item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Creates an item on intake.
    ///
    /// ## Errors
    /// - validation errors for bad fields
    /// - `UniqueViolation` for a duplicate SKU
    /// - `ForeignKeyViolation` for an unknown category/supplier
    pub async fn create(&self, new: NewItem) -> DbResult<StationeryItem> {
        validation::validate_name(&new.name).map_err(CoreError::from)?;
        validation::validate_price_cents(new.unit_price_cents).map_err(CoreError::from)?;
        validation::validate_price_cents(new.cost_price_cents).map_err(CoreError::from)?;
        validation::validate_stock_level(new.stock_quantity).map_err(CoreError::from)?;
        validation::validate_stock_level(new.minimum_stock).map_err(CoreError::from)?;

        let sku = match &new.sku {
            Some(explicit) => {
                validation::validate_sku(explicit).map_err(CoreError::from)?;
                explicit.trim().to_string()
            }
            None => self.next_sku(&new.category_id, &new.name).await?,
        };

        let now = Utc::now();
        let item = StationeryItem {
            id: Uuid::new_v4().to_string(),
            sku,
            name: new.name.trim().to_string(),
            description: new.description,
            category_id: new.category_id,
            supplier_id: new.supplier_id,
            unit_price_cents: new.unit_price_cents,
            cost_price_cents: new.cost_price_cents,
            stock_quantity: new.stock_quantity,
            minimum_stock: new.minimum_stock,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        debug!(sku = %item.sku, name = %item.name, "Creating item");

        sqlx::query(
            r#"
            INSERT INTO stationery_items (
                id, sku, name, description, category_id, supplier_id,
                unit_price_cents, cost_price_cents, stock_quantity, minimum_stock,
                is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&item.id)
        .bind(&item.sku)
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.category_id)
        .bind(&item.supplier_id)
        .bind(item.unit_price_cents)
        .bind(item.cost_price_cents)
        .bind(item.stock_quantity)
        .bind(item.minimum_stock)
        .bind(item.is_active)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    /// Generates the next free SKU for a category/name pair.
    async fn next_sku(&self, category_id: &str, name: &str) -> DbResult<String> {
        let category_name: Option<String> =
            sqlx::query_scalar("SELECT name FROM categories WHERE id = ?1")
                .bind(category_id)
                .fetch_optional(&self.pool)
                .await?;

        let category_name =
            category_name.ok_or_else(|| DbError::not_found("Category", category_id))?;

        let today = Utc::now().date_naive();
        let mut seq: u32 = 1;

        loop {
            let candidate = sku::generate_sku(&category_name, name, today, seq);
            if self.get_by_sku(&candidate).await?.is_none() {
                return Ok(candidate);
            }
            seq += 1;
        }
    }

    /// Gets an item by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<StationeryItem>> {
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
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Gets an item by its SKU.
    pub async fn get_by_sku(&self, sku: &str) -> DbResult<Option<StationeryItem>> {
        let item = sqlx::query_as::<_, StationeryItem>(
            r#"
            SELECT id, sku, name, description, category_id, supplier_id,
                   unit_price_cents, cost_price_cents, stock_quantity, minimum_stock,
                   is_active, created_at, updated_at
            FROM stationery_items
            WHERE sku = ?1
            "#,
        )
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Updates an item's catalog fields (name, prices, threshold, ...).
    ///
    /// Stock is NOT updated here; use [`adjust_stock`](Self::adjust_stock)
    /// so every movement goes through the non-negative guard.
    pub async fn update(&self, item: &StationeryItem) -> DbResult<()> {
        validation::validate_sku(&item.sku).map_err(CoreError::from)?;
        validation::validate_name(&item.name).map_err(CoreError::from)?;
        validation::validate_price_cents(item.unit_price_cents).map_err(CoreError::from)?;
        validation::validate_price_cents(item.cost_price_cents).map_err(CoreError::from)?;
        validation::validate_stock_level(item.minimum_stock).map_err(CoreError::from)?;

        debug!(id = %item.id, "Updating item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE stationery_items SET
                sku = ?2,
                name = ?3,
                description = ?4,
                category_id = ?5,
                supplier_id = ?6,
                unit_price_cents = ?7,
                cost_price_cents = ?8,
                minimum_stock = ?9,
                is_active = ?10,
                updated_at = ?11
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(&item.sku)
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.category_id)
        .bind(&item.supplier_id)
        .bind(item.unit_price_cents)
        .bind(item.cost_price_cents)
        .bind(item.minimum_stock)
        .bind(item.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", &item.id));
        }

        Ok(())
    }

    /// Adjusts stock by a delta (negative for sales, positive for
    /// restocking).
    ///
    /// Atomic: the guard refuses any adjustment that would leave stock
    /// negative, and a refused adjustment changes nothing.
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> DbResult<()> {
        debug!(id = %id, delta = %delta, "Adjusting stock");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE stationery_items
            SET stock_quantity = stock_quantity + ?2,
                updated_at = ?3
            WHERE id = ?1 AND stock_quantity + ?2 >= 0
            "#,
        )
        .bind(id)
        .bind(delta)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Guard failed: distinguish a missing item from short stock.
            let item = self
                .get_by_id(id)
                .await?
                .ok_or_else(|| DbError::not_found("Item", id))?;

            return Err(CoreError::InsufficientStock {
                sku: item.sku,
                available: item.stock_quantity,
                requested: -delta,
            }
            .into());
        }

        Ok(())
    }

    /// Lists active items ordered by name.
    pub async fn list_active(&self) -> DbResult<Vec<StationeryItem>> {
        let items = sqlx::query_as::<_, StationeryItem>(
            r#"
            SELECT id, sku, name, description, category_id, supplier_id,
                   unit_price_cents, cost_price_cents, stock_quantity, minimum_stock,
                   is_active, created_at, updated_at
            FROM stationery_items
            WHERE is_active = 1
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Searches active items by name or SKU substring.
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<StationeryItem>> {
        let query = validation::validate_search_query(query).map_err(CoreError::from)?;

        if query.is_empty() {
            return self.list_active().await;
        }

        let pattern = format!("%{}%", query);

        let items = sqlx::query_as::<_, StationeryItem>(
            r#"
            SELECT id, sku, name, description, category_id, supplier_id,
                   unit_price_cents, cost_price_cents, stock_quantity, minimum_stock,
                   is_active, created_at, updated_at
            FROM stationery_items
            WHERE is_active = 1 AND (name LIKE ?1 OR sku LIKE ?1)
            ORDER BY name
            LIMIT ?2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists active items whose stock is strictly below their minimum.
    ///
    /// The predicate lives in SQL here for the list query; it matches
    /// `StationeryItem::is_low_stock` exactly.
    pub async fn low_stock(&self) -> DbResult<Vec<StationeryItem>> {
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

    /// Soft-deletes an item. Sales history keeps referencing it.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting item");

        let now = Utc::now();

        let result =
            sqlx::query("UPDATE stationery_items SET is_active = 0, updated_at = ?2 WHERE id = ?1")
                .bind(id)
                .bind(now)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    /// Counts active items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM stationery_items WHERE is_active = 1")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_item(db: &Database, sku: &str, stock: i64, minimum: i64) -> StationeryItem {
        let category = db.categories().get_or_create("Pens", None).await.unwrap();
        db.items()
            .create(NewItem {
                sku: Some(sku.to_string()),
                name: format!("Item {sku}"),
                description: None,
                category_id: category.id,
                supplier_id: None,
                unit_price_cents: 1000,
                cost_price_cents: 800,
                stock_quantity: stock,
                minimum_stock: minimum,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_by_sku() {
        let db = db().await;
        let item = seed_item(&db, "PEN-001", 10, 5).await;

        let fetched = db.items().get_by_sku("PEN-001").await.unwrap().unwrap();
        assert_eq!(fetched.id, item.id);
        assert_eq!(fetched.stock_quantity, 10);
    }

    #[tokio::test]
    async fn test_duplicate_sku_rejected() {
        let db = db().await;
        seed_item(&db, "PEN-001", 10, 5).await;

        let category = db.categories().get_or_create("Pens", None).await.unwrap();
        let err = db
            .items()
            .create(NewItem {
                sku: Some("PEN-001".to_string()),
                name: "Another pen".to_string(),
                description: None,
                category_id: category.id,
                supplier_id: None,
                unit_price_cents: 500,
                cost_price_cents: 300,
                stock_quantity: 0,
                minimum_stock: 0,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_generated_sku() {
        let db = db().await;
        let category = db.categories().get_or_create("Pens", None).await.unwrap();

        let first = db
            .items()
            .create(NewItem {
                sku: None,
                name: "Bic Ballpoint".to_string(),
                description: None,
                category_id: category.id.clone(),
                supplier_id: None,
                unit_price_cents: 1000,
                cost_price_cents: 800,
                stock_quantity: 0,
                minimum_stock: 0,
            })
            .await
            .unwrap();
        assert!(first.sku.starts_with("PEN-BIC-"));
        assert!(first.sku.ends_with("-001"));

        // Same name on the same day rolls the sequence.
        let second = db
            .items()
            .create(NewItem {
                sku: None,
                name: "Bic Ballpoint".to_string(),
                description: None,
                category_id: category.id,
                supplier_id: None,
                unit_price_cents: 1000,
                cost_price_cents: 800,
                stock_quantity: 0,
                minimum_stock: 0,
            })
            .await
            .unwrap();
        assert!(second.sku.ends_with("-002"));
    }

    #[tokio::test]
    async fn test_adjust_stock_increments_and_decrements() {
        let db = db().await;
        let item = seed_item(&db, "PEN-001", 10, 5).await;

        db.items().adjust_stock(&item.id, -3).await.unwrap();
        db.items().adjust_stock(&item.id, 5).await.unwrap();

        let fetched = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(fetched.stock_quantity, 12);
    }

    /// The reference low-stock scenario: stock 5 / minimum 10 is low;
    /// decrementing to 0 keeps it low; pushing below 0 fails and leaves
    /// stock unchanged.
    #[tokio::test]
    async fn test_adjust_stock_never_goes_negative() {
        let db = db().await;
        let item = seed_item(&db, "PEN-001", 5, 10).await;

        assert!(item.is_low_stock());

        db.items().adjust_stock(&item.id, -5).await.unwrap();
        let at_zero = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(at_zero.stock_quantity, 0);
        assert!(at_zero.is_low_stock());

        let err = db.items().adjust_stock(&item.id, -1).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientStock { .. })
        ));

        let unchanged = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(unchanged.stock_quantity, 0);
    }

    #[tokio::test]
    async fn test_adjust_stock_missing_item() {
        let db = db().await;
        let err = db.items().adjust_stock("no-such-id", -1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_low_stock_list() {
        let db = db().await;
        seed_item(&db, "LOW-001", 2, 10).await;
        seed_item(&db, "OK-001", 20, 10).await;
        // Exactly at minimum is not low.
        seed_item(&db, "EDGE-001", 10, 10).await;

        let low = db.items().low_stock().await.unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].sku, "LOW-001");
    }

    #[tokio::test]
    async fn test_search_matches_name_and_sku() {
        let db = db().await;
        seed_item(&db, "PEN-001", 5, 0).await;
        seed_item(&db, "PAPER-001", 5, 0).await;

        let by_sku = db.items().search("PAPER", 10).await.unwrap();
        assert_eq!(by_sku.len(), 1);

        let by_name = db.items().search("Item PEN", 10).await.unwrap();
        assert_eq!(by_name.len(), 1);
    }

    #[tokio::test]
    async fn test_soft_delete_hides_from_lists() {
        let db = db().await;
        let item = seed_item(&db, "PEN-001", 5, 0).await;

        db.items().soft_delete(&item.id).await.unwrap();
        assert!(db.items().list_active().await.unwrap().is_empty());
        assert_eq!(db.items().count().await.unwrap(), 0);
        // Still reachable by id for history.
        assert!(db.items().get_by_id(&item.id).await.unwrap().is_some());
    }
}
