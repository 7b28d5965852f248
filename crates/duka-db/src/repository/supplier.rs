//! # Supplier Repository
//!
//! Database operations for suppliers the shop restocks from.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use duka_core::{validation, Supplier};

/// Input for registering a new supplier.
#[derive(Debug, Clone, Default)]
pub struct NewSupplier {
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Repository for supplier database operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Registers a new supplier.
    pub async fn create(&self, new: NewSupplier) -> DbResult<Supplier> {
        validation::validate_name(&new.name).map_err(duka_core::CoreError::from)?;

        let supplier = Supplier {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            contact_person: new.contact_person,
            phone: new.phone,
            email: new.email,
            address: new.address,
            is_active: true,
            created_at: Utc::now(),
        };

        debug!(id = %supplier.id, name = %supplier.name, "Creating supplier");

        sqlx::query(
            r#"
            INSERT INTO suppliers (id, name, contact_person, phone, email, address, is_active, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&supplier.id)
        .bind(&supplier.name)
        .bind(&supplier.contact_person)
        .bind(&supplier.phone)
        .bind(&supplier.email)
        .bind(&supplier.address)
        .bind(supplier.is_active)
        .bind(supplier.created_at)
        .execute(&self.pool)
        .await?;

        Ok(supplier)
    }

    /// Gets a supplier by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, name, contact_person, phone, email, address, is_active, created_at
            FROM suppliers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }

    /// Updates a supplier's details.
    pub async fn update(&self, supplier: &Supplier) -> DbResult<()> {
        validation::validate_name(&supplier.name).map_err(duka_core::CoreError::from)?;

        let result = sqlx::query(
            r#"
            UPDATE suppliers SET
                name = ?2,
                contact_person = ?3,
                phone = ?4,
                email = ?5,
                address = ?6,
                is_active = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&supplier.id)
        .bind(&supplier.name)
        .bind(&supplier.contact_person)
        .bind(&supplier.phone)
        .bind(&supplier.email)
        .bind(&supplier.address)
        .bind(supplier.is_active)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", &supplier.id));
        }

        Ok(())
    }

    /// Lists active suppliers ordered by name.
    pub async fn list_active(&self) -> DbResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, name, contact_person, phone, email, address, is_active, created_at
            FROM suppliers
            WHERE is_active = 1
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(suppliers)
    }

    /// Deactivates a supplier.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting supplier");

        let result = sqlx::query("UPDATE suppliers SET is_active = 0 WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", id));
        }

        Ok(())
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

    #[tokio::test]
    async fn test_create_update_deactivate() {
        let db = db().await;
        let repo = db.suppliers();

        let mut supplier = repo
            .create(NewSupplier {
                name: "Karatasi Traders".to_string(),
                contact_person: Some("Mr. Hassan".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        supplier.phone = Some("+255 22 260 0000".to_string());
        repo.update(&supplier).await.unwrap();

        let fetched = repo.get_by_id(&supplier.id).await.unwrap().unwrap();
        assert_eq!(fetched.phone.as_deref(), Some("+255 22 260 0000"));

        repo.soft_delete(&supplier.id).await.unwrap();
        assert!(repo.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_supplier() {
        let db = db().await;
        let repo = db.suppliers();

        let ghost = Supplier {
            id: "no-such-id".to_string(),
            name: "Ghost".to_string(),
            contact_person: None,
            phone: None,
            email: None,
            address: None,
            is_active: true,
            created_at: Utc::now(),
        };

        let err = repo.update(&ghost).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
