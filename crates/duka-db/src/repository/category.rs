//! # Category Repository
//!
//! Database operations for item categories. Category names are unique;
//! a duplicate insert surfaces as [`DbError::UniqueViolation`].

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use duka_core::{validation, Category};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Creates a category. Name must be unique.
    pub async fn create(&self, name: &str, description: Option<&str>) -> DbResult<Category> {
        validation::validate_name(name).map_err(duka_core::CoreError::from)?;

        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            description: description.map(|d| d.to_string()),
            created_at: Utc::now(),
        };

        debug!(name = %category.name, "Creating category");

        sqlx::query(
            r#"
            INSERT INTO categories (id, name, description, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.created_at)
        .execute(&self.pool)
        .await?;

        Ok(category)
    }

    /// Gets a category by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, created_at FROM categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Gets a category by its unique name.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, created_at FROM categories WHERE name = ?1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Lists all categories ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, created_at FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets a category by name, creating it if missing.
    ///
    /// Used by seeding; mirrors get-or-create semantics.
    pub async fn get_or_create(&self, name: &str, description: Option<&str>) -> DbResult<Category> {
        if let Some(existing) = self.get_by_name(name).await? {
            return Ok(existing);
        }

        match self.create(name, description).await {
            Ok(created) => Ok(created),
            // Lost a race with a concurrent create; fetch the winner.
            Err(DbError::UniqueViolation { .. }) => self
                .get_by_name(name)
                .await?
                .ok_or_else(|| DbError::not_found("Category", name)),
            Err(e) => Err(e),
        }
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
    async fn test_create_and_list() {
        let db = db().await;
        let repo = db.categories();

        repo.create("Pens", Some("Ballpoint, gel, fountain"))
            .await
            .unwrap();
        repo.create("Paper", None).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        // Ordered by name
        assert_eq!(all[0].name, "Paper");
        assert_eq!(all[1].name, "Pens");
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let db = db().await;
        let repo = db.categories();

        repo.create("Pens", None).await.unwrap();
        let err = repo.create("Pens", None).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let db = db().await;
        let repo = db.categories();

        let first = repo.get_or_create("Notebooks", None).await.unwrap();
        let second = repo.get_or_create("Notebooks", None).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
