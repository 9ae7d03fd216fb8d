//! Menu category persistence.
//!
//! Categories are a flat list with unique names. Deleting a category
//! detaches its menu items (`ON DELETE SET NULL`) rather than deleting
//! them.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use brigade_types::{Category, CategoryId};

use crate::error::DbError;

/// Operations on the `categories` table.
pub struct CategoryStore<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryStore<'a> {
    /// Create a new category store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories by name.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list(&self) -> Result<Vec<Category>, DbError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r"SELECT id, name, created_at FROM categories ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Create a category with a unique name.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails (including a
    /// duplicate name rejected by the unique constraint).
    pub async fn create(&self, name: &str) -> Result<Category, DbError> {
        let id = CategoryId::new();
        let now = Utc::now();

        sqlx::query(r"INSERT INTO categories (id, name, created_at) VALUES ($1, $2, $3)")
            .bind(id.into_inner())
            .bind(name)
            .bind(now)
            .execute(self.pool)
            .await?;

        tracing::debug!(%id, name, "Created category");

        Ok(Category {
            id,
            name: name.to_owned(),
            created_at: now,
        })
    }

    /// Rename a category.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if the category does not exist.
    pub async fn rename(&self, id: CategoryId, name: &str) -> Result<Category, DbError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"UPDATE categories SET name = $1 WHERE id = $2 RETURNING id, name, created_at",
        )
        .bind(name)
        .bind(id.into_inner())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("category {id}")))?;

        Ok(row.into())
    }

    /// Delete a category, detaching its menu items.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if the category does not exist.
    pub async fn delete(&self, id: CategoryId) -> Result<(), DbError> {
        let result = sqlx::query(r"DELETE FROM categories WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("category {id}")));
        }

        tracing::debug!(%id, "Deleted category");
        Ok(())
    }
}

/// A row from the `categories` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::from(row.id),
            name: row.name,
            created_at: row.created_at,
        }
    }
}
