use async_trait::async_trait;
use chrono::Utc;
use shared::CategoryKind;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{decode_category_kind, is_unique_violation};
use crate::domain::models::{Category, NewCategory};
use crate::error::{Result, TrackerError};
use crate::storage::connection::DbConnection;
use crate::storage::traits::CategoryStorage;

/// Repository for category operations
#[derive(Clone)]
pub struct CategoryRepository {
    db: DbConnection,
}

impl CategoryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_category(row: &SqliteRow) -> std::result::Result<Category, sqlx::Error> {
        Ok(Category {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            kind: decode_category_kind(row, "kind")?,
            color: row.try_get("color")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn map_write_error(err: sqlx::Error, name: &str) -> TrackerError {
        if is_unique_violation(&err) {
            TrackerError::Duplicate(format!("A category named '{}' already exists", name))
        } else {
            TrackerError::Storage(err)
        }
    }
}

#[async_trait]
impl CategoryStorage for CategoryRepository {
    async fn store_category(&self, category: &NewCategory) -> Result<Category> {
        let created_at = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO categories (name, kind, color, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&category.name)
        .bind(category.kind.as_str())
        .bind(&category.color)
        .bind(created_at)
        .execute(self.db.pool())
        .await
        .map_err(|e| Self::map_write_error(e, &category.name))?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: category.name.clone(),
            kind: category.kind,
            color: category.color.clone(),
            created_at,
        })
    }

    async fn get_category(&self, category_id: i64) -> Result<Option<Category>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, kind, color, created_at
            FROM categories
            WHERE id = ?
            "#,
        )
        .bind(category_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_category).transpose()?)
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, kind, color, created_at
            FROM categories
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_category).transpose()?)
    }

    async fn list_categories(&self, kind: Option<CategoryKind>) -> Result<Vec<Category>> {
        let rows = match kind {
            Some(kind) => {
                sqlx::query(
                    r#"
                    SELECT id, name, kind, color, created_at
                    FROM categories
                    WHERE kind = ?
                    ORDER BY name ASC
                    "#,
                )
                .bind(kind.as_str())
                .fetch_all(self.db.pool())
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, name, kind, color, created_at
                    FROM categories
                    ORDER BY kind ASC, name ASC
                    "#,
                )
                .fetch_all(self.db.pool())
                .await?
            }
        };

        let categories = rows
            .iter()
            .map(Self::row_to_category)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    async fn update_category(&self, category: &Category) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = ?, kind = ?, color = ?
            WHERE id = ?
            "#,
        )
        .bind(&category.name)
        .bind(category.kind.as_str())
        .bind(&category.color)
        .bind(category.id)
        .execute(self.db.pool())
        .await
        .map_err(|e| Self::map_write_error(e, &category.name))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_category(&self, category_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(category_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_category_references(&self, category_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT
                (SELECT COUNT(*) FROM expenses WHERE category_id = ?)
              + (SELECT COUNT(*) FROM income WHERE category_id = ?)
              + (SELECT COUNT(*) FROM budgets WHERE category_id = ?)
            "#,
        )
        .bind(category_id)
        .bind(category_id)
        .bind(category_id)
        .fetch_one(self.db.pool())
        .await?;
        Ok(count)
    }
}
