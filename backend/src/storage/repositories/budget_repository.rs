use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{decode_amount, decode_period, encode_amount};
use crate::domain::models::{Budget, NewBudget};
use crate::error::Result;
use crate::storage::connection::DbConnection;
use crate::storage::traits::BudgetStorage;

/// Repository for budget operations
#[derive(Clone)]
pub struct BudgetRepository {
    db: DbConnection,
}

impl BudgetRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_budget(row: &SqliteRow) -> std::result::Result<Budget, sqlx::Error> {
        Ok(Budget {
            id: row.try_get("id")?,
            category_id: row.try_get("category_id")?,
            category_name: row.try_get("category_name")?,
            amount: decode_amount(row, "amount")?,
            period: decode_period(row, "period")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn rows_to_budgets(rows: &[SqliteRow]) -> Result<Vec<Budget>> {
        let budgets = rows
            .iter()
            .map(Self::row_to_budget)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(budgets)
    }
}

#[async_trait]
impl BudgetStorage for BudgetRepository {
    async fn store_budget(&self, budget: &NewBudget) -> Result<Budget> {
        let result = sqlx::query(
            r#"
            INSERT INTO budgets (category_id, amount, period, start_date, end_date, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(budget.category_id)
        .bind(encode_amount(budget.amount))
        .bind(budget.period.as_str())
        .bind(budget.start_date)
        .bind(budget.end_date)
        .bind(Utc::now())
        .execute(self.db.pool())
        .await?;

        self.get_budget(result.last_insert_rowid())
            .await?
            .ok_or_else(|| sqlx::Error::RowNotFound.into())
    }

    async fn get_budget(&self, budget_id: i64) -> Result<Option<Budget>> {
        let row = sqlx::query(
            r#"
            SELECT b.id, b.category_id, c.name AS category_name, b.amount, b.period,
                   b.start_date, b.end_date, b.created_at
            FROM budgets b
            JOIN categories c ON c.id = b.category_id
            WHERE b.id = ?
            "#,
        )
        .bind(budget_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_budget).transpose()?)
    }

    async fn list_budgets(&self) -> Result<Vec<Budget>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.category_id, c.name AS category_name, b.amount, b.period,
                   b.start_date, b.end_date, b.created_at
            FROM budgets b
            JOIN categories c ON c.id = b.category_id
            ORDER BY b.start_date DESC, b.id DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Self::rows_to_budgets(&rows)
    }

    async fn list_active_budgets(&self, today: NaiveDate) -> Result<Vec<Budget>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.category_id, c.name AS category_name, b.amount, b.period,
                   b.start_date, b.end_date, b.created_at
            FROM budgets b
            JOIN categories c ON c.id = b.category_id
            WHERE ? BETWEEN b.start_date AND b.end_date
            ORDER BY c.name ASC, b.start_date DESC
            "#,
        )
        .bind(today)
        .fetch_all(self.db.pool())
        .await?;

        Self::rows_to_budgets(&rows)
    }

    async fn list_budgets_for_category(&self, category_id: i64) -> Result<Vec<Budget>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.category_id, c.name AS category_name, b.amount, b.period,
                   b.start_date, b.end_date, b.created_at
            FROM budgets b
            JOIN categories c ON c.id = b.category_id
            WHERE b.category_id = ?
            ORDER BY b.start_date DESC, b.id DESC
            "#,
        )
        .bind(category_id)
        .fetch_all(self.db.pool())
        .await?;

        Self::rows_to_budgets(&rows)
    }

    async fn update_budget(&self, budget_id: i64, budget: &NewBudget) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE budgets
            SET category_id = ?, amount = ?, period = ?, start_date = ?, end_date = ?
            WHERE id = ?
            "#,
        )
        .bind(budget.category_id)
        .bind(encode_amount(budget.amount))
        .bind(budget.period.as_str())
        .bind(budget.start_date)
        .bind(budget.end_date)
        .bind(budget_id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_budget(&self, budget_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = ?")
            .bind(budget_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::repositories::test_utils::{date, seed_category};
    use crate::storage::{CategoryRepository, CategoryStorage};
    use rust_decimal_macros::dec;
    use shared::{BudgetPeriod, CategoryKind};

    async fn setup_test() -> (DbConnection, BudgetRepository) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = BudgetRepository::new(db.clone());
        (db, repo)
    }

    fn monthly(category_id: i64, start: NaiveDate, end: NaiveDate) -> NewBudget {
        NewBudget {
            category_id,
            amount: dec!(400),
            period: BudgetPeriod::Monthly,
            start_date: start,
            end_date: end,
        }
    }

    #[tokio::test]
    async fn test_store_and_get_budget() {
        let (db, repo) = setup_test().await;
        let food = seed_category(&db, "Food", CategoryKind::Expense).await;

        let stored = repo.store_budget(&monthly(food.id, date(2024, 1, 15), date(2024, 2, 14))).await.unwrap();
        assert_eq!(stored.category_name, "Food");
        assert_eq!(stored.period, BudgetPeriod::Monthly);
        assert_eq!(stored.end_date, date(2024, 2, 14));
        assert_eq!(stored.amount, dec!(400));

        assert!(repo.get_budget(stored.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_active_budgets_use_inclusive_window() {
        let (db, repo) = setup_test().await;
        let food = seed_category(&db, "Food", CategoryKind::Expense).await;

        let january = repo.store_budget(&monthly(food.id, date(2024, 1, 1), date(2024, 1, 31))).await.unwrap();
        let february = repo.store_budget(&monthly(food.id, date(2024, 2, 1), date(2024, 2, 29))).await.unwrap();

        let on_last_day = repo.list_active_budgets(date(2024, 1, 31)).await.unwrap();
        assert_eq!(on_last_day.len(), 1);
        assert_eq!(on_last_day[0].id, january.id);

        let on_first_day = repo.list_active_budgets(date(2024, 2, 1)).await.unwrap();
        assert_eq!(on_first_day[0].id, february.id);

        assert!(repo.list_active_budgets(date(2024, 3, 1)).await.unwrap().is_empty());

        let all = repo.list_budgets().await.unwrap();
        assert_eq!(all.iter().map(|b| b.id).collect::<Vec<_>>(), vec![february.id, january.id]);

        assert_eq!(repo.list_budgets_for_category(food.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_delete_and_cascade() {
        let (db, repo) = setup_test().await;
        let food = seed_category(&db, "Food", CategoryKind::Expense).await;
        let stored = repo.store_budget(&monthly(food.id, date(2024, 1, 1), date(2024, 1, 31))).await.unwrap();

        let weekly = NewBudget {
            category_id: food.id,
            amount: dec!(80),
            period: BudgetPeriod::Weekly,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 7),
        };
        assert!(repo.update_budget(stored.id, &weekly).await.unwrap());
        let fetched = repo.get_budget(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.period, BudgetPeriod::Weekly);
        assert_eq!(fetched.end_date, date(2024, 1, 7));

        let second = repo.store_budget(&monthly(food.id, date(2024, 2, 1), date(2024, 2, 29))).await.unwrap();
        assert!(repo.delete_budget(second.id).await.unwrap());
        assert!(!repo.delete_budget(second.id).await.unwrap());

        CategoryRepository::new(db.clone()).delete_category(food.id).await.unwrap();
        assert!(repo.get_budget(stored.id).await.unwrap().is_none());
    }
}
