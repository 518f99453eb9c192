use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::error::Result;
use crate::storage::repositories::{BudgetRepository, CategoryRepository, TransactionRepository};
use crate::storage::traits::Connection;

/// The database URL used when none is configured
pub const DEFAULT_DATABASE_URL: &str = "sqlite:budget.db";

/// DbConnection owns the SQLite pool shared by every repository
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if missing) the database at `url` and set up the schema
    pub async fn new(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        Self::setup_schema(&pool).await?;
        info!("Database ready at {}", url);

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a private in-memory database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().simple().to_string();
        let db_url = format!("sqlite:file:memdb_{}?mode=memory&cache=shared", test_id);

        // A single connection keeps the in-memory database alive for the whole test
        Self::new(&db_url, 1).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                kind TEXT NOT NULL CHECK (kind IN ('expense', 'income')),
                color TEXT NOT NULL DEFAULT '#3498db',
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category_id INTEGER NOT NULL,
                amount TEXT NOT NULL,
                description TEXT NOT NULL,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (category_id) REFERENCES categories (id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS income (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category_id INTEGER NOT NULL,
                amount TEXT NOT NULL,
                description TEXT NOT NULL,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (category_id) REFERENCES categories (id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS budgets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category_id INTEGER NOT NULL,
                amount TEXT NOT NULL,
                period TEXT NOT NULL CHECK (period IN ('weekly', 'monthly', 'yearly')),
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (category_id) REFERENCES categories (id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        for statement in [
            "CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);",
            "CREATE INDEX IF NOT EXISTS idx_expenses_category_id ON expenses(category_id);",
            "CREATE INDEX IF NOT EXISTS idx_income_date ON income(date);",
            "CREATE INDEX IF NOT EXISTS idx_income_category_id ON income(category_id);",
            "CREATE INDEX IF NOT EXISTS idx_budgets_category_id ON budgets(category_id);",
        ] {
            sqlx::query(statement).execute(pool).await?;
        }

        Ok(())
    }
}

impl Connection for DbConnection {
    type CategoryRepository = CategoryRepository;
    type TransactionRepository = TransactionRepository;
    type BudgetRepository = BudgetRepository;

    fn create_category_repository(&self) -> Self::CategoryRepository {
        CategoryRepository::new(self.clone())
    }

    fn create_transaction_repository(&self) -> Self::TransactionRepository {
        TransactionRepository::new(self.clone())
    }

    fn create_budget_repository(&self) -> Self::BudgetRepository {
        BudgetRepository::new(self.clone())
    }
}
