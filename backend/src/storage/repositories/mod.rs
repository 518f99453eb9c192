//! SQLite repositories, one per table, plus the row decoding helpers they share.

pub mod budget_repository;
pub mod category_repository;
pub mod transaction_repository;

pub use budget_repository::BudgetRepository;
pub use category_repository::CategoryRepository;
pub use transaction_repository::TransactionRepository;

use rust_decimal::Decimal;
use shared::{BudgetPeriod, CategoryKind};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;

fn decode_error(column: &str, value: &str) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: format!("unexpected value '{}'", value).into(),
    }
}

/// Amounts are stored as decimal text so sums never pass through floating point
pub(crate) fn decode_amount(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    Decimal::from_str(&raw).map_err(|_| decode_error(column, &raw))
}

pub(crate) fn encode_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

pub(crate) fn decode_category_kind(row: &SqliteRow, column: &str) -> Result<CategoryKind, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    match raw.as_str() {
        "expense" => Ok(CategoryKind::Expense),
        "income" => Ok(CategoryKind::Income),
        _ => Err(decode_error(column, &raw)),
    }
}

pub(crate) fn decode_period(row: &SqliteRow, column: &str) -> Result<BudgetPeriod, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    match raw.as_str() {
        "weekly" => Ok(BudgetPeriod::Weekly),
        "monthly" => Ok(BudgetPeriod::Monthly),
        "yearly" => Ok(BudgetPeriod::Yearly),
        _ => Err(decode_error(column, &raw)),
    }
}

/// True when the error is a UNIQUE constraint failure
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    //! Fixtures for repository and service tests.

    use chrono::NaiveDate;
    use shared::CategoryKind;

    use crate::domain::models::{Category, NewCategory};
    use crate::storage::{CategoryRepository, CategoryStorage, DbConnection};

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub async fn seed_category(db: &DbConnection, name: &str, kind: CategoryKind) -> Category {
        CategoryRepository::new(db.clone())
            .store_category(&NewCategory {
                name: name.to_string(),
                kind,
                color: "#3498db".to_string(),
            })
            .await
            .expect("Failed to seed category")
    }
}
