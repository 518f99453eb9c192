use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use shared::TransactionKind;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};
use std::collections::BTreeMap;

use super::{decode_amount, encode_amount};
use crate::domain::models::{DateRange, NewTransaction, Transaction};
use crate::error::{Result, TrackerError};
use crate::storage::connection::DbConnection;
use crate::storage::traits::{CategorySum, TransactionStorage};

const SELECT_COLUMNS: &str = r#"
    SELECT t.id, t.category_id, c.name AS category_name, c.color AS category_color,
           t.amount, t.description, t.date, t.created_at
"#;

/// Repository for the `expenses` and `income` tables
#[derive(Clone)]
pub struct TransactionRepository {
    db: DbConnection,
}

impl TransactionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn table(kind: TransactionKind) -> &'static str {
        match kind {
            TransactionKind::Expense => "expenses",
            TransactionKind::Income => "income",
        }
    }

    fn row_to_transaction(kind: TransactionKind, row: &SqliteRow) -> std::result::Result<Transaction, sqlx::Error> {
        Ok(Transaction {
            id: row.try_get("id")?,
            kind,
            category_id: row.try_get("category_id")?,
            category_name: row.try_get("category_name")?,
            category_color: row.try_get("category_color")?,
            amount: decode_amount(row, "amount")?,
            description: row.try_get("description")?,
            date: row.try_get("date")?,
            created_at: row.try_get("created_at")?,
        })
    }

    /// Appends `AND` clauses for the optional range and category
    fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, range: Option<DateRange>, category_id: Option<i64>) {
        if let Some(range) = range {
            builder
                .push(" AND t.date BETWEEN ")
                .push_bind(range.start)
                .push(" AND ")
                .push_bind(range.end);
        }
        if let Some(category_id) = category_id {
            builder.push(" AND t.category_id = ").push_bind(category_id);
        }
    }
}

#[async_trait]
impl TransactionStorage for TransactionRepository {
    async fn store_transaction(&self, kind: TransactionKind, transaction: &NewTransaction) -> Result<Transaction> {
        let sql = format!(
            "INSERT INTO {} (category_id, amount, description, date, created_at) VALUES (?, ?, ?, ?, ?)",
            Self::table(kind)
        );
        let result = sqlx::query(&sql)
            .bind(transaction.category_id)
            .bind(encode_amount(transaction.amount))
            .bind(&transaction.description)
            .bind(transaction.date)
            .bind(Utc::now())
            .execute(self.db.pool())
            .await?;

        self.get_transaction(kind, result.last_insert_rowid())
            .await?
            .ok_or_else(|| sqlx::Error::RowNotFound.into())
    }

    async fn get_transaction(&self, kind: TransactionKind, transaction_id: i64) -> Result<Option<Transaction>> {
        let sql = format!(
            "{} FROM {} t JOIN categories c ON c.id = t.category_id WHERE t.id = ?",
            SELECT_COLUMNS,
            Self::table(kind)
        );
        let row = sqlx::query(&sql)
            .bind(transaction_id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row
            .as_ref()
            .map(|r| Self::row_to_transaction(kind, r))
            .transpose()?)
    }

    async fn list_transactions(
        &self,
        kind: TransactionKind,
        range: Option<DateRange>,
        category_id: Option<i64>,
    ) -> Result<Vec<Transaction>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_COLUMNS);
        builder.push(format!(
            " FROM {} t JOIN categories c ON c.id = t.category_id WHERE 1 = 1",
            Self::table(kind)
        ));
        Self::push_filters(&mut builder, range, category_id);
        builder.push(" ORDER BY t.date DESC, t.id DESC");

        let rows = builder.build().fetch_all(self.db.pool()).await?;
        let transactions = rows
            .iter()
            .map(|r| Self::row_to_transaction(kind, r))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(transactions)
    }

    async fn update_transaction(&self, kind: TransactionKind, transaction_id: i64, transaction: &NewTransaction) -> Result<bool> {
        let sql = format!(
            "UPDATE {} SET category_id = ?, amount = ?, description = ?, date = ? WHERE id = ?",
            Self::table(kind)
        );
        let result = sqlx::query(&sql)
            .bind(transaction.category_id)
            .bind(encode_amount(transaction.amount))
            .bind(&transaction.description)
            .bind(transaction.date)
            .bind(transaction_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_transaction(&self, kind: TransactionKind, transaction_id: i64) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?", Self::table(kind));
        let result = sqlx::query(&sql)
            .bind(transaction_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn sum_amounts(&self, kind: TransactionKind, range: DateRange, category_id: Option<i64>) -> Result<Decimal> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT t.amount FROM {} t WHERE 1 = 1",
            Self::table(kind)
        ));
        Self::push_filters(&mut builder, Some(range), category_id);

        let rows = builder.build().fetch_all(self.db.pool()).await?;
        let mut total = Decimal::ZERO;
        for row in &rows {
            total = total
                .checked_add(decode_amount(row, "amount")?)
                .ok_or_else(|| TrackerError::overflow(format!("sum of {}", Self::table(kind))))?;
        }
        Ok(total)
    }

    async fn sum_by_category(&self, kind: TransactionKind, range: DateRange) -> Result<Vec<CategorySum>> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT t.category_id, c.name AS category_name, c.color AS category_color, t.amount \
             FROM {} t JOIN categories c ON c.id = t.category_id WHERE 1 = 1",
            Self::table(kind)
        ));
        Self::push_filters(&mut builder, Some(range), None);

        let rows = builder.build().fetch_all(self.db.pool()).await?;
        let mut sums: BTreeMap<i64, CategorySum> = BTreeMap::new();
        for row in &rows {
            let category_id: i64 = row.try_get("category_id")?;
            let amount = decode_amount(row, "amount")?;
            if let Some(sum) = sums.get_mut(&category_id) {
                sum.total = sum.total.checked_add(amount).ok_or_else(|| {
                    TrackerError::overflow(format!("{} total for category {}", Self::table(kind), category_id))
                })?;
                continue;
            }
            sums.insert(
                category_id,
                CategorySum {
                    category_id,
                    category_name: row.try_get("category_name")?,
                    color: row.try_get("category_color")?,
                    total: amount,
                },
            );
        }
        Ok(sums.into_values().collect())
    }

    async fn count_transactions(&self, kind: TransactionKind, range: DateRange) -> Result<i64> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT COUNT(*) FROM {} t WHERE 1 = 1",
            Self::table(kind)
        ));
        Self::push_filters(&mut builder, Some(range), None);

        let count: i64 = builder.build_query_scalar().fetch_one(self.db.pool()).await?;
        Ok(count)
    }
}
