use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::TransactionKind;

/// An expense or income row, joined with its category's name and color
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub kind: TransactionKind,
    pub category_id: i64,
    pub category_name: String,
    pub category_color: String,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for inserting or updating an expense or income row
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub category_id: i64,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
}
