//! Request and response types shared between the budget tracker API and its clients.
//!
//! Money is carried as `rust_decimal::Decimal` and serialized as a JSON number.
//! Amounts in create/update requests are plain strings so that malformed input
//! reaches the domain layer and is reported as a validation error instead of
//! being rejected by the JSON extractor.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a category classifies spending or earnings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Expense,
    Income,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Expense => "expense",
            CategoryKind::Income => "income",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub kind: CategoryKind,
    /// Display color in `#rrggbb` form
    pub color: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub kind: CategoryKind,
    /// Defaults to `#3498db` when omitted
    pub color: Option<String>,
}

/// Partial update; absent fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub color: Option<String>,
    pub kind: Option<CategoryKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
}

/// Type of a recorded transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Income => "income",
        }
    }

    /// Category kind a transaction of this type must reference
    pub fn category_kind(&self) -> CategoryKind {
        match self {
            TransactionKind::Expense => CategoryKind::Expense,
            TransactionKind::Income => CategoryKind::Income,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An expense or an income record, joined with its category for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub kind: TransactionKind,
    pub category_id: i64,
    pub category_name: String,
    pub category_color: String,
    /// Always positive; the kind carries the direction
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/expenses`, `POST /api/income` and their `PUT` counterparts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub category_id: i64,
    /// Decimal amount as entered, e.g. `"12.50"`
    pub amount: String,
    pub description: String,
    /// ISO date, `YYYY-MM-DD`
    pub date: String,
}

pub type UpdateTransactionRequest = CreateTransactionRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<Transaction>,
    pub count: usize,
}

/// Renewal cadence of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category_id: i64,
    pub category_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    /// Derived from `start_date` and `period`
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBudgetRequest {
    pub category_id: i64,
    pub amount: String,
    pub period: BudgetPeriod,
    /// ISO date, `YYYY-MM-DD`
    pub start_date: String,
}

pub type UpdateBudgetRequest = CreateBudgetRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetStatusLabel {
    #[serde(rename = "On Track")]
    OnTrack,
    #[serde(rename = "Near Limit")]
    NearLimit,
    #[serde(rename = "Over Budget")]
    OverBudget,
}

impl BudgetStatusLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatusLabel::OnTrack => "On Track",
            BudgetStatusLabel::NearLimit => "Near Limit",
            BudgetStatusLabel::OverBudget => "Over Budget",
        }
    }
}

impl fmt::Display for BudgetStatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A budget together with how much of it has been used
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatusReport {
    pub budget: Budget,
    #[serde(with = "rust_decimal::serde::float")]
    pub spent: Decimal,
    /// May be negative once the budget is exceeded
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
    /// Percentage capped at 100 for progress bars
    #[serde(with = "rust_decimal::serde::float")]
    pub progress: Decimal,
    pub status: BudgetStatusLabel,
    pub remaining_days: i64,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetListResponse {
    pub budgets: Vec<Budget>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatusListResponse {
    pub statuses: Vec<BudgetStatusReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalResponse {
    pub kind: TransactionKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub category_id: Option<i64>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category_id: i64,
    pub category_name: String,
    pub color: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotalsResponse {
    pub kind: TransactionKind,
    pub totals: Vec<CategoryTotal>,
}

/// Pie/bar chart payload: parallel label and value arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataResponse {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
    pub savings_rate: f64,
}

/// Indicators derived from the summary and the category breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub average_expense: f64,
    pub top_expense_category: Option<String>,
    /// 0 to 100, where 50 means income and expenses break even
    pub health_score: f64,
    pub transaction_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyDataResponse {
    /// `YYYY-MM`, oldest first
    pub months: Vec<String>,
    pub income: Vec<f64>,
    pub expenses: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&CategoryKind::Expense).unwrap(), "\"expense\"");
        assert_eq!(serde_json::to_string(&TransactionKind::Income).unwrap(), "\"income\"");
        let period: BudgetPeriod = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(period, BudgetPeriod::Monthly);
    }

    #[test]
    fn test_status_label_uses_display_text() {
        let json = serde_json::to_string(&BudgetStatusLabel::NearLimit).unwrap();
        assert_eq!(json, "\"Near Limit\"");
        assert_eq!(BudgetStatusLabel::OverBudget.to_string(), "Over Budget");
    }

    #[test]
    fn test_summary_uses_camel_case_numbers() {
        let summary = SummaryResponse {
            total_income: 1000.0,
            total_expenses: 250.5,
            net_balance: 749.5,
            savings_rate: 75.0,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["totalIncome"], 1000.0);
        assert_eq!(value["totalExpenses"], 250.5);
        assert_eq!(value["netBalance"], 749.5);
        assert_eq!(value["savingsRate"], 75.0);
    }

    #[test]
    fn test_analytics_uses_camel_case() {
        let analytics = AnalyticsResponse {
            average_expense: 12.5,
            top_expense_category: None,
            health_score: 50.0,
            transaction_count: 0,
        };
        let value = serde_json::to_value(&analytics).unwrap();
        assert_eq!(value["averageExpense"], 12.5);
        assert!(value["topExpenseCategory"].is_null());
        assert_eq!(value["healthScore"], 50.0);
        assert_eq!(value["transactionCount"], 0);
    }

    #[test]
    fn test_category_total_amount_is_json_number() {
        let total = CategoryTotal {
            category_id: 1,
            category_name: "Groceries".to_string(),
            color: "#3498db".to_string(),
            total: dec!(42.75),
        };
        let value = serde_json::to_value(&total).unwrap();
        assert!(value["total"].is_number());
        assert_eq!(value["total"], 42.75);
    }
}
