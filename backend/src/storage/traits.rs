//! # Storage Traits
//!
//! This module defines the storage abstraction traits that the domain services
//! are written against, so that the services never name a concrete backend.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{CategoryKind, TransactionKind};

use crate::domain::models::{
    Budget, Category, DateRange, NewBudget, NewCategory, NewTransaction, Transaction,
};
use crate::error::Result;

/// Raw per-category sum as read from storage, before any filtering or ordering
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySum {
    pub category_id: i64,
    pub category_name: String,
    pub color: String,
    pub total: Decimal,
}

/// Trait defining the interface for category storage operations
#[async_trait]
pub trait CategoryStorage: Send + Sync {
    /// Insert a category and return it with its assigned id
    async fn store_category(&self, category: &NewCategory) -> Result<Category>;

    async fn get_category(&self, category_id: i64) -> Result<Option<Category>>;

    /// Exact, case-sensitive name lookup
    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>>;

    /// List categories ordered by kind then name, optionally restricted to one kind
    async fn list_categories(&self, kind: Option<CategoryKind>) -> Result<Vec<Category>>;

    /// Returns true if a row was updated
    async fn update_category(&self, category: &Category) -> Result<bool>;

    /// Delete a category and, through the schema, its expenses, income and budgets
    async fn delete_category(&self, category_id: i64) -> Result<bool>;

    /// Number of expenses, income rows and budgets referencing the category
    async fn count_category_references(&self, category_id: i64) -> Result<i64>;
}

/// Trait defining the interface for expense and income storage.
///
/// Expenses and income live in separate tables with identical shape; `kind`
/// selects the table.
#[async_trait]
pub trait TransactionStorage: Send + Sync {
    async fn store_transaction(&self, kind: TransactionKind, transaction: &NewTransaction) -> Result<Transaction>;

    async fn get_transaction(&self, kind: TransactionKind, transaction_id: i64) -> Result<Option<Transaction>>;

    /// List rows of one kind, newest date first, optionally limited to a date
    /// range and/or a category
    async fn list_transactions(
        &self,
        kind: TransactionKind,
        range: Option<DateRange>,
        category_id: Option<i64>,
    ) -> Result<Vec<Transaction>>;

    async fn update_transaction(&self, kind: TransactionKind, transaction_id: i64, transaction: &NewTransaction) -> Result<bool>;

    async fn delete_transaction(&self, kind: TransactionKind, transaction_id: i64) -> Result<bool>;

    /// Exact sum of amounts in the range; zero when nothing matches
    async fn sum_amounts(&self, kind: TransactionKind, range: DateRange, category_id: Option<i64>) -> Result<Decimal>;

    /// Sum per category over the range; categories without rows are absent
    async fn sum_by_category(&self, kind: TransactionKind, range: DateRange) -> Result<Vec<CategorySum>>;

    async fn count_transactions(&self, kind: TransactionKind, range: DateRange) -> Result<i64>;
}

/// Trait defining the interface for budget storage operations
#[async_trait]
pub trait BudgetStorage: Send + Sync {
    async fn store_budget(&self, budget: &NewBudget) -> Result<Budget>;

    async fn get_budget(&self, budget_id: i64) -> Result<Option<Budget>>;

    /// All budgets, most recent start date first
    async fn list_budgets(&self) -> Result<Vec<Budget>>;

    /// Budgets whose window contains `today`
    async fn list_active_budgets(&self, today: NaiveDate) -> Result<Vec<Budget>>;

    /// Budgets for one category, most recent start date first
    async fn list_budgets_for_category(&self, category_id: i64) -> Result<Vec<Budget>>;

    async fn update_budget(&self, budget_id: i64, budget: &NewBudget) -> Result<bool>;

    async fn delete_budget(&self, budget_id: i64) -> Result<bool>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type and provides factory
/// methods for creating repositories.
pub trait Connection: Send + Sync + Clone {
    type CategoryRepository: CategoryStorage + Clone;
    type TransactionRepository: TransactionStorage + Clone;
    type BudgetRepository: BudgetStorage + Clone;

    fn create_category_repository(&self) -> Self::CategoryRepository;

    fn create_transaction_repository(&self) -> Self::TransactionRepository;

    fn create_budget_repository(&self) -> Self::BudgetRepository;
}
