//! # Domain Module
//!
//! Contains all business logic for the budget tracker.
//!
//! The services here validate input, enforce the rules that tie records to
//! categories, and compute the aggregates shown to the user. They are generic
//! over [`crate::storage::Connection`] and never name a concrete database.
//!
//! ## Module Organization
//!
//! - **models**: validated domain records and value types (`DateRange`, `FinancialSummary`)
//! - **validation**: parsing of amounts, dates, descriptions, names and colors
//! - **budget_status**: spent/remaining/percentage and the status tiers
//! - **transaction_filter**: the combined expense/income filter
//! - **category_service**, **transaction_service**, **budget_service**, **summary_service**
//!
//! ## Business Rules
//!
//! - Amounts are strictly positive with at most two decimal places
//! - Descriptions are non-empty after trimming
//! - Expenses and budgets reference expense categories; income references income categories
//! - A budget's end date is always derived from its start date and period
//! - Status tiers: below 70% "On Track", below 90% "Near Limit", otherwise "Over Budget"
//! - Aggregates over ranges with no data are zero or empty, never an error

pub mod budget_service;
pub mod budget_status;
pub mod category_service;
pub mod models;
pub mod summary_service;
pub mod transaction_filter;
pub mod transaction_service;
pub mod validation;

pub use budget_service::{BudgetReport, BudgetService};
pub use category_service::CategoryService;
pub use summary_service::SummaryService;
pub use transaction_filter::TransactionFilter;
pub use transaction_service::TransactionService;
