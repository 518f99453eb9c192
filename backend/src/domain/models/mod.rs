//! Domain models for categories, transactions, budgets and summaries.
//!
//! These carry validated values (`Decimal` money, `NaiveDate` dates). The REST
//! layer converts them to the `shared` DTOs through the mappers in
//! `io::rest::mappers`.

pub mod budget;
pub mod category;
pub mod date_range;
pub mod summary;
pub mod transaction;

pub use budget::{derive_end_date, Budget, NewBudget};
pub use category::{Category, NewCategory, DEFAULT_CATEGORY_COLOR};
pub use date_range::DateRange;
pub use summary::{FinancialSummary, MonthlyTotals, SpendingInsights, HEALTH_SCORE_NEUTRAL};
pub use transaction::{NewTransaction, Transaction};
