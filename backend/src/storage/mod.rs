//! # Storage Module
//!
//! Handles all data persistence for the budget tracker.
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: SQLite through an `sqlx` connection pool
//! - **Schema**: `categories`, `expenses`, `income` and `budgets`, with
//!   `ON DELETE CASCADE` from each dependent table to `categories`
//! - **Money**: stored as decimal text and summed as `rust_decimal::Decimal`,
//!   never through SQLite floating point
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: one repository per table, created by a [`Connection`]
//! - **Dependency Inversion**: domain services depend on the traits in [`traits`]
//! - **Explicit injection**: the pool is built once at startup and passed down;
//!   there is no global handle

pub mod connection;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use repositories::{BudgetRepository, CategoryRepository, TransactionRepository};
pub use traits::{BudgetStorage, CategoryStorage, CategorySum, Connection, TransactionStorage};
