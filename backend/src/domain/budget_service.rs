//! Budget management and budget status reporting.
//!
//! A budget limits spending in one expense category over a window derived
//! from its start date and period. The status report compares the limit
//! against the expenses recorded in that window.
use std::sync::Arc;

use chrono::NaiveDate;
use shared::{CategoryKind, CreateBudgetRequest, TransactionKind, UpdateBudgetRequest};
use tracing::{debug, info};

use crate::domain::budget_status::BudgetUsage;
use crate::domain::category_service::CategoryService;
use crate::domain::models::{derive_end_date, Budget, NewBudget};
use crate::domain::validation::{parse_amount, parse_date};
use crate::error::{Result, TrackerError};
use crate::storage::{BudgetStorage, Connection, TransactionStorage};

/// A budget with its usage as of a given day
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetReport {
    pub budget: Budget,
    pub usage: BudgetUsage,
    pub remaining_days: i64,
    pub active: bool,
}

#[derive(Clone)]
pub struct BudgetService<C: Connection> {
    budget_repository: C::BudgetRepository,
    transaction_repository: C::TransactionRepository,
    category_service: CategoryService<C>,
}

impl<C: Connection> BudgetService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            budget_repository: connection.create_budget_repository(),
            transaction_repository: connection.create_transaction_repository(),
            category_service: CategoryService::new(connection),
        }
    }

    async fn validate_request(&self, request: &CreateBudgetRequest) -> Result<NewBudget> {
        let amount = parse_amount(&request.amount)?;
        let start_date = parse_date(&request.start_date)?;
        let end_date = derive_end_date(request.period, start_date).ok_or_else(|| {
            TrackerError::validation(format!(
                "Start date {} is out of range for a {} budget",
                start_date, request.period
            ))
        })?;

        self.category_service
            .require_category(request.category_id, CategoryKind::Expense)
            .await?;

        Ok(NewBudget {
            category_id: request.category_id,
            amount,
            period: request.period,
            start_date,
            end_date,
        })
    }

    pub async fn create_budget(&self, request: CreateBudgetRequest) -> Result<Budget> {
        let new_budget = self.validate_request(&request).await?;
        let budget = self.budget_repository.store_budget(&new_budget).await?;

        info!(
            "Created {} budget {} of {} for '{}' ({} to {})",
            budget.period, budget.id, budget.amount, budget.category_name, budget.start_date, budget.end_date
        );
        Ok(budget)
    }

    pub async fn get_budget(&self, budget_id: i64) -> Result<Option<Budget>> {
        self.budget_repository.get_budget(budget_id).await
    }

    pub async fn list_budgets(&self) -> Result<Vec<Budget>> {
        self.budget_repository.list_budgets().await
    }

    pub async fn list_active_budgets(&self, today: NaiveDate) -> Result<Vec<Budget>> {
        self.budget_repository.list_active_budgets(today).await
    }

    /// The most recently started budget of the category that is active on `today`
    pub async fn active_budget_for_category(&self, category_id: i64, today: NaiveDate) -> Result<Option<Budget>> {
        let budgets = self.budget_repository.list_budgets_for_category(category_id).await?;
        Ok(budgets.into_iter().find(|budget| budget.is_active(today)))
    }

    /// Replace an existing budget; the end date is derived again from the new period and start
    pub async fn update_budget(&self, budget_id: i64, request: UpdateBudgetRequest) -> Result<Budget> {
        if self.budget_repository.get_budget(budget_id).await?.is_none() {
            return Err(TrackerError::not_found("Budget", budget_id));
        }

        let new_budget = self.validate_request(&request).await?;
        if !self.budget_repository.update_budget(budget_id, &new_budget).await? {
            return Err(TrackerError::not_found("Budget", budget_id));
        }

        info!("Updated budget {}", budget_id);
        self.budget_repository
            .get_budget(budget_id)
            .await?
            .ok_or_else(|| TrackerError::not_found("Budget", budget_id))
    }

    pub async fn delete_budget(&self, budget_id: i64) -> Result<bool> {
        let deleted = self.budget_repository.delete_budget(budget_id).await?;
        if deleted {
            info!("Deleted budget {}", budget_id);
        }
        Ok(deleted)
    }

    /// Usage of `budget` from the expenses of its category inside its own window
    pub async fn budget_report(&self, budget: Budget, today: NaiveDate) -> Result<BudgetReport> {
        let spent = self
            .transaction_repository
            .sum_amounts(TransactionKind::Expense, budget.window(), Some(budget.category_id))
            .await?;
        let usage = BudgetUsage::compute(budget.amount, spent)?;

        debug!(
            "Budget {} ('{}'): spent {} of {} ({})",
            budget.id, budget.category_name, spent, budget.amount, usage.status
        );

        Ok(BudgetReport {
            remaining_days: budget.remaining_days(today),
            active: budget.is_active(today),
            budget,
            usage,
        })
    }

    /// Status reports for every budget, or only those active on `today`
    pub async fn budget_reports(&self, today: NaiveDate, active_only: bool) -> Result<Vec<BudgetReport>> {
        let budgets = if active_only {
            self.budget_repository.list_active_budgets(today).await?
        } else {
            self.budget_repository.list_budgets().await?
        };

        let mut reports = Vec::with_capacity(budgets.len());
        for budget in budgets {
            reports.push(self.budget_report(budget, today).await?);
        }
        Ok(reports)
    }
}
