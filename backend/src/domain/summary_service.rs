//! Read-only aggregates: totals, per-category breakdowns, the income/expense
//! summary and the monthly trend.
//!
//! Every aggregate degrades to zero or an empty list when nothing matches.
use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use shared::TransactionKind;
use tracing::debug;

use crate::domain::models::{DateRange, FinancialSummary, MonthlyTotals, SpendingInsights};
use crate::error::{Result, TrackerError};
use crate::storage::{CategorySum, Connection, TransactionStorage};

pub const DEFAULT_TREND_MONTHS: u32 = 6;
pub const MAX_TREND_MONTHS: u32 = 24;

#[derive(Clone)]
pub struct SummaryService<C: Connection> {
    transaction_repository: C::TransactionRepository,
}

impl<C: Connection> SummaryService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            transaction_repository: connection.create_transaction_repository(),
        }
    }

    /// Sum of one kind over an inclusive range, optionally for a single category
    pub async fn total(&self, kind: TransactionKind, range: DateRange, category_id: Option<i64>) -> Result<Decimal> {
        if range.is_empty() {
            return Ok(Decimal::ZERO);
        }
        self.transaction_repository
            .sum_amounts(kind, range, category_id)
            .await
    }

    /// Positive per-category totals, largest first
    pub async fn category_totals(&self, kind: TransactionKind, range: DateRange) -> Result<Vec<CategorySum>> {
        if range.is_empty() {
            return Ok(Vec::new());
        }
        let sums = self.transaction_repository.sum_by_category(kind, range).await?;
        Ok(rank_category_totals(sums))
    }

    pub async fn summary(&self, range: DateRange) -> Result<FinancialSummary> {
        let income = self.total(TransactionKind::Income, range, None).await?;
        let expenses = self.total(TransactionKind::Expense, range, None).await?;
        FinancialSummary::from_totals(income, expenses)
    }

    /// Average expense, largest expense category, health score and record count
    pub async fn insights(&self, range: DateRange) -> Result<SpendingInsights> {
        let summary = self.summary(range).await?;
        let (expense_count, income_count) = if range.is_empty() {
            (0, 0)
        } else {
            (
                self.transaction_repository.count_transactions(TransactionKind::Expense, range).await?,
                self.transaction_repository.count_transactions(TransactionKind::Income, range).await?,
            )
        };

        let average_expense = if expense_count > 0 {
            summary
                .total_expenses
                .checked_div(Decimal::from(expense_count))
                .ok_or_else(|| TrackerError::overflow("average expense"))?
        } else {
            Decimal::ZERO
        };

        let top_expense_category = self
            .category_totals(TransactionKind::Expense, range)
            .await?
            .into_iter()
            .next()
            .map(|sum| sum.category_name);

        Ok(SpendingInsights {
            average_expense,
            top_expense_category,
            health_score: summary.health_score(),
            transaction_count: expense_count + income_count,
        })
    }

    /// Income and expense totals for `months` calendar months ending with
    /// `until` (any day in the last month), oldest month first.
    pub async fn monthly_trend(&self, until: NaiveDate, months: u32) -> Result<Vec<MonthlyTotals>> {
        let windows = trend_windows(until, months)?;
        debug!("Computing monthly trend over {} months", windows.len());

        let mut trend = Vec::with_capacity(windows.len());
        for window in windows {
            trend.push(MonthlyTotals {
                month: window.month_label(),
                income: self.total(TransactionKind::Income, window, None).await?,
                expenses: self.total(TransactionKind::Expense, window, None).await?,
            });
        }
        Ok(trend)
    }
}

/// Drop non-positive totals and order by total descending, then by name
pub fn rank_category_totals(mut sums: Vec<CategorySum>) -> Vec<CategorySum> {
    sums.retain(|sum| sum.total > Decimal::ZERO);
    sums.sort_by(|a, b| match b.total.cmp(&a.total) {
        Ordering::Equal => a.category_name.cmp(&b.category_name),
        other => other,
    });
    sums
}

/// Month windows for the trend, oldest first. `months` is clamped to 1..=24.
fn trend_windows(until: NaiveDate, months: u32) -> Result<Vec<DateRange>> {
    let months = months.clamp(1, MAX_TREND_MONTHS);
    let out_of_range = || TrackerError::validation(format!("Month {} is out of range", until));

    let last = until.with_day0(0).ok_or_else(out_of_range)?;
    let mut windows = Vec::with_capacity(months as usize);
    for back in (0..months).rev() {
        let start = last.checked_sub_months(Months::new(back)).ok_or_else(out_of_range)?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(out_of_range)?;
        windows.push(DateRange::new(start, end));
    }
    Ok(windows)
}
