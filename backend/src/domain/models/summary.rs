use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{Result, TrackerError};

pub const HEALTH_SCORE_NEUTRAL: Decimal = dec!(50);

/// Income, expenses and what is left over for one date range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_balance: Decimal,
    /// Net as a percentage of income; zero when there was no income
    pub savings_rate: Decimal,
}

impl FinancialSummary {
    pub fn from_totals(total_income: Decimal, total_expenses: Decimal) -> Result<Self> {
        let net_balance = total_income
            .checked_sub(total_expenses)
            .ok_or_else(|| TrackerError::overflow("net balance"))?;
        let savings_rate = if total_income > Decimal::ZERO {
            net_balance
                .checked_div(total_income)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .ok_or_else(|| TrackerError::overflow("savings rate"))?
        } else {
            Decimal::ZERO
        };
        Ok(Self {
            total_income,
            total_expenses,
            net_balance,
            savings_rate,
        })
    }

    /// Savings rate shifted into 0..=100, with 50 meaning break-even.
    /// Stays at 50 when there was no income.
    pub fn health_score(&self) -> Decimal {
        if self.total_income <= Decimal::ZERO {
            return HEALTH_SCORE_NEUTRAL;
        }
        self.savings_rate
            .saturating_add(HEALTH_SCORE_NEUTRAL)
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }
}

/// Derived indicators shown next to the summary
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingInsights {
    /// Total expenses divided by the number of expenses; zero with no expenses
    pub average_expense: Decimal,
    pub top_expense_category: Option<String>,
    pub health_score: Decimal,
    /// Expenses plus income records in the range
    pub transaction_count: i64,
}

/// Totals for a single calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotals {
    /// `YYYY-MM`
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
}
