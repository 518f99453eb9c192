//! Budget usage: how much of a budget has been spent and which status tier that falls in.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shared::BudgetStatusLabel;

use crate::error::{Result, TrackerError};

/// Percentage at which a budget moves from "On Track" to "Near Limit"
pub const NEAR_LIMIT_THRESHOLD: Decimal = dec!(70);

/// Percentage at which a budget is reported as "Over Budget"
pub const OVER_BUDGET_THRESHOLD: Decimal = dec!(90);

/// Upper bound of the progress bar fraction
pub const MAX_PROGRESS: Decimal = dec!(100);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetUsage {
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub progress: Decimal,
    pub status: BudgetStatusLabel,
}

impl BudgetUsage {
    /// Usage of a budget of `limit` after `spent` has gone out.
    ///
    /// Fails with `Overflow` when the percentage does not fit in a `Decimal`.
    pub fn compute(limit: Decimal, spent: Decimal) -> Result<Self> {
        let remaining = limit
            .checked_sub(spent)
            .ok_or_else(|| TrackerError::overflow("remaining budget"))?;
        let percentage = if limit > Decimal::ZERO {
            spent
                .checked_div(limit)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .ok_or_else(|| TrackerError::overflow("budget percentage"))?
        } else {
            Decimal::ZERO
        };

        Ok(Self {
            spent,
            remaining,
            percentage,
            progress: percentage.min(MAX_PROGRESS),
            status: classify(percentage),
        })
    }
}

pub fn classify(percentage: Decimal) -> BudgetStatusLabel {
    if percentage >= OVER_BUDGET_THRESHOLD {
        BudgetStatusLabel::OverBudget
    } else if percentage >= NEAR_LIMIT_THRESHOLD {
        BudgetStatusLabel::NearLimit
    } else {
        BudgetStatusLabel::OnTrack
    }
}
