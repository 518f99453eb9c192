use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::BudgetPeriod;

use super::DateRange;

#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// Active iff `start_date <= today <= end_date`
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.window().contains(today)
    }

    /// Days left in the budget window, counting today; zero once the window has ended
    pub fn remaining_days(&self, today: NaiveDate) -> i64 {
        if today > self.end_date {
            return 0;
        }
        (self.end_date - today).num_days() + 1
    }

    pub fn window(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// Validated budget fields; the end date is always derived from the period
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category_id: i64,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Last day of a budget window starting at `start`.
///
/// One period later, minus a day: Weekly spans 7 days, Monthly ends the day
/// before the same day-of-month next month, Yearly the day before the
/// anniversary. Month arithmetic clamps to the end of shorter months.
/// Returns `None` only when the result falls outside chrono's date range.
pub fn derive_end_date(period: BudgetPeriod, start: NaiveDate) -> Option<NaiveDate> {
    let next_start = match period {
        BudgetPeriod::Weekly => start.checked_add_days(Days::new(7)),
        BudgetPeriod::Monthly => start.checked_add_months(Months::new(1)),
        BudgetPeriod::Yearly => start.checked_add_months(Months::new(12)),
    }?;
    next_start.pred_opt()
}
