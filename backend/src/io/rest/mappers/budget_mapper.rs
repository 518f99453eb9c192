use shared::{Budget, BudgetStatusReport};

use crate::domain::budget_service::BudgetReport;
use crate::domain::models::Budget as DomainBudget;

pub struct BudgetMapper;

impl BudgetMapper {
    pub fn to_dto(domain: DomainBudget) -> Budget {
        Budget {
            id: domain.id,
            category_id: domain.category_id,
            category_name: domain.category_name,
            amount: domain.amount,
            period: domain.period,
            start_date: domain.start_date,
            end_date: domain.end_date,
            created_at: domain.created_at,
        }
    }

    pub fn to_dto_list(domain_budgets: Vec<DomainBudget>) -> Vec<Budget> {
        domain_budgets.into_iter().map(Self::to_dto).collect()
    }

    /// Percentages are rounded to two places for display; the status label
    /// was already decided on the exact value.
    pub fn to_status_dto(report: BudgetReport) -> BudgetStatusReport {
        BudgetStatusReport {
            budget: Self::to_dto(report.budget),
            spent: report.usage.spent,
            remaining: report.usage.remaining,
            percentage: report.usage.percentage.round_dp(2),
            progress: report.usage.progress.round_dp(2),
            status: report.usage.status,
            remaining_days: report.remaining_days,
            active: report.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::budget_status::BudgetUsage;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use shared::{BudgetPeriod, BudgetStatusLabel};

    #[test]
    fn test_status_dto_rounds_percentage_but_keeps_label() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let report = BudgetReport {
            budget: DomainBudget {
                id: 3,
                category_id: 1,
                category_name: "Groceries".to_string(),
                amount: dec!(300),
                period: BudgetPeriod::Monthly,
                start_date: start,
                end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                created_at: Utc::now(),
            },
            usage: BudgetUsage::compute(dec!(300), dec!(269.99)).unwrap(),
            remaining_days: 5,
            active: true,
        };

        let dto = BudgetMapper::to_status_dto(report);
        assert_eq!(dto.percentage, dec!(90.00));
        assert_eq!(dto.status, BudgetStatusLabel::NearLimit);
        assert_eq!(dto.remaining, dec!(30.01));
        assert_eq!(dto.budget.id, 3);
    }
}
