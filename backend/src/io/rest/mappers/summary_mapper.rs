use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use shared::{
    AnalyticsResponse, CategoryTotal, CategoryTotalsResponse, ChartDataResponse, MonthlyDataResponse, SummaryResponse,
    TransactionKind,
};

use crate::domain::models::{FinancialSummary, MonthlyTotals, SpendingInsights};
use crate::storage::CategorySum;

pub struct SummaryMapper;

/// Money rounded to cents as a JSON number
fn money(value: Decimal) -> f64 {
    value.round_dp(2).to_f64().unwrap_or_default()
}

impl SummaryMapper {
    pub fn to_summary_response(summary: FinancialSummary) -> SummaryResponse {
        SummaryResponse {
            total_income: money(summary.total_income),
            total_expenses: money(summary.total_expenses),
            net_balance: money(summary.net_balance),
            savings_rate: summary.savings_rate.round_dp(1).to_f64().unwrap_or_default(),
        }
    }

    pub fn to_analytics_response(insights: SpendingInsights) -> AnalyticsResponse {
        AnalyticsResponse {
            average_expense: money(insights.average_expense),
            top_expense_category: insights.top_expense_category,
            health_score: insights.health_score.round_dp(0).to_f64().unwrap_or_default(),
            transaction_count: insights.transaction_count,
        }
    }

    pub fn to_category_totals_response(kind: TransactionKind, sums: Vec<CategorySum>) -> CategoryTotalsResponse {
        CategoryTotalsResponse {
            kind,
            totals: sums
                .into_iter()
                .map(|sum| CategoryTotal {
                    category_id: sum.category_id,
                    category_name: sum.category_name,
                    color: sum.color,
                    total: sum.total,
                })
                .collect(),
        }
    }

    pub fn to_chart_data(sums: Vec<CategorySum>) -> ChartDataResponse {
        let (labels, values) = sums
            .into_iter()
            .map(|sum| (sum.category_name, money(sum.total)))
            .unzip();
        ChartDataResponse { labels, values }
    }

    pub fn to_monthly_data(trend: Vec<MonthlyTotals>) -> MonthlyDataResponse {
        let mut response = MonthlyDataResponse {
            months: Vec::with_capacity(trend.len()),
            income: Vec::with_capacity(trend.len()),
            expenses: Vec::with_capacity(trend.len()),
        };
        for month in trend {
            response.months.push(month.month);
            response.income.push(money(month.income));
            response.expenses.push(money(month.expenses));
        }
        response
    }
}
