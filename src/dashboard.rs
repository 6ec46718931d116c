//! Dashboard view model
//!
//! Everything the dashboard, expenses and loans pages display, computed
//! from one finance record in a single pass.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::finances::{BudgetCheck, FinanceRecord, FinanceSummary};
use crate::loan::narrative::estimated_payoff_date;
use crate::loan::{LoanState, PayoffNarrative, ProjectionResult, ScheduleSummary, TrendPoint};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub summary: FinanceSummary,

    /// 50/30/20 check; absent when there is no income
    pub budget: Option<BudgetCheck>,

    pub loan: LoanState,
    pub projection: ProjectionResult,
    pub schedule_summary: ScheduleSummary,

    /// Balance at the configured chart months
    pub trend: Vec<TrendPoint>,

    pub narrative: PayoffNarrative,

    /// Only set when built against a start date
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub payoff_date: Option<NaiveDate>,
}

impl Dashboard {
    pub fn build(record: &FinanceRecord, config: &AppConfig) -> Self {
        let engine = config.engine();
        let loan = record.loan();
        let projection = engine.project(&loan);

        Self {
            summary: FinanceSummary::from_record(record),
            budget: BudgetCheck::evaluate(record),
            trend: engine.balance_trend(&loan, &config.trend_markers),
            narrative: PayoffNarrative::new(&loan, &projection),
            schedule_summary: projection.summary(),
            payoff_date: None,
            loan,
            projection,
        }
    }

    /// Same as [`Dashboard::build`], with the payoff date counted from `start`
    pub fn build_as_of(record: &FinanceRecord, config: &AppConfig, start: NaiveDate) -> Self {
        let mut dashboard = Self::build(record, config);
        dashboard.payoff_date = estimated_payoff_date(&dashboard.projection, start);
        dashboard
    }
}
