//! 50/30/20 budgeting rule check
//!
//! Needs 50%, wants 30%, savings and debt repayment 20% of income.

use serde::{Deserialize, Serialize};

use super::record::{BudgetBucket, ExpenseCategory, FinanceRecord};
use super::summary::{percent_of, total_income};

pub const NEEDS_TARGET_PCT: f64 = 50.0;
pub const WANTS_TARGET_PCT: f64 = 30.0;
pub const SAVINGS_TARGET_PCT: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketCheck {
    pub amount: f64,
    pub actual_pct: f64,
    pub target_pct: f64,
    /// Needs/wants above target, or savings below target
    pub off_target: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCheck {
    pub needs: BucketCheck,
    pub wants: BucketCheck,
    pub savings_and_debt: BucketCheck,
}

impl BudgetCheck {
    /// Evaluate a record; `None` when there is no income to split
    pub fn evaluate(record: &FinanceRecord) -> Option<Self> {
        let income = total_income(record);
        if !(income > 0.0) {
            return None;
        }

        let needs = bucket_total(record, BudgetBucket::Needs);
        let wants = bucket_total(record, BudgetBucket::Wants);
        let savings = (income - needs - wants).max(0.0);

        let needs_pct = percent_of(needs, income);
        let wants_pct = percent_of(wants, income);
        let savings_pct = percent_of(savings, income);

        Some(Self {
            needs: BucketCheck {
                amount: needs,
                actual_pct: needs_pct,
                target_pct: NEEDS_TARGET_PCT,
                off_target: needs_pct > NEEDS_TARGET_PCT,
            },
            wants: BucketCheck {
                amount: wants,
                actual_pct: wants_pct,
                target_pct: WANTS_TARGET_PCT,
                off_target: wants_pct > WANTS_TARGET_PCT,
            },
            savings_and_debt: BucketCheck {
                amount: savings,
                actual_pct: savings_pct,
                target_pct: SAVINGS_TARGET_PCT,
                off_target: savings_pct < SAVINGS_TARGET_PCT,
            },
        })
    }

    pub fn on_track(&self) -> bool {
        !(self.needs.off_target || self.wants.off_target || self.savings_and_debt.off_target)
    }

    /// One-sentence description used by the assistant
    pub fn describe(&self) -> String {
        format!(
            "Needs take {:.0}% of your income (target {:.0}%), wants {:.0}% (target {:.0}%), \
             and {:.0}% is left for savings and debt (target {:.0}%).",
            self.needs.actual_pct,
            self.needs.target_pct,
            self.wants.actual_pct,
            self.wants.target_pct,
            self.savings_and_debt.actual_pct,
            self.savings_and_debt.target_pct,
        )
    }
}

fn bucket_total(record: &FinanceRecord, bucket: BudgetBucket) -> f64 {
    ExpenseCategory::ALL
        .iter()
        .filter(|c| c.bucket() == bucket)
        .map(|&c| record.expense(c))
        .sum()
}
