//! Income and expense totals for the dashboard, expenses and income views

use serde::{Deserialize, Serialize};

use super::record::{ExpenseCategory, FinanceRecord};

/// One slice of the expense pie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseShare {
    pub category: ExpenseCategory,
    pub label: String,
    pub amount: f64,
    /// Share of total expenses, in percent
    pub share_pct: f64,
}

/// One bar of the income chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeShare {
    pub label: String,
    pub amount: f64,
    pub share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceSummary {
    pub total_income: f64,
    /// Sum of the eight expense categories (loan payment not included)
    pub total_expenses: f64,
    /// Income left after expenses, never negative
    pub estimated_savings: f64,
    pub savings_rate_pct: f64,
    pub expense_breakdown: Vec<ExpenseShare>,
    pub income_breakdown: Vec<IncomeShare>,
}

impl FinanceSummary {
    pub fn from_record(record: &FinanceRecord) -> Self {
        let total_income = total_income(record);
        let total_expenses = total_expenses(record);
        let estimated_savings = (total_income - total_expenses).max(0.0);

        let expense_breakdown = ExpenseCategory::ALL
            .iter()
            .map(|&category| {
                let amount = record.expense(category);
                ExpenseShare {
                    category,
                    label: category.label().to_string(),
                    amount,
                    share_pct: percent_of(amount, total_expenses),
                }
            })
            .collect();

        let income_breakdown = [
            ("Main Job", record.monthly_income),
            ("Side Income", record.side_income),
        ]
        .iter()
        .map(|&(label, amount)| IncomeShare {
            label: label.to_string(),
            amount,
            share_pct: percent_of(amount, total_income),
        })
        .collect();

        Self {
            total_income,
            total_expenses,
            estimated_savings,
            savings_rate_pct: percent_of(estimated_savings, total_income),
            expense_breakdown,
            income_breakdown,
        }
    }

    /// Category with the largest amount (first in display order on ties)
    pub fn largest_expense(&self) -> Option<&ExpenseShare> {
        self.expense_breakdown
            .iter()
            .filter(|s| s.amount > 0.0)
            .fold(None, |best: Option<&ExpenseShare>, s| match best {
                Some(b) if b.amount >= s.amount => Some(b),
                _ => Some(s),
            })
    }
}

pub fn total_income(record: &FinanceRecord) -> f64 {
    record.monthly_income + record.side_income
}

pub fn total_expenses(record: &FinanceRecord) -> f64 {
    ExpenseCategory::ALL.iter().map(|&c| record.expense(c)).sum()
}

/// `part / whole` in percent, 0 when `whole` is not positive
pub(crate) fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}
