//! Human-readable payoff text for the loans view

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::schedule::ProjectionResult;
use super::state::LoanState;

/// Text shown next to the loan chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffNarrative {
    pub interest_text: String,
    pub payoff_text: String,
    pub interest_note: String,
}

impl PayoffNarrative {
    pub fn new(loan: &LoanState, result: &ProjectionResult) -> Self {
        Self {
            interest_text: interest_text(loan),
            payoff_text: payoff_text(loan, result),
            interest_note: interest_note(loan),
        }
    }
}

pub fn interest_text(loan: &LoanState) -> String {
    match loan.usable_rate() {
        Some(apr) => format!("{:.2}% APR", apr),
        None => "Not set yet. Add an interest rate in your financial details \
                 to see a more accurate payoff timeline."
            .to_string(),
    }
}

pub fn payoff_text(loan: &LoanState, result: &ProjectionResult) -> String {
    match (result.months_to_payoff, result.years_to_payoff) {
        (Some(months), Some(years)) if months > 0.0 => format!(
            "If you keep paying about ${} per month, you could pay off ${} \
             in roughly {} months (about {} years).",
            format_amount(loan.monthly_payment, 0),
            format_amount(loan.balance, 0),
            format_amount(months, 0),
            format_amount(years, 1),
        ),
        _ => "Add a monthly payment amount to see an estimated payoff timeline.".to_string(),
    }
}

pub fn interest_note(loan: &LoanState) -> String {
    if loan.usable_rate().is_some() {
        "This estimate includes the effect of interest, so a higher APR means \
         it will take longer and cost more overall."
            .to_string()
    } else {
        "Right now this estimate is approximate. Once you add an interest \
         rate, it will better reflect how interest affects your payoff."
            .to_string()
    }
}

/// Calendar date of the final payment, counting a partial month as a full one
pub fn estimated_payoff_date(result: &ProjectionResult, start: NaiveDate) -> Option<NaiveDate> {
    let months = result.months_to_payoff.filter(|m| *m > 0.0)?.ceil();
    if months > u32::MAX as f64 {
        return None;
    }
    start.checked_add_months(Months::new(months as u32))
}

/// Format with thousands separators, e.g. `15000.0` -> `15,000`
pub fn format_amount(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match formatted.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}
