//! Projection output structures

use serde::{Deserialize, Serialize};

/// One month of the amortization preview
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Month number (1-indexed)
    pub month: u32,
    pub starting_balance: f64,
    pub interest_portion: f64,
    pub principal_portion: f64,
    pub ending_balance: f64,
}

impl ScheduleRow {
    /// The loan is paid off at the end of this month
    pub fn is_final(&self) -> bool {
        self.ending_balance <= 0.0
    }
}

/// How the payoff horizon was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoffMethod {
    /// Closed-form amortization with the user's interest rate
    Amortized,
    /// Balance divided by payment, interest ignored
    Linear,
}

/// Complete projection result. Recomputed on every call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Months until the balance reaches zero. Whole months when amortized,
    /// fractional when estimated linearly.
    pub months_to_payoff: Option<f64>,

    pub years_to_payoff: Option<f64>,

    /// First months of the amortization (empty for the linear estimate)
    pub schedule: Vec<ScheduleRow>,

    /// Whether the interest-bearing formula produced the horizon
    pub rate_applied: bool,
}

impl ProjectionResult {
    /// Nothing to project (no balance or no payment)
    pub fn empty() -> Self {
        Self {
            months_to_payoff: None,
            years_to_payoff: None,
            schedule: Vec::new(),
            rate_applied: false,
        }
    }

    pub fn linear(months: f64) -> Self {
        Self {
            months_to_payoff: Some(months),
            years_to_payoff: Some(months / 12.0),
            schedule: Vec::new(),
            rate_applied: false,
        }
    }

    pub fn amortized(months: u32, schedule: Vec<ScheduleRow>) -> Self {
        let months = months as f64;
        Self {
            months_to_payoff: Some(months),
            years_to_payoff: Some(months / 12.0),
            schedule,
            rate_applied: true,
        }
    }

    pub fn method(&self) -> Option<PayoffMethod> {
        match (self.months_to_payoff, self.rate_applied) {
            (None, _) => None,
            (Some(_), true) => Some(PayoffMethod::Amortized),
            (Some(_), false) => Some(PayoffMethod::Linear),
        }
    }

    /// A positive payoff horizon is available
    pub fn has_horizon(&self) -> bool {
        self.months_to_payoff.map_or(false, |m| m > 0.0)
    }

    /// Get summary statistics for the preview window
    pub fn summary(&self) -> ScheduleSummary {
        let total_interest: f64 = self.schedule.iter().map(|r| r.interest_portion).sum();
        let total_principal: f64 = self.schedule.iter().map(|r| r.principal_portion).sum();
        let final_balance = self.schedule.last().map(|r| r.ending_balance);

        ScheduleSummary {
            months_shown: self.schedule.len() as u32,
            total_interest,
            total_principal,
            final_balance,
        }
    }
}

/// Totals across the preview rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub months_shown: u32,
    pub total_interest: f64,
    pub total_principal: f64,
    pub final_balance: Option<f64>,
}
