//! Loan inputs for a single projection call

use serde::{Deserialize, Serialize};

/// Current state of a loan as entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanState {
    /// Outstanding principal
    pub balance: f64,

    /// Fixed payment made every month
    pub monthly_payment: f64,

    /// Nominal annual rate in percent (6.5 = 6.5% APR), if known
    pub annual_rate_percent: Option<f64>,
}

impl LoanState {
    pub fn new(balance: f64, monthly_payment: f64, annual_rate_percent: Option<f64>) -> Self {
        Self {
            balance,
            monthly_payment,
            annual_rate_percent,
        }
    }

    /// Build a loan state from a raw, possibly non-numeric, rate value.
    ///
    /// A rate that does not parse is treated exactly like a missing rate.
    pub fn with_raw_rate(balance: f64, monthly_payment: f64, raw_rate: Option<&str>) -> Self {
        Self::new(balance, monthly_payment, raw_rate.and_then(parse_rate))
    }

    /// APR usable for interest-bearing math: present, finite and positive
    pub fn usable_rate(&self) -> Option<f64> {
        self.annual_rate_percent
            .filter(|apr| apr.is_finite() && *apr > 0.0)
    }

    /// Monthly fractional rate (APR / 100 / 12) when a usable rate exists
    pub fn monthly_rate(&self) -> Option<f64> {
        self.usable_rate().map(|apr| apr / 100.0 / 12.0)
    }

    /// Balance and payment are both strictly positive, so a payoff concept applies
    pub fn is_projectable(&self) -> bool {
        self.balance > 0.0 && self.monthly_payment > 0.0
    }

    /// Interest accruing on the current balance in the first month
    pub fn first_month_interest(&self) -> f64 {
        self.monthly_rate().map(|r| self.balance * r).unwrap_or(0.0)
    }
}

/// Parse a user-entered rate. Surrounding whitespace and a trailing `%` are
/// accepted; anything else that is not a finite number yields `None`.
pub fn parse_rate(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
