//! Loan payoff projection engine
//!
//! Pure and synchronous: every call depends only on its inputs, so the engine
//! can be shared freely across threads serving different users.

use log::debug;
use serde::{Deserialize, Serialize};

use super::schedule::{ProjectionResult, ScheduleRow};
use super::state::LoanState;

/// Months generated before the preview window is applied (30 years)
pub const DEFAULT_SCHEDULE_CAP_MONTHS: u32 = 360;

/// Rows returned to the caller
pub const DEFAULT_PREVIEW_MONTHS: u32 = 12;

/// Configuration for a projection run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Upper bound on schedule generation, in months
    pub schedule_cap_months: u32,

    /// Number of schedule rows returned
    pub preview_months: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            schedule_cap_months: DEFAULT_SCHEDULE_CAP_MONTHS,
            preview_months: DEFAULT_PREVIEW_MONTHS,
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project payoff horizon and preview schedule for a loan.
    ///
    /// Never fails: an unusable rate, a payment that does not cover interest,
    /// or a numeric-domain problem falls back to the linear estimate; a
    /// non-positive balance or payment gives an empty result.
    pub fn project(&self, loan: &LoanState) -> ProjectionResult {
        if let Some(result) = self.project_with_interest(loan) {
            return result;
        }

        if loan.is_projectable() {
            debug!(
                "linear payoff estimate for balance {:.2} at {:.2}/month",
                loan.balance, loan.monthly_payment
            );
            return ProjectionResult::linear(loan.balance / loan.monthly_payment);
        }

        ProjectionResult::empty()
    }

    /// Interest-bearing path; `None` means "use the fallback"
    fn project_with_interest(&self, loan: &LoanState) -> Option<ProjectionResult> {
        if !loan.is_projectable() {
            return None;
        }
        let r = loan.monthly_rate()?;

        let months = payoff_months(loan.balance, loan.monthly_payment, r)?;

        let rows = months
            .min(self.config.schedule_cap_months)
            .min(self.config.preview_months);
        let schedule = amortize(loan.balance, loan.monthly_payment, r, rows);

        Some(ProjectionResult::amortized(months, schedule))
    }

    /// Full amortization up to the schedule cap, ignoring the preview window
    pub fn full_schedule(&self, loan: &LoanState) -> Vec<ScheduleRow> {
        if !loan.is_projectable() {
            return Vec::new();
        }
        match loan.monthly_rate() {
            Some(r) => amortize(
                loan.balance,
                loan.monthly_payment,
                r,
                self.config.schedule_cap_months,
            ),
            None => Vec::new(),
        }
    }
}

/// Project with the default configuration
pub fn project(loan: &LoanState) -> ProjectionResult {
    ProjectionEngine::default().project(loan)
}

/// Whole months to pay off `balance` at monthly rate `r`:
/// `n = ln(P / (P - r*B)) / ln(1 + r)`, rounded up.
///
/// `None` when the payment does not exceed the monthly interest or when the
/// formula leaves its numeric domain.
pub fn payoff_months(balance: f64, payment: f64, r: f64) -> Option<u32> {
    let accrual = balance * r;
    if payment <= accrual {
        debug!(
            "payment {:.2} does not cover monthly interest {:.2}",
            payment, accrual
        );
        return None;
    }

    let ratio = payment / (payment - accrual);
    let denominator = r.ln_1p();
    if !(ratio > 0.0) || denominator == 0.0 || !denominator.is_finite() {
        return None;
    }

    let n = ratio.ln() / denominator;
    if !n.is_finite() || n <= 0.0 || n > u32::MAX as f64 {
        return None;
    }

    Some(n.ceil() as u32)
}

/// Generate up to `max_rows` amortization rows, stopping once the loan is paid
pub(super) fn amortize(balance: f64, payment: f64, r: f64, max_rows: u32) -> Vec<ScheduleRow> {
    let mut rows = Vec::with_capacity(max_rows.min(DEFAULT_SCHEDULE_CAP_MONTHS) as usize);
    let mut running = balance;

    for month in 1..=max_rows {
        let interest_portion = running * r;
        // Principal never goes negative; only the balance is clamped at zero
        let principal_portion = (payment - interest_portion).max(0.0);
        let row = ScheduleRow {
            month,
            starting_balance: running,
            interest_portion,
            principal_portion,
            ending_balance: (running - principal_portion).max(0.0),
        };
        rows.push(row);

        if row.is_final() {
            break;
        }
        running = row.ending_balance;
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_fallback_without_rate() {
        let result = project(&LoanState::new(15_000.0, 250.0, None));

        assert_eq!(result.months_to_payoff, Some(15_000.0 / 250.0));
        assert_eq!(result.years_to_payoff, Some(60.0 / 12.0));
        assert!(result.schedule.is_empty());
        assert!(!result.rate_applied);
    }

    #[test]
    fn test_linear_fallback_is_fractional() {
        let result = project(&LoanState::new(1000.0, 300.0, None));
        assert_eq!(result.months_to_payoff, Some(1000.0 / 300.0));
        assert!(result.schedule.is_empty());
    }

    #[test]
    fn test_non_amortizing_payment_uses_fallback() {
        // 2% monthly on 10,000 accrues 200, far above the 10 payment
        let result = project(&LoanState::new(10_000.0, 10.0, Some(24.0)));

        assert!(!result.rate_applied);
        assert_eq!(result.months_to_payoff, Some(1000.0));
        assert!(result.schedule.is_empty());
    }

    #[test]
    fn test_payment_equal_to_interest_uses_fallback() {
        // 1% monthly on 10,000 is exactly 100
        let result = project(&LoanState::new(10_000.0, 100.0, Some(12.0)));
        assert!(!result.rate_applied);
        assert_eq!(result.months_to_payoff, Some(100.0));
    }

    #[test]
    fn test_closed_form_horizon() {
        let result = project(&LoanState::new(15_000.0, 250.0, Some(4.5)));

        let expected = ((250.0_f64 / (250.0 - 0.00375 * 15_000.0)).ln() / 1.00375_f64.ln()).ceil();
        assert_eq!(expected, 69.0);
        assert!(result.rate_applied);
        assert_eq!(result.months_to_payoff, Some(69.0));
        assert_eq!(result.years_to_payoff, Some(69.0 / 12.0));
    }

    #[test]
    fn test_schedule_rows_conserve_balance() {
        for loan in [
            LoanState::new(15_000.0, 250.0, Some(4.5)),
            LoanState::new(1000.0, 400.0, Some(12.0)),
            LoanState::new(2500.0, 1000.0, Some(29.99)),
        ] {
            let result = project(&loan);
            assert!(!result.schedule.is_empty());
            for row in &result.schedule {
                assert!(row.ending_balance >= 0.0);
                assert!(row.principal_portion >= 0.0);
                assert_eq!(row.ending_balance, (row.starting_balance - row.principal_portion).max(0.0));
                assert_relative_eq!(
                    row.interest_portion,
                    row.starting_balance * loan.monthly_rate().unwrap(),
                    epsilon = 1e-9
                );
            }
            for row in result.schedule.iter().filter(|r| !r.is_final()) {
                assert_relative_eq!(
                    row.starting_balance,
                    row.principal_portion + row.ending_balance,
                    epsilon = 1e-9
                );
            }
            for pair in result.schedule.windows(2) {
                assert_eq!(pair[1].month, pair[0].month + 1);
                assert_eq!(pair[1].starting_balance, pair[0].ending_balance);
            }
        }
    }

    #[test]
    fn test_early_termination() {
        // 1% monthly, pays off in month 3
        let result = project(&LoanState::new(1000.0, 400.0, Some(12.0)));

        assert_eq!(result.months_to_payoff, Some(3.0));
        assert_eq!(result.schedule.len(), 3);
        let last = result.schedule.last().unwrap();
        assert_eq!(last.ending_balance, 0.0);
        assert_relative_eq!(last.starting_balance, 216.1, epsilon = 1e-9);
        assert_relative_eq!(last.interest_portion, 2.161, epsilon = 1e-9);
        // Final principal is the full payment less interest, not the leftover balance
        assert_relative_eq!(last.principal_portion, 397.839, epsilon = 1e-9);
        assert!(last.is_final());
        assert!(result.schedule[..2].iter().all(|r| !r.is_final()));
    }

    #[test]
    fn test_preview_capped_at_twelve_rows() {
        let result = project(&LoanState::new(15_000.0, 250.0, Some(4.5)));

        assert_eq!(result.schedule.len(), 12);
        assert_eq!(result.schedule[0].month, 1);
        assert_eq!(result.schedule[11].month, 12);
        let last = result.schedule.last().unwrap();
        assert!(last.ending_balance > 0.0);
        assert_relative_eq!(last.ending_balance, 12_626.442372902824, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_inputs_yield_empty() {
        for loan in [
            LoanState::new(0.0, 250.0, Some(4.5)),
            LoanState::new(15_000.0, 0.0, Some(4.5)),
            LoanState::new(0.0, 0.0, None),
            LoanState::new(-5.0, 100.0, None),
            LoanState::new(f64::NAN, 100.0, Some(5.0)),
        ] {
            let result = project(&loan);
            assert_eq!(result, ProjectionResult::empty());
        }
    }

    #[test]
    fn test_unparseable_rate_matches_absent_rate() {
        let garbled = project(&LoanState::with_raw_rate(8000.0, 320.0, Some("six percent")));
        let absent = project(&LoanState::new(8000.0, 320.0, None));
        assert_eq!(garbled, absent);
        assert_eq!(garbled.months_to_payoff, Some(25.0));
    }

    #[test]
    fn test_tiny_rate_stays_in_domain() {
        let result = project(&LoanState::new(1200.0, 100.0, Some(1e-12)));
        assert!(result.months_to_payoff.is_some());
        let months = result.months_to_payoff.unwrap();
        assert!((12.0..=13.0).contains(&months));
    }

    #[test]
    fn test_custom_preview_and_cap() {
        let engine = ProjectionEngine::new(ProjectionConfig {
            schedule_cap_months: 5,
            preview_months: 24,
        });
        let result = engine.project(&LoanState::new(15_000.0, 250.0, Some(4.5)));

        assert_eq!(result.months_to_payoff, Some(69.0));
        assert_eq!(result.schedule.len(), 5);
    }

    #[test]
    fn test_full_schedule_runs_to_payoff() {
        let engine = ProjectionEngine::default();
        let loan = LoanState::new(15_000.0, 250.0, Some(4.5));
        let rows = engine.full_schedule(&loan);

        assert_eq!(rows.len(), 69);
        assert_eq!(rows.last().unwrap().ending_balance, 0.0);
    }

    #[test]
    fn test_payoff_months_domain_guard() {
        assert_eq!(payoff_months(10_000.0, 100.0, 0.01), None);
        assert_eq!(payoff_months(1000.0, 400.0, 0.01), Some(3));
    }
}
