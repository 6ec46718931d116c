//! Balance-over-time series for the loan chart

use serde::{Deserialize, Serialize};

use super::engine::{amortize, ProjectionEngine};
use super::schedule::PayoffMethod;
use super::state::LoanState;

/// Chart markers used by the dashboard (every six months for three years)
pub const DEFAULT_TREND_MARKERS: [u32; 7] = [0, 6, 12, 18, 24, 30, 36];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: u32,
    pub balance: f64,
}

impl ProjectionEngine {
    /// Projected balance at each marker month.
    ///
    /// Follows the same path as [`ProjectionEngine::project`]: the full
    /// amortization when the rate applies, a straight line for the linear
    /// estimate, and a flat line when nothing can be projected.
    pub fn balance_trend(&self, loan: &LoanState, markers: &[u32]) -> Vec<TrendPoint> {
        let method = self.project(loan).method();
        let start = loan.balance.max(0.0);

        match method {
            Some(PayoffMethod::Amortized) => {
                // Run past the schedule cap when a marker lies beyond it
                let horizon = markers
                    .iter()
                    .copied()
                    .max()
                    .unwrap_or(0)
                    .max(self.config().schedule_cap_months);
                let rows = match loan.monthly_rate() {
                    Some(r) => amortize(loan.balance, loan.monthly_payment, r, horizon),
                    None => Vec::new(),
                };
                markers
                    .iter()
                    .map(|&month| {
                        let balance = if month == 0 {
                            start
                        } else {
                            rows.get(month as usize - 1)
                                .or_else(|| rows.last())
                                .map(|r| r.ending_balance)
                                .unwrap_or(start)
                        };
                        TrendPoint { month, balance }
                    })
                    .collect()
            }
            Some(PayoffMethod::Linear) => markers
                .iter()
                .map(|&month| TrendPoint {
                    month,
                    balance: (start - loan.monthly_payment * month as f64).max(0.0),
                })
                .collect(),
            None => markers
                .iter()
                .map(|&month| TrendPoint { month, balance: start })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::loan::ProjectionConfig;

    #[test]
    fn test_amortized_trend_declines_to_zero() {
        let engine = ProjectionEngine::default();
        let loan = LoanState::new(1000.0, 400.0, Some(12.0));
        let trend = engine.balance_trend(&loan, &[0, 1, 2, 6]);

        assert_eq!(trend[0].balance, 1000.0);
        assert_relative_eq!(trend[1].balance, 610.0, epsilon = 1e-9);
        assert_relative_eq!(trend[2].balance, 216.1, epsilon = 1e-9);
        assert_eq!(trend[3].balance, 0.0);
    }

    #[test]
    fn test_amortized_trend_matches_preview() {
        let engine = ProjectionEngine::default();
        let loan = LoanState::new(15_000.0, 250.0, Some(4.5));
        let preview = engine.project(&loan);
        let trend = engine.balance_trend(&loan, &DEFAULT_TREND_MARKERS);

        assert_eq!(trend.len(), 7);
        assert_eq!(trend[2].month, 12);
        assert_eq!(trend[2].balance, preview.schedule[11].ending_balance);
        assert!(trend.windows(2).all(|w| w[1].balance <= w[0].balance));
    }

    #[test]
    fn test_markers_beyond_schedule_cap() {
        let capped = ProjectionEngine::new(ProjectionConfig {
            schedule_cap_months: 5,
            preview_months: 5,
        });
        let loan = LoanState::new(15_000.0, 250.0, Some(4.5));
        let trend = capped.balance_trend(&loan, &[5, 36]);
        let reference = ProjectionEngine::default().balance_trend(&loan, &[5, 36]);

        assert_eq!(trend, reference);
        assert!(trend[1].balance < trend[0].balance);
        assert!(trend[1].balance > 0.0);
    }

    #[test]
    fn test_linear_trend() {
        let engine = ProjectionEngine::default();
        let loan = LoanState::new(3000.0, 250.0, None);
        let trend = engine.balance_trend(&loan, &[0, 6, 12, 18]);

        let balances: Vec<f64> = trend.iter().map(|p| p.balance).collect();
        assert_eq!(balances, vec![3000.0, 1500.0, 0.0, 0.0]);
    }

    #[test]
    fn test_flat_trend_without_payment() {
        let engine = ProjectionEngine::default();
        let loan = LoanState::new(3000.0, 0.0, Some(5.0));
        let trend = engine.balance_trend(&loan, &[0, 12]);

        assert!(trend.iter().all(|p| p.balance == 3000.0));
    }
}
