//! Loan payoff projection: horizon, amortization preview, chart trend and text

mod state;
mod engine;
mod schedule;
mod trend;
pub mod narrative;

pub use state::{LoanState, parse_rate};
pub use engine::{
    ProjectionEngine, ProjectionConfig, project, payoff_months,
    DEFAULT_SCHEDULE_CAP_MONTHS, DEFAULT_PREVIEW_MONTHS,
};
pub use schedule::{ScheduleRow, ProjectionResult, ScheduleSummary, PayoffMethod};
pub use trend::{TrendPoint, DEFAULT_TREND_MARKERS};
pub use narrative::PayoffNarrative;
