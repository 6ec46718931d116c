//! FYWISE - personal finance dashboard core
//!
//! This library provides:
//! - Loan payoff projection (amortization with a linear fallback)
//! - Monthly income and expense summaries with a 50/30/20 budget check
//! - Per-user finance storage (in-memory or CSV file)
//! - A scripted assistant that answers finance questions from the user's own numbers
//! - Per-user sessions tying the above together

pub mod error;
pub mod config;
pub mod loan;
pub mod finances;
pub mod store;
pub mod chat;
pub mod session;
pub mod dashboard;

// Re-export commonly used types
pub use error::{FywiseError, Result};
pub use config::AppConfig;
pub use loan::{LoanState, ProjectionConfig, ProjectionEngine, ProjectionResult, ScheduleRow};
pub use finances::{FinanceField, FinanceRecord, FinanceSummary};
pub use store::{open_store, FinanceStore, StoreBackend};
pub use chat::{Assistant, Conversation};
pub use session::Session;
pub use dashboard::Dashboard;
