//! Finance records, summaries and budgeting checks

mod record;
mod summary;
mod budget;
pub mod loader;

pub use record::{FinanceRecord, FinanceField, ExpenseCategory, BudgetBucket};
pub use summary::{FinanceSummary, ExpenseShare, IncomeShare, total_income, total_expenses};
pub use budget::{BudgetCheck, BucketCheck, NEEDS_TARGET_PCT, WANTS_TARGET_PCT, SAVINGS_TARGET_PCT};
pub use loader::{UserFinances, load_finances, load_finances_from_reader, write_finances};
