//! Per-user finance record

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FywiseError, Result};
use crate::loan::LoanState;

/// Where an expense falls under the 50/30/20 rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetBucket {
    Needs,
    Wants,
}

/// Monthly expense categories tracked on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Rent,
    Groceries,
    FoodOut,
    Transport,
    Subscriptions,
    Utilities,
    Healthcare,
    Personal,
}

impl ExpenseCategory {
    /// All categories in display order
    pub const ALL: [ExpenseCategory; 8] = [
        ExpenseCategory::Rent,
        ExpenseCategory::Groceries,
        ExpenseCategory::FoodOut,
        ExpenseCategory::Transport,
        ExpenseCategory::Subscriptions,
        ExpenseCategory::Utilities,
        ExpenseCategory::Healthcare,
        ExpenseCategory::Personal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Rent => "Rent",
            ExpenseCategory::Groceries => "Groceries",
            ExpenseCategory::FoodOut => "Food Out",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Subscriptions => "Subscriptions",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Healthcare => "Healthcare",
            ExpenseCategory::Personal => "Personal",
        }
    }

    pub fn bucket(&self) -> BudgetBucket {
        match self {
            ExpenseCategory::Rent
            | ExpenseCategory::Groceries
            | ExpenseCategory::Transport
            | ExpenseCategory::Utilities
            | ExpenseCategory::Healthcare => BudgetBucket::Needs,
            ExpenseCategory::FoodOut
            | ExpenseCategory::Subscriptions
            | ExpenseCategory::Personal => BudgetBucket::Wants,
        }
    }

    pub fn field(&self) -> FinanceField {
        match self {
            ExpenseCategory::Rent => FinanceField::Rent,
            ExpenseCategory::Groceries => FinanceField::Groceries,
            ExpenseCategory::FoodOut => FinanceField::FoodOut,
            ExpenseCategory::Transport => FinanceField::Transport,
            ExpenseCategory::Subscriptions => FinanceField::Subscriptions,
            ExpenseCategory::Utilities => FinanceField::Utilities,
            ExpenseCategory::Healthcare => FinanceField::Healthcare,
            ExpenseCategory::Personal => FinanceField::PersonalSpending,
        }
    }
}

/// Editable fields of a [`FinanceRecord`], addressed by snake_case name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinanceField {
    MonthlyIncome,
    SideIncome,
    Rent,
    Groceries,
    FoodOut,
    Transport,
    Subscriptions,
    Utilities,
    Healthcare,
    PersonalSpending,
    LoanBalance,
    MonthlyPayment,
    InterestRate,
}

impl FinanceField {
    pub const ALL: [FinanceField; 13] = [
        FinanceField::MonthlyIncome,
        FinanceField::SideIncome,
        FinanceField::Rent,
        FinanceField::Groceries,
        FinanceField::FoodOut,
        FinanceField::Transport,
        FinanceField::Subscriptions,
        FinanceField::Utilities,
        FinanceField::Healthcare,
        FinanceField::PersonalSpending,
        FinanceField::LoanBalance,
        FinanceField::MonthlyPayment,
        FinanceField::InterestRate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FinanceField::MonthlyIncome => "monthly_income",
            FinanceField::SideIncome => "side_income",
            FinanceField::Rent => "rent",
            FinanceField::Groceries => "groceries",
            FinanceField::FoodOut => "food_out",
            FinanceField::Transport => "transport",
            FinanceField::Subscriptions => "subscriptions",
            FinanceField::Utilities => "utilities",
            FinanceField::Healthcare => "healthcare",
            FinanceField::PersonalSpending => "personal_spending",
            FinanceField::LoanBalance => "loan_balance",
            FinanceField::MonthlyPayment => "monthly_payment",
            FinanceField::InterestRate => "interest_rate",
        }
    }
}

impl fmt::Display for FinanceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinanceField {
    type Err = FywiseError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        FinanceField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| FywiseError::UnknownField(s.to_string()))
    }
}

/// One user's monthly finances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceRecord {
    /// Main job income per month
    pub monthly_income: f64,
    pub side_income: f64,

    // Basic expenses
    pub rent: f64,
    pub groceries: f64,
    pub transport: f64,

    // Expanded expenses
    pub food_out: f64,
    pub subscriptions: f64,
    pub utilities: f64,
    pub healthcare: f64,
    pub personal_spending: f64,

    // Loan
    pub loan_balance: f64,
    pub monthly_payment: f64,
    /// APR in percent; `None` until the user enters one
    pub interest_rate: Option<f64>,
}

impl Default for FinanceRecord {
    /// Starter values shown to a brand-new account
    fn default() -> Self {
        Self {
            monthly_income: 3200.0,
            side_income: 400.0,
            rent: 1200.0,
            groceries: 300.0,
            transport: 120.0,
            food_out: 150.0,
            subscriptions: 50.0,
            utilities: 140.0,
            healthcare: 80.0,
            personal_spending: 200.0,
            loan_balance: 15_000.0,
            monthly_payment: 250.0,
            interest_rate: Some(4.5),
        }
    }
}

impl FinanceRecord {
    /// Record with every amount zero and no interest rate
    pub fn zeroed() -> Self {
        Self {
            monthly_income: 0.0,
            side_income: 0.0,
            rent: 0.0,
            groceries: 0.0,
            transport: 0.0,
            food_out: 0.0,
            subscriptions: 0.0,
            utilities: 0.0,
            healthcare: 0.0,
            personal_spending: 0.0,
            loan_balance: 0.0,
            monthly_payment: 0.0,
            interest_rate: None,
        }
    }

    pub fn expense(&self, category: ExpenseCategory) -> f64 {
        match category {
            ExpenseCategory::Rent => self.rent,
            ExpenseCategory::Groceries => self.groceries,
            ExpenseCategory::FoodOut => self.food_out,
            ExpenseCategory::Transport => self.transport,
            ExpenseCategory::Subscriptions => self.subscriptions,
            ExpenseCategory::Utilities => self.utilities,
            ExpenseCategory::Healthcare => self.healthcare,
            ExpenseCategory::Personal => self.personal_spending,
        }
    }

    /// Current value of a field; an absent interest rate reads as 0
    pub fn get(&self, field: FinanceField) -> f64 {
        match field {
            FinanceField::MonthlyIncome => self.monthly_income,
            FinanceField::SideIncome => self.side_income,
            FinanceField::Rent => self.rent,
            FinanceField::Groceries => self.groceries,
            FinanceField::FoodOut => self.food_out,
            FinanceField::Transport => self.transport,
            FinanceField::Subscriptions => self.subscriptions,
            FinanceField::Utilities => self.utilities,
            FinanceField::Healthcare => self.healthcare,
            FinanceField::PersonalSpending => self.personal_spending,
            FinanceField::LoanBalance => self.loan_balance,
            FinanceField::MonthlyPayment => self.monthly_payment,
            FinanceField::InterestRate => self.interest_rate.unwrap_or(0.0),
        }
    }

    /// Update one field. Amounts must be finite and non-negative; an
    /// interest rate of 0 clears the rate.
    pub fn set(&mut self, field: FinanceField, value: f64) -> Result<()> {
        check_amount(field, value)?;

        let slot = match field {
            FinanceField::InterestRate => {
                self.interest_rate = if value > 0.0 { Some(value) } else { None };
                return Ok(());
            }
            FinanceField::MonthlyIncome => &mut self.monthly_income,
            FinanceField::SideIncome => &mut self.side_income,
            FinanceField::Rent => &mut self.rent,
            FinanceField::Groceries => &mut self.groceries,
            FinanceField::FoodOut => &mut self.food_out,
            FinanceField::Transport => &mut self.transport,
            FinanceField::Subscriptions => &mut self.subscriptions,
            FinanceField::Utilities => &mut self.utilities,
            FinanceField::Healthcare => &mut self.healthcare,
            FinanceField::PersonalSpending => &mut self.personal_spending,
            FinanceField::LoanBalance => &mut self.loan_balance,
            FinanceField::MonthlyPayment => &mut self.monthly_payment,
        };
        *slot = value;
        Ok(())
    }

    /// Parse `field` and `value` from user text and apply the update
    pub fn set_from_str(&mut self, field: &str, value: &str) -> Result<()> {
        let field: FinanceField = field.parse()?;
        let parsed = value
            .trim()
            .parse::<f64>()
            .map_err(|_| FywiseError::invalid_input(field.as_str(), format!("'{}' is not a number", value)))?;
        self.set(field, parsed)
    }

    /// Check every field of a record that did not come through [`FinanceRecord::set`]
    pub fn validate(&self) -> Result<()> {
        FinanceField::ALL
            .iter()
            .try_for_each(|&field| check_amount(field, self.get(field)))
    }

    /// Loan inputs for the projection engine
    pub fn loan(&self) -> LoanState {
        LoanState::new(self.loan_balance, self.monthly_payment, self.interest_rate)
    }
}

fn check_amount(field: FinanceField, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(FywiseError::invalid_input(field.as_str(), "must be a finite number"));
    }
    if value < 0.0 {
        return Err(FywiseError::invalid_input(field.as_str(), "must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let record = FinanceRecord::default();
        assert_eq!(record.monthly_income, 3200.0);
        assert_eq!(record.loan_balance, 15_000.0);
        assert_eq!(record.interest_rate, Some(4.5));
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in FinanceField::ALL {
            assert_eq!(field.as_str().parse::<FinanceField>().unwrap(), field);
        }
        assert!(matches!(
            "salary".parse::<FinanceField>(),
            Err(FywiseError::UnknownField(_))
        ));
    }

    #[test]
    fn test_set_validates() {
        let mut record = FinanceRecord::default();
        record.set(FinanceField::Rent, 950.0).unwrap();
        assert_eq!(record.rent, 950.0);

        assert!(record.set(FinanceField::Rent, -1.0).is_err());
        assert!(record.set(FinanceField::Rent, f64::NAN).is_err());
        assert_eq!(record.rent, 950.0);
    }

    #[test]
    fn test_zero_rate_clears_interest() {
        let mut record = FinanceRecord::default();
        record.set(FinanceField::InterestRate, 0.0).unwrap();
        assert_eq!(record.interest_rate, None);
        record.set_from_str("interest_rate", "6.9").unwrap();
        assert_eq!(record.interest_rate, Some(6.9));
    }

    #[test]
    fn test_set_from_str_rejects_text() {
        let mut record = FinanceRecord::default();
        let err = record.set_from_str("groceries", "lots").unwrap_err();
        assert!(matches!(err, FywiseError::InvalidInput { .. }));
    }

    #[test]
    fn test_every_category_maps_to_its_field() {
        let record = FinanceRecord::default();
        for category in ExpenseCategory::ALL {
            assert_eq!(record.expense(category), record.get(category.field()));
        }
    }

    #[test]
    fn test_loan_state() {
        let loan = FinanceRecord::default().loan();
        assert_eq!(loan, LoanState::new(15_000.0, 250.0, Some(4.5)));
    }

    #[test]
    fn test_validate_whole_record() {
        assert!(FinanceRecord::default().validate().is_ok());

        let mut record = FinanceRecord::default();
        record.rent = -1.0;
        assert!(matches!(
            record.validate(),
            Err(FywiseError::InvalidInput { field, .. }) if field == "rent"
        ));

        record.rent = 0.0;
        record.interest_rate = Some(f64::NAN);
        assert!(record.validate().is_err());
    }
}
