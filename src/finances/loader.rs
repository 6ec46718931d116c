//! Load and write finance records as CSV
//!
//! Columns: `username`, one column per [`FinanceField`], and an optional
//! `updated_at` RFC 3339 timestamp. Empty amount cells read as 0; an empty
//! or non-numeric `interest_rate` reads as "no rate".

use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use csv::{Reader, Writer};
use serde::{Deserialize, Serialize};

use super::record::{FinanceField, FinanceRecord};
use crate::error::{FywiseError, Result};
use crate::loan::parse_rate;

/// A finance record together with its owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFinances {
    pub username: String,
    pub record: FinanceRecord,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Raw CSV row
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    username: String,
    monthly_income: Option<f64>,
    side_income: Option<f64>,
    rent: Option<f64>,
    groceries: Option<f64>,
    food_out: Option<f64>,
    transport: Option<f64>,
    subscriptions: Option<f64>,
    utilities: Option<f64>,
    healthcare: Option<f64>,
    personal_spending: Option<f64>,
    loan_balance: Option<f64>,
    monthly_payment: Option<f64>,
    interest_rate: Option<String>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl CsvRow {
    fn into_user_finances(self) -> Result<UserFinances> {
        let username = self.username.trim().to_string();
        if username.is_empty() {
            return Err(FywiseError::EmptyUsername);
        }

        let mut record = FinanceRecord::zeroed();
        let amounts = [
            (FinanceField::MonthlyIncome, self.monthly_income),
            (FinanceField::SideIncome, self.side_income),
            (FinanceField::Rent, self.rent),
            (FinanceField::Groceries, self.groceries),
            (FinanceField::FoodOut, self.food_out),
            (FinanceField::Transport, self.transport),
            (FinanceField::Subscriptions, self.subscriptions),
            (FinanceField::Utilities, self.utilities),
            (FinanceField::Healthcare, self.healthcare),
            (FinanceField::PersonalSpending, self.personal_spending),
            (FinanceField::LoanBalance, self.loan_balance),
            (FinanceField::MonthlyPayment, self.monthly_payment),
        ];
        for (field, value) in amounts {
            record.set(field, value.unwrap_or(0.0))?;
        }
        record.interest_rate = self
            .interest_rate
            .as_deref()
            .and_then(parse_rate)
            .filter(|r| *r > 0.0);

        Ok(UserFinances {
            username,
            record,
            updated_at: self.updated_at,
        })
    }

    fn from_user_finances(entry: &UserFinances) -> Self {
        let r = &entry.record;
        Self {
            username: entry.username.clone(),
            monthly_income: Some(r.monthly_income),
            side_income: Some(r.side_income),
            rent: Some(r.rent),
            groceries: Some(r.groceries),
            food_out: Some(r.food_out),
            transport: Some(r.transport),
            subscriptions: Some(r.subscriptions),
            utilities: Some(r.utilities),
            healthcare: Some(r.healthcare),
            personal_spending: Some(r.personal_spending),
            loan_balance: Some(r.loan_balance),
            monthly_payment: Some(r.monthly_payment),
            interest_rate: r.interest_rate.map(|v| v.to_string()),
            updated_at: entry.updated_at,
        }
    }
}

/// Load all finance records from a CSV file
pub fn load_finances<P: AsRef<Path>>(path: P) -> Result<Vec<UserFinances>> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load finance records from any reader (e.g., string buffer, request body)
pub fn load_finances_from_reader<R: Read>(reader: R) -> Result<Vec<UserFinances>> {
    collect_rows(Reader::from_reader(reader))
}

fn collect_rows<R: Read>(mut reader: Reader<R>) -> Result<Vec<UserFinances>> {
    let mut entries = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        entries.push(row.into_user_finances()?);
    }
    Ok(entries)
}

/// Write finance records as CSV, header included
pub fn write_finances<W: Write>(writer: W, entries: &[UserFinances]) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    for entry in entries {
        csv_writer.serialize(CsvRow::from_user_finances(entry))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
username,monthly_income,side_income,rent,groceries,food_out,transport,subscriptions,utilities,healthcare,personal_spending,loan_balance,monthly_payment,interest_rate,updated_at
alice,4000,0,1500,350,100,90,30,120,60,150,20000,400,6.5,2024-03-01T12:00:00Z
bob,2500,,900,250,80,60,20,100,40,90,5000,150,,
carol,3000,200,1000,300,50,100,15,110,0,120,8000,200,unknown,
";

    #[test]
    fn test_load_from_reader() {
        let entries = load_finances_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(entries.len(), 3);

        let alice = &entries[0];
        assert_eq!(alice.username, "alice");
        assert_eq!(alice.record.loan_balance, 20_000.0);
        assert_eq!(alice.record.interest_rate, Some(6.5));
        assert!(alice.updated_at.is_some());

        let bob = &entries[1];
        assert_eq!(bob.record.side_income, 0.0);
        assert_eq!(bob.record.interest_rate, None);
        assert_eq!(bob.updated_at, None);

        assert_eq!(entries[2].record.interest_rate, None);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let data = "\
username,monthly_income,side_income,rent,groceries,food_out,transport,subscriptions,utilities,healthcare,personal_spending,loan_balance,monthly_payment,interest_rate,updated_at
dave,3000,0,-5,0,0,0,0,0,0,0,0,0,,
";
        let err = load_finances_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, FywiseError::InvalidInput { .. }));
    }

    #[test]
    fn test_write_then_load_preserves_records() {
        let mut cleared = FinanceRecord::default();
        cleared.interest_rate = None;
        let entries = vec![
            UserFinances {
                username: "erin".to_string(),
                record: FinanceRecord::default(),
                updated_at: None,
            },
            UserFinances {
                username: "frank".to_string(),
                record: cleared,
                updated_at: None,
            },
        ];

        let mut buffer = Vec::new();
        write_finances(&mut buffer, &entries).unwrap();
        let loaded = load_finances_from_reader(buffer.as_slice()).unwrap();

        assert_eq!(loaded, entries);
    }
}
