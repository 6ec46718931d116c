//! In-memory finance store

use std::collections::HashMap;
use std::sync::RwLock;

use log::debug;

use super::{validate_username, FinanceStore};
use crate::error::{FywiseError, Result};
use crate::finances::FinanceRecord;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, FinanceRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with records
    pub fn with_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, FinanceRecord)>,
    {
        Self {
            records: RwLock::new(records.into_iter().collect()),
        }
    }
}

impl FinanceStore for MemoryStore {
    fn fetch(&self, username: &str) -> Result<Option<FinanceRecord>> {
        let username = validate_username(username)?;
        let records = self.records.read().map_err(|_| FywiseError::LockPoisoned)?;
        Ok(records.get(username).cloned())
    }

    fn save(&self, username: &str, record: &FinanceRecord) -> Result<()> {
        let username = validate_username(username)?;
        let mut records = self.records.write().map_err(|_| FywiseError::LockPoisoned)?;
        records.insert(username.to_string(), record.clone());
        debug!("saved finances for '{}'", username);
        Ok(())
    }

    fn usernames(&self) -> Result<Vec<String>> {
        let records = self.records.read().map_err(|_| FywiseError::LockPoisoned)?;
        let mut names: Vec<String> = records.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_save_replaces_record() {
        let store = MemoryStore::new();
        store.save("jo", &FinanceRecord::default()).unwrap();
        store.save("jo", &FinanceRecord::zeroed()).unwrap();

        assert_eq!(store.fetch("jo").unwrap(), Some(FinanceRecord::zeroed()));
        assert_eq!(store.usernames().unwrap().len(), 1);
    }

    #[test]
    fn test_usernames_trimmed_and_sorted() {
        let store = MemoryStore::with_records(vec![
            ("zed".to_string(), FinanceRecord::default()),
            ("amy".to_string(), FinanceRecord::default()),
        ]);
        store.save(" kim ", &FinanceRecord::default()).unwrap();

        assert_eq!(store.usernames().unwrap(), vec!["amy", "kim", "zed"]);
        assert!(store.fetch("kim").unwrap().is_some());
    }

    #[test]
    fn test_concurrent_saves() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let mut record = FinanceRecord::zeroed();
                    record.rent = i as f64;
                    store.save(&format!("user{}", i), &record).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.usernames().unwrap().len(), 8);
        assert_eq!(store.fetch("user3").unwrap().unwrap().rent, 3.0);
    }
}
