//! Finance record storage behind a single interface
//!
//! Backends are chosen by configuration; callers only see [`FinanceStore`].

mod memory;
mod csv_file;

pub use memory::MemoryStore;
pub use csv_file::CsvStore;

use std::path::PathBuf;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{FywiseError, Result};
use crate::finances::FinanceRecord;

/// Storage for one finance record per user
pub trait FinanceStore: Send + Sync {
    /// Stored record for `username`, if any
    fn fetch(&self, username: &str) -> Result<Option<FinanceRecord>>;

    /// Insert or replace the record for `username`
    fn save(&self, username: &str, record: &FinanceRecord) -> Result<()>;

    /// All usernames with a stored record, sorted
    fn usernames(&self) -> Result<Vec<String>>;

    /// Stored record, or the default record (persisted first) for a new user
    fn load_or_init(&self, username: &str) -> Result<FinanceRecord> {
        let username = validate_username(username)?;
        if let Some(record) = self.fetch(username)? {
            return Ok(record);
        }
        info!("no finance record for '{}', creating defaults", username);
        let record = FinanceRecord::default();
        self.save(username, &record)?;
        Ok(record)
    }
}

/// Which backend to open
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StoreBackend {
    /// Process-local, lost on exit
    Memory,
    /// Single CSV file rewritten on every save
    Csv { path: PathBuf },
}

impl Default for StoreBackend {
    fn default() -> Self {
        StoreBackend::Memory
    }
}

/// Open the configured backend
pub fn open_store(backend: &StoreBackend) -> Result<Box<dyn FinanceStore>> {
    match backend {
        StoreBackend::Memory => {
            info!("using in-memory finance store");
            Ok(Box::new(MemoryStore::new()))
        }
        StoreBackend::Csv { path } => {
            info!("using CSV finance store at {}", path.display());
            Ok(Box::new(CsvStore::open(path)?))
        }
    }
}

/// Trimmed, non-empty username
pub(crate) fn validate_username(username: &str) -> Result<&str> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        Err(FywiseError::EmptyUsername)
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_or_init_persists_defaults() {
        let store = MemoryStore::new();
        assert_eq!(store.fetch("gina").unwrap(), None);

        let record = store.load_or_init("gina").unwrap();
        assert_eq!(record, FinanceRecord::default());
        assert_eq!(store.fetch("gina").unwrap(), Some(FinanceRecord::default()));
    }

    #[test]
    fn test_load_or_init_keeps_existing() {
        let store = MemoryStore::new();
        let mut record = FinanceRecord::zeroed();
        record.rent = 700.0;
        store.save("hank", &record).unwrap();

        assert_eq!(store.load_or_init("hank").unwrap().rent, 700.0);
    }

    #[test]
    fn test_empty_username_rejected() {
        let store = MemoryStore::new();
        assert!(matches!(store.load_or_init("  "), Err(FywiseError::EmptyUsername)));
        assert!(matches!(
            store.save("", &FinanceRecord::default()),
            Err(FywiseError::EmptyUsername)
        ));
    }

    #[test]
    fn test_backend_config_parsing() {
        let memory: StoreBackend = serde_json::from_str(r#"{"backend":"memory"}"#).unwrap();
        assert_eq!(memory, StoreBackend::Memory);

        let csv: StoreBackend =
            serde_json::from_str(r#"{"backend":"csv","path":"data/finances.csv"}"#).unwrap();
        assert_eq!(csv, StoreBackend::Csv { path: PathBuf::from("data/finances.csv") });
    }

    #[test]
    fn test_open_store_csv() {
        let dir = tempfile::tempdir().unwrap();
        let backend = StoreBackend::Csv { path: dir.path().join("finances.csv") };
        let store = open_store(&backend).unwrap();

        store.save("ivy", &FinanceRecord::default()).unwrap();
        assert_eq!(store.usernames().unwrap(), vec!["ivy".to_string()]);
    }
}
