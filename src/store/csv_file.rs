//! CSV-file finance store
//!
//! The whole file is held in memory and rewritten atomically (temp file +
//! rename) on every save. One row per user.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use log::{debug, info};

use super::{validate_username, FinanceStore};
use crate::error::{FywiseError, Result};
use crate::finances::{load_finances, write_finances, FinanceRecord, UserFinances};

#[derive(Debug)]
pub struct CsvStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, UserFinances>>,
}

impl CsvStore {
    /// Open the store, reading existing rows if the file is present
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut entries = BTreeMap::new();

        if path.exists() {
            for entry in load_finances(&path)? {
                entries.insert(entry.username.clone(), entry);
            }
            info!("loaded {} finance records from {}", entries.len(), path.display());
        }

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the user's record was last saved
    pub fn updated_at(&self, username: &str) -> Result<Option<chrono::DateTime<Utc>>> {
        let username = validate_username(username)?;
        let entries = self.entries.lock().map_err(|_| FywiseError::LockPoisoned)?;
        Ok(entries.get(username).and_then(|e| e.updated_at))
    }

    fn persist(&self, entries: &BTreeMap<String, UserFinances>) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let file_name = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("finances.csv");
        let tmp = parent.join(format!(".{}.tmp.{}", file_name, std::process::id()));

        {
            let rows: Vec<UserFinances> = entries.values().cloned().collect();
            let mut writer = BufWriter::new(File::create(&tmp)?);
            write_finances(&mut writer, &rows)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        debug!("wrote {} rows to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl FinanceStore for CsvStore {
    fn fetch(&self, username: &str) -> Result<Option<FinanceRecord>> {
        let username = validate_username(username)?;
        let entries = self.entries.lock().map_err(|_| FywiseError::LockPoisoned)?;
        Ok(entries.get(username).map(|e| e.record.clone()))
    }

    fn save(&self, username: &str, record: &FinanceRecord) -> Result<()> {
        let username = validate_username(username)?;
        let mut entries = self.entries.lock().map_err(|_| FywiseError::LockPoisoned)?;

        let previous = entries.insert(
            username.to_string(),
            UserFinances {
                username: username.to_string(),
                record: record.clone(),
                updated_at: Some(Utc::now()),
            },
        );

        if let Err(e) = self.persist(&entries) {
            // Keep memory in step with the file
            match previous {
                Some(prev) => entries.insert(username.to_string(), prev),
                None => entries.remove(username),
            };
            return Err(e);
        }
        Ok(())
    }

    fn usernames(&self) -> Result<Vec<String>> {
        let entries = self.entries.lock().map_err(|_| FywiseError::LockPoisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}
