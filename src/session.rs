//! Per-user session context
//!
//! Holds everything one logged-in user is working with: who they are, their
//! finance record, their chat history and the latest status message. Each
//! handler receives the session explicitly; nothing is shared globally.

use log::{info, warn};

use crate::chat::{Assistant, ChatMessage, Conversation};
use crate::dashboard::Dashboard;
use crate::error::{FywiseError, Result};
use crate::finances::{FinanceField, FinanceRecord};
use crate::store::{validate_username, FinanceStore};
use crate::config::AppConfig;

#[derive(Debug, Clone)]
pub struct Session {
    username: String,
    finances: FinanceRecord,
    conversation: Conversation,
    status: Option<String>,
}

impl Session {
    /// Start a session for `username`, loading (or creating) their record.
    ///
    /// A store read failure falls back to the default record so the user
    /// still gets a working dashboard.
    pub fn open(store: &dyn FinanceStore, username: &str) -> Result<Self> {
        let username = validate_username(username)?.to_string();

        let finances = match store.load_or_init(&username) {
            Ok(record) => record,
            Err(FywiseError::EmptyUsername) => return Err(FywiseError::EmptyUsername),
            Err(e) => {
                warn!("could not load finances for '{}', using defaults: {}", username, e);
                FinanceRecord::default()
            }
        };

        info!("session opened for '{}'", username);
        Ok(Self {
            status: Some(format!("Logged in as {}", username)),
            username,
            finances,
            conversation: Conversation::new(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn finances(&self) -> &FinanceRecord {
        &self.finances
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.conversation.messages()
    }

    /// Replace the whole record and persist it
    pub fn save_finances(&mut self, store: &dyn FinanceStore, record: FinanceRecord) -> Result<()> {
        store.save(&self.username, &record)?;
        self.finances = record;
        self.status = Some("Financial data saved to your FYWISE account.".to_string());
        Ok(())
    }

    /// Update a single field and persist the record
    pub fn update_field(
        &mut self,
        store: &dyn FinanceStore,
        field: FinanceField,
        value: f64,
    ) -> Result<()> {
        let mut record = self.finances.clone();
        record.set(field, value)?;
        self.save_finances(store, record)
    }

    /// Ask the assistant a question; `None` for a blank message
    pub fn chat(&mut self, assistant: &Assistant, message: &str) -> Option<String> {
        self.conversation
            .send(assistant, message, &self.finances)
            .map(|reply| reply.text.clone())
    }

    pub fn dashboard(&self, config: &AppConfig) -> Dashboard {
        Dashboard::build(&self.finances, config)
    }

    /// End the session, returning the final status line
    pub fn logout(self) -> String {
        info!("session closed for '{}'", self.username);
        "Logged out successfully.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    /// Store whose reads always fail
    struct BrokenStore;

    impl FinanceStore for BrokenStore {
        fn fetch(&self, _username: &str) -> Result<Option<FinanceRecord>> {
            Err(FywiseError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk unavailable",
            )))
        }

        fn save(&self, _username: &str, _record: &FinanceRecord) -> Result<()> {
            Err(FywiseError::LockPoisoned)
        }

        fn usernames(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_open_creates_default_record() {
        let store = MemoryStore::new();
        let session = Session::open(&store, "olga").unwrap();

        assert_eq!(session.username(), "olga");
        assert_eq!(session.finances(), &FinanceRecord::default());
        assert_eq!(session.status(), Some("Logged in as olga"));
        assert!(store.fetch("olga").unwrap().is_some());
    }

    #[test]
    fn test_open_falls_back_on_store_error() {
        let session = Session::open(&BrokenStore, "pat").unwrap();
        assert_eq!(session.finances(), &FinanceRecord::default());
    }

    #[test]
    fn test_open_rejects_empty_username() {
        let store = MemoryStore::new();
        assert!(matches!(Session::open(&store, ""), Err(FywiseError::EmptyUsername)));
    }

    #[test]
    fn test_update_field_persists() {
        let store = MemoryStore::new();
        let mut session = Session::open(&store, "quinn").unwrap();

        session.update_field(&store, FinanceField::Rent, 800.0).unwrap();

        assert_eq!(session.finances().rent, 800.0);
        assert_eq!(store.fetch("quinn").unwrap().unwrap().rent, 800.0);
        assert_eq!(
            session.status(),
            Some("Financial data saved to your FYWISE account.")
        );
    }

    #[test]
    fn test_failed_update_leaves_record_untouched() {
        let store = MemoryStore::new();
        let mut session = Session::open(&store, "ray").unwrap();

        assert!(session.update_field(&store, FinanceField::Rent, -10.0).is_err());
        assert!(session.save_finances(&BrokenStore, FinanceRecord::zeroed()).is_err());
        assert_eq!(session.finances(), &FinanceRecord::default());
    }

    #[test]
    fn test_chat_uses_session_finances() {
        let store = MemoryStore::new();
        let mut session = Session::open(&store, "sam").unwrap();
        session.update_field(&store, FinanceField::InterestRate, 0.0).unwrap();

        let reply = session.chat(&Assistant::default(), "loan payoff?").unwrap();
        assert!(reply.contains("roughly 60 months"));
        assert_eq!(session.messages().len(), 2);
        assert!(session.chat(&Assistant::default(), "").is_none());
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = MemoryStore::new();
        let mut first = Session::open(&store, "tia").unwrap();
        let second = Session::open(&store, "uma").unwrap();

        first.chat(&Assistant::default(), "hello");
        first.update_field(&store, FinanceField::Groceries, 10.0).unwrap();

        assert!(second.messages().is_empty());
        assert_eq!(second.finances().groceries, 300.0);
    }
}
