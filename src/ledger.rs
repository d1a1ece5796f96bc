//! Which users have finished which instruments.
//!
//! The ledger is a plain value. Updates return a new ledger, and
//! [`LedgerStore`] is the one place that reads and writes it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::instruments::Instrument;
use crate::storage::Storage;

/// Storage key of the persisted ledger record.
pub const LEDGER_KEY: &str = "noesisHiring_completedTests";

/// Username -> instruments already completed, in completion order.
///
/// Serializes as `{ "Jane Doe": ["disc", "herrmann"] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionLedger {
    entries: BTreeMap<String, Vec<Instrument>>,
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger with `instrument` added to `username`'s completions.
    ///
    /// Idempotent; other users are left untouched.
    pub fn record_completion(mut self, username: &str, instrument: Instrument) -> Self {
        let completed = self.entries.entry(username.trim().to_string()).or_default();
        if !completed.contains(&instrument) {
            completed.push(instrument);
        }
        self
    }

    pub fn is_completed(&self, username: &str, instrument: Instrument) -> bool {
        self.completed(username).contains(&instrument)
    }

    /// Instruments `username` has completed. Lookup trims but is case-sensitive.
    pub fn completed(&self, username: &str) -> &[Instrument] {
        self.entries
            .get(username.trim())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Best-effort persistence for the [`CompletionLedger`].
#[derive(Clone)]
pub struct LedgerStore {
    storage: Arc<dyn Storage>,
}

impl LedgerStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Read the persisted ledger. Missing or unreadable records yield an empty ledger.
    pub async fn load(&self) -> CompletionLedger {
        let raw = match self.storage.get_value(LEDGER_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No completion ledger stored yet");
                return CompletionLedger::new();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read completion ledger, starting empty");
                return CompletionLedger::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(ledger) => ledger,
            Err(e) => {
                warn!(error = %e, "Stored completion ledger is corrupt, starting empty");
                CompletionLedger::new()
            }
        }
    }

    /// Write the full ledger. Failures are logged and swallowed.
    pub async fn persist(&self, ledger: &CompletionLedger) {
        let raw = match serde_json::to_string(ledger) {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "Failed to serialize completion ledger");
                return;
            }
        };

        if let Err(e) = self.storage.put_value(LEDGER_KEY, &raw).await {
            error!(error = %e, "Failed to persist completion ledger");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStorage;

    #[test]
    fn test_record_completion_is_idempotent() {
        let once = CompletionLedger::new().record_completion("Jane Doe", Instrument::Disc);
        let twice = once.clone().record_completion("Jane Doe", Instrument::Disc);

        assert_eq!(once, twice);
        assert_eq!(twice.completed("Jane Doe"), &[Instrument::Disc]);
    }

    #[test]
    fn test_record_completion_leaves_other_users_alone() {
        let ledger = CompletionLedger::new()
            .record_completion("John Roe", Instrument::Herrmann)
            .record_completion("Jane Doe", Instrument::Disc);

        assert_eq!(ledger.completed("John Roe"), &[Instrument::Herrmann]);
        assert!(!ledger.is_completed("John Roe", Instrument::Disc));
    }

    #[test]
    fn test_usernames_trimmed_and_case_sensitive() {
        let ledger = CompletionLedger::new().record_completion("  Jane Doe ", Instrument::Disc);

        assert!(ledger.is_completed("Jane Doe", Instrument::Disc));
        assert!(ledger.is_completed(" Jane Doe", Instrument::Disc));
        assert!(!ledger.is_completed("jane doe", Instrument::Disc));
    }

    #[test]
    fn test_json_shape() {
        let ledger = CompletionLedger::new()
            .record_completion("Jane Doe", Instrument::Herrmann)
            .record_completion("Jane Doe", Instrument::Disc);

        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(json, r#"{"Jane Doe":["herrmann","disc"]}"#);
    }

    #[tokio::test]
    async fn test_load_missing_is_empty() {
        let storage = SqliteStorage::new_in_memory().await.unwrap();
        let store = LedgerStore::new(Arc::new(storage));

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_is_empty() {
        let storage = SqliteStorage::new_in_memory().await.unwrap();
        storage.put_value(LEDGER_KEY, "{not json").await.unwrap();
        let store = LedgerStore::new(Arc::new(storage));

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_persist_then_load() {
        let storage = SqliteStorage::new_in_memory().await.unwrap();
        let store = LedgerStore::new(Arc::new(storage));
        let ledger = CompletionLedger::new().record_completion("Jane Doe", Instrument::Disc);

        store.persist(&ledger).await;

        assert_eq!(store.load().await, ledger);
    }
}
