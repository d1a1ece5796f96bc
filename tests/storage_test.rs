//! Integration tests for SQLite storage layer
//!
//! Tests database operations using in-memory and on-disk SQLite databases.

use std::sync::Arc;

use noesis_assessment::answers::{Answer, AnswerStore};
use noesis_assessment::config::DatabaseConfig;
use noesis_assessment::instruments::Instrument;
use noesis_assessment::ledger::{CompletionLedger, LedgerStore, LEDGER_KEY};
use noesis_assessment::scoring::score;
use noesis_assessment::storage::{SqliteStorage, Storage, Submission};

/// Create an in-memory storage instance for testing
async fn create_test_storage() -> SqliteStorage {
    SqliteStorage::new_in_memory()
        .await
        .expect("Failed to create in-memory storage")
}

#[cfg(test)]
mod kv_tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_get_value() {
        let storage = create_test_storage().await;

        storage.put_value("greeting", "hello").await.unwrap();

        let value = storage.get_value("greeting").await.unwrap();
        assert_eq!(value.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_get_nonexistent_value() {
        let storage = create_test_storage().await;

        let value = storage.get_value("nonexistent").await.unwrap();
        assert!(value.is_none(), "Should return None for missing key");
    }
}

#[cfg(test)]
mod submission_tests {
    use super::*;

    #[tokio::test]
    async fn test_record_and_list_submissions() {
        let storage = create_test_storage().await;

        let mut answers = AnswerStore::new();
        answers.set(1, Answer::new(Some("Adventurous"), Some("Analytical")).unwrap());
        let disc = Submission::new("Jane Doe", &score(Instrument::Disc, &answers)).unwrap();
        let herrmann =
            Submission::new("Jane Doe", &score(Instrument::Herrmann, &AnswerStore::new())).unwrap();
        let other = Submission::new("John Roe", &score(Instrument::Disc, &answers)).unwrap();

        storage.record_submission(&disc).await.unwrap();
        storage.record_submission(&herrmann).await.unwrap();
        storage.record_submission(&other).await.unwrap();

        let listed = storage.list_submissions("Jane Doe").await.unwrap();
        assert_eq!(listed.len(), 2);

        let recorded_disc = listed.iter().find(|s| s.id == disc.id).unwrap();
        assert_eq!(recorded_disc.instrument, Instrument::Disc);
        assert_eq!(recorded_disc.scores["Dominance"], 1);
        assert_eq!(recorded_disc.scores["Conscientiousness"], -1);
        assert_eq!(
            recorded_disc.submitted_at.timestamp(),
            disc.submitted_at.timestamp()
        );
    }

    #[tokio::test]
    async fn test_duplicate_submission_id_fails() {
        let storage = create_test_storage().await;
        let submission =
            Submission::new("Jane Doe", &score(Instrument::Disc, &AnswerStore::new())).unwrap();

        storage.record_submission(&submission).await.unwrap();
        assert!(storage.record_submission(&submission).await.is_err());
    }
}

#[cfg(test)]
mod ledger_tests {
    use super::*;

    #[tokio::test]
    async fn test_ledger_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("data").join("noesis.db"),
            max_connections: 2,
        };

        let ledger = CompletionLedger::new()
            .record_completion("Jane Doe", Instrument::Disc)
            .record_completion("John Roe", Instrument::Herrmann);
        {
            let storage = SqliteStorage::new(&config).await.unwrap();
            LedgerStore::new(Arc::new(storage)).persist(&ledger).await;
        }

        let reopened = SqliteStorage::new(&config).await.unwrap();
        let raw = reopened.get_value(LEDGER_KEY).await.unwrap().unwrap();
        assert_eq!(raw, r#"{"Jane Doe":["disc"],"John Roe":["herrmann"]}"#);

        let loaded = LedgerStore::new(Arc::new(reopened)).load().await;
        assert_eq!(loaded, ledger);
    }

    #[tokio::test]
    async fn test_ledger_with_unknown_instrument_is_treated_as_empty() {
        let storage = create_test_storage().await;
        storage
            .put_value(LEDGER_KEY, r#"{"Jane Doe":["mbti"]}"#)
            .await
            .unwrap();

        let loaded = LedgerStore::new(Arc::new(storage)).load().await;
        assert!(loaded.is_empty());
    }
}
