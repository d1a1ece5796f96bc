//! Process-wide application state.
//!
//! [`AppState`] is the single owner of the completion ledger: it loads the
//! ledger once at startup and swaps in the updated value after every
//! calculation.

use std::sync::Arc;
use tracing::info;

use crate::analysis::NarrativeAnalyzer;
use crate::error::BeginRejection;
use crate::export::Exporter;
use crate::instruments::Instrument;
use crate::ledger::{CompletionLedger, LedgerStore};
use crate::session::{check_begin, Collaborators, Session};
use crate::storage::Storage;
use crate::submission::ResultSubmitter;

/// Shared services plus the in-memory ledger.
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub ledger_store: LedgerStore,
    pub submitter: Arc<dyn ResultSubmitter>,
    pub analyzer: Arc<dyn NarrativeAnalyzer>,
    pub exporter: Exporter,
    ledger: CompletionLedger,
}

impl AppState {
    /// Wire up services and load the persisted ledger.
    pub async fn new(
        storage: Arc<dyn Storage>,
        submitter: Arc<dyn ResultSubmitter>,
        analyzer: Arc<dyn NarrativeAnalyzer>,
        exporter: Exporter,
    ) -> Self {
        let ledger_store = LedgerStore::new(storage.clone());
        let ledger = ledger_store.load().await;
        info!(users = ledger.users().count(), "Completion ledger loaded");

        Self {
            storage,
            ledger_store,
            submitter,
            analyzer,
            exporter,
            ledger,
        }
    }

    pub fn ledger(&self) -> &CompletionLedger {
        &self.ledger
    }

    /// Gate and start `session` for `username` on `instrument`.
    pub fn begin(
        &self,
        session: &mut Session,
        username: &str,
        instrument: Instrument,
    ) -> Result<(), BeginRejection> {
        let username = check_begin(&self.ledger, username, instrument)?;
        if session.begin(username, instrument) {
            Ok(())
        } else {
            Err(BeginRejection::SessionBusy)
        }
    }

    /// Run the calculation step for `session`, keeping the updated ledger.
    ///
    /// The held ledger is only replaced once the step resolves, so a dropped
    /// future leaves it as it was.
    pub async fn calculate(&mut self, session: &mut Session) {
        let ledger = self.ledger.clone();
        let collaborators = Collaborators {
            submitter: self.submitter.as_ref(),
            analyzer: self.analyzer.as_ref(),
            ledger_store: &self.ledger_store,
        };
        self.ledger = session.calculate(ledger, collaborators).await;
    }
}
