use std::sync::{Arc, Mutex, MutexGuard};

use crate::client::{HttpTransport, OqlTransport};
use crate::error::QueryError;
use crate::history::QueryHistory;
use crate::models::{ClientSettings, HistoryEntry};

/// State shared by every command.
///
/// Cloning is cheap; clones share the same transport and history.
#[derive(Clone)]
pub struct AppState {
    /// Channel to the OQL service
    pub transport: Arc<dyn OqlTransport>,

    /// Process-wide execution history
    history: Arc<Mutex<QueryHistory>>,

    pub settings: Arc<ClientSettings>,
}

impl AppState {
    pub fn new(transport: Arc<dyn OqlTransport>, settings: ClientSettings) -> Self {
        let history = QueryHistory::new(settings.history_capacity);
        Self {
            transport,
            history: Arc::new(Mutex::new(history)),
            settings: Arc::new(settings),
        }
    }

    /// State backed by the HTTP transport described in `settings`
    pub fn connect(settings: ClientSettings) -> Result<Self, QueryError> {
        let transport = HttpTransport::new(&settings)?;
        log::info!("OQL client targeting {}", transport.query_url());
        Ok(Self::new(Arc::new(transport), settings))
    }

    /// Lock the history buffer. Entries are plain data, so a lock poisoned
    /// by a panicking holder is still safe to use.
    ///
    /// Crate-private: callers outside go through `history_snapshot` or the
    /// history commands, so the guard is never held across an `.await`.
    pub(crate) fn history(&self) -> MutexGuard<'_, QueryHistory> {
        self.history.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record_history(&self, entry: HistoryEntry) {
        self.history().record(entry);
    }

    /// Copy of every entry, most recent first
    pub fn history_snapshot(&self) -> Vec<HistoryEntry> {
        self.history().all()
    }
}
