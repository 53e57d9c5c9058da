//! Debounced draft autosave
//!
//! Explicit state machine driven by a single cancellable scheduled task:
//! every change cancels the pending task and schedules a new one, so a
//! burst of edits produces exactly one write carrying the latest snapshot.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::warn;

use ebm_common::domain::DraftStore;

/// Delay between the last edit and the persistence call
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

/// How long the Saved state is shown before reverting to Idle
pub const SETTLE_DELAY: Duration = Duration::from_millis(3000);

/// Observable autosave status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Saving,
    Saved,
    Error(String),
}

struct Shared {
    state: Mutex<SaveState>,
    last_saved: Mutex<Option<DateTime<Utc>>>,
}

/// Autosave machine for one draft key.
///
/// Owned by the wizard session that created it; `update` must be called
/// from within a tokio runtime.
pub struct AutoSave<S: DraftStore + 'static> {
    store: Arc<S>,
    key: String,
    debounce: Duration,
    settle: Duration,
    shared: Arc<Shared>,
    pending: Option<JoinHandle<()>>,
}

impl<S: DraftStore + 'static> AutoSave<S> {
    pub fn new(store: Arc<S>, key: impl Into<String>) -> Self {
        Self::with_timing(store, key, DEFAULT_DEBOUNCE, SETTLE_DELAY)
    }

    pub fn with_timing(
        store: Arc<S>,
        key: impl Into<String>,
        debounce: Duration,
        settle: Duration,
    ) -> Self {
        AutoSave {
            store,
            key: key.into(),
            debounce,
            settle,
            shared: Arc::new(Shared {
                state: Mutex::new(SaveState::Idle),
                last_saved: Mutex::new(None),
            }),
            pending: None,
        }
    }

    /// Record a change to the watched data.
    ///
    /// Cancels any scheduled task (debounce or settle timer) and starts a
    /// fresh debounce window holding this snapshot.
    pub fn update(&mut self, data: Value) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        *self.shared.state.lock().unwrap() = SaveState::Saving;

        let store = Arc::clone(&self.store);
        let shared = Arc::clone(&self.shared);
        let key = self.key.clone();
        let debounce = self.debounce;
        let settle = self.settle;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            match store.save(&key, &data).await {
                Ok(()) => {
                    *shared.state.lock().unwrap() = SaveState::Saved;
                    *shared.last_saved.lock().unwrap() = Some(Utc::now());

                    tokio::time::sleep(settle).await;
                    let mut state = shared.state.lock().unwrap();
                    if *state == SaveState::Saved {
                        *state = SaveState::Idle;
                    }
                }
                Err(e) => {
                    // Surfaced to the user through state(); no automatic retry
                    warn!("Auto-save failed for {}: {}", key, e);
                    *shared.state.lock().unwrap() = SaveState::Error(e.to_string());
                }
            }
        }));
    }

    /// Cancel any scheduled write and return to Idle
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        *self.shared.state.lock().unwrap() = SaveState::Idle;
    }

    pub fn state(&self) -> SaveState {
        self.shared.state.lock().unwrap().clone()
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        *self.shared.last_saved.lock().unwrap()
    }
}

impl<S: DraftStore + 'static> Drop for AutoSave<S> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
