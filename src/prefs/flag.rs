use crate::prefs::storage::{KeyValueStorage, PrefsError};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Storage key of the collapsed-sidebar preference.
pub const SIDEBAR_COLLAPSED_KEY: &str = "jobboard.sidebar_collapsed";

/// Broadcast to in-process listeners after every successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceChanged {
    pub key: String,
    pub value: bool,
}

/// A persisted boolean UI preference.
///
/// Reads never fail: a missing, unparseable or unreachable value reads as the default.
#[derive(Clone)]
pub struct PreferenceFlag {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    default: bool,
    changes: broadcast::Sender<PreferenceChanged>,
}

impl PreferenceFlag {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>, default: bool) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            storage,
            key: key.into(),
            default,
            changes,
        }
    }

    /// The collapsed-sidebar flag, default `false`.
    pub fn sidebar_collapsed(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::new(storage, SIDEBAR_COLLAPSED_KEY, false)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PreferenceChanged> {
        self.changes.subscribe()
    }

    pub async fn get(&self) -> bool {
        match self.storage.get(&self.key).await {
            Ok(Some(raw)) => match raw.trim() {
                "true" => true,
                "false" => false,
                other => {
                    warn!(key = %self.key, value = other, "Unreadable preference, using default");
                    self.default
                }
            },
            Ok(None) => self.default,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Preference storage unavailable, using default");
                self.default
            }
        }
    }

    /// Persists `value` and notifies subscribers. Nothing is broadcast if the write fails.
    pub async fn set(&self, value: bool) -> Result<(), PrefsError> {
        self.storage
            .set(&self.key, if value { "true" } else { "false" })
            .await?;
        debug!(key = %self.key, value, "Preference written");
        // no subscribers is fine
        let _ = self.changes.send(PreferenceChanged {
            key: self.key.clone(),
            value,
        });
        Ok(())
    }

    /// Flips the flag and returns the new value.
    pub async fn toggle(&self) -> Result<bool, PrefsError> {
        let next = !self.get().await;
        self.set(next).await?;
        Ok(next)
    }
}
