//! # State Store
//!
//! The process-wide state container for one entity type.
//!
//! ## Key Types
//!
//! - [`StateStore`]: The actor that owns every [`Entry`] for an entity type.
//! - [`StoreClient`]: The cloneable handle views and bindings dispatch through.
//! - [`StoreRequest`]: The transition messages (the "actions" of a reducer).
//! - [`StoreEvent`]: Change notification broadcast after each applied transition.
//! - [`StoreError`]: Mailbox failures.

use crate::framework::entity::SyncEntity;
use crate::framework::state::{Entry, LoadingState, Ticket, TicketIssuer};
use std::collections::HashMap;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. MESSAGES & ERRORS
// =============================================================================

/// Errors raised when the store actor cannot be reached.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("State store closed")]
    StoreClosed,
    #[error("State store dropped response channel")]
    StoreDropped,
}

/// One-shot reply channel used by the store.
pub type Response<T> = oneshot::Sender<T>;

/// Transition requests processed by the [`StateStore`].
///
/// Every mutation of an entry goes through one of these variants, so the store's
/// mailbox is the single serialization point for all writes to an entity type.
#[derive(Debug)]
pub enum StoreRequest<T: SyncEntity> {
    Snapshot {
        key: T::Key,
        respond_to: Response<Entry<T>>,
    },
    Start {
        key: T::Key,
        force: bool,
        respond_to: Response<Option<Ticket>>,
    },
    Succeed {
        key: T::Key,
        ticket: Ticket,
        payload: T,
        respond_to: Response<bool>,
    },
    Fail {
        key: T::Key,
        ticket: Ticket,
        message: String,
        respond_to: Response<bool>,
    },
    Abandon {
        key: T::Key,
        ticket: Ticket,
        respond_to: Response<bool>,
    },
    Clear {
        key: T::Key,
        respond_to: Response<()>,
    },
    ClearAll {
        respond_to: Response<usize>,
    },
    Len {
        respond_to: Response<usize>,
    },
}

/// Which transition produced a [`StoreEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started,
    Succeeded,
    Failed,
    Abandoned,
    Cleared,
}

/// Broadcast after every transition that was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreEvent<K> {
    pub key: K,
    pub transition: Transition,
    pub loading_state: LoadingState,
}

// =============================================================================
// 2. THE STORE ACTOR
// =============================================================================

/// The actor that owns all entries of one entity type.
///
/// Requests are processed one at a time, so `start` doubles as a compare-and-set:
/// two bindings racing for the same key cannot both obtain a [`Ticket`].
/// Cleared entries are removed; tickets come from one issuer for the whole store, so a
/// recreated entry never accepts a ticket handed out before the clear.
pub struct StateStore<T: SyncEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    entries: HashMap<T::Key, Entry<T>>,
    tickets: TicketIssuer,
    events: broadcast::Sender<StoreEvent<T::Key>>,
}

impl<T: SyncEntity> StateStore<T> {
    /// Creates the store and its client.
    ///
    /// `buffer_size` bounds the mailbox; dispatches wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (events, _) = broadcast::channel(buffer_size.max(16));
        let store = Self {
            receiver,
            entries: HashMap::new(),
            tickets: TicketIssuer::new(),
            events: events.clone(),
        };
        (store, StoreClient::new(sender, events))
    }

    /// Runs the reducer loop until every client has been dropped.
    pub async fn run(mut self) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Snapshot { key, respond_to } => {
                    let entry = self.entries.get(&key).cloned().unwrap_or_default();
                    debug!(entity_type, %key, state = ?entry.loading_state, "Snapshot");
                    let _ = respond_to.send(entry);
                }
                StoreRequest::Start {
                    key,
                    force,
                    respond_to,
                } => {
                    let entry = self.entries.entry(key.clone()).or_default();
                    let ticket = entry.start(&mut self.tickets, force);
                    match ticket {
                        Some(ticket) => {
                            debug!(entity_type, %key, %ticket, force, "Started");
                            self.notify(key, Transition::Started);
                        }
                        None => debug!(
                            entity_type,
                            %key,
                            state = ?entry.loading_state,
                            "Start rejected, fetch in flight or data present"
                        ),
                    }
                    let _ = respond_to.send(ticket);
                }
                StoreRequest::Succeed {
                    key,
                    ticket,
                    payload,
                    respond_to,
                } => {
                    let applied = self
                        .entries
                        .get_mut(&key)
                        .is_some_and(|entry| entry.succeed(ticket, payload));
                    if applied {
                        info!(entity_type, %key, "Loaded");
                        self.notify(key, Transition::Succeeded);
                    } else {
                        warn!(entity_type, %key, %ticket, "Stale success ignored");
                    }
                    let _ = respond_to.send(applied);
                }
                StoreRequest::Fail {
                    key,
                    ticket,
                    message,
                    respond_to,
                } => {
                    let applied = match self.entries.get_mut(&key) {
                        Some(entry) => entry.fail(ticket, message.as_str()),
                        None => false,
                    };
                    if applied {
                        warn!(entity_type, %key, error = %message, "Load failed");
                        self.notify(key, Transition::Failed);
                    } else {
                        warn!(entity_type, %key, %ticket, "Stale failure ignored");
                    }
                    let _ = respond_to.send(applied);
                }
                StoreRequest::Abandon {
                    key,
                    ticket,
                    respond_to,
                } => {
                    let applied = self
                        .entries
                        .get_mut(&key)
                        .is_some_and(|entry| entry.abandon(ticket));
                    if applied {
                        debug!(entity_type, %key, %ticket, "Abandoned");
                        if self.entries.get(&key).is_some_and(Entry::is_vacant) {
                            self.entries.remove(&key);
                        }
                        self.notify(key, Transition::Abandoned);
                    }
                    let _ = respond_to.send(applied);
                }
                StoreRequest::Clear { key, respond_to } => {
                    if self.entries.remove(&key).is_some() {
                        debug!(entity_type, %key, "Cleared");
                        self.notify(key, Transition::Cleared);
                    }
                    let _ = respond_to.send(());
                }
                StoreRequest::ClearAll { respond_to } => {
                    let removed: Vec<T::Key> = self.entries.drain().map(|(key, _)| key).collect();
                    for key in &removed {
                        self.notify(key.clone(), Transition::Cleared);
                    }
                    info!(entity_type, count = removed.len(), "Cleared all");
                    let _ = respond_to.send(removed.len());
                }
                StoreRequest::Len { respond_to } => {
                    let _ = respond_to.send(self.entries.len());
                }
            }
        }

        info!(entity_type, size = self.entries.len(), "Shutdown");
    }

    fn notify(&self, key: T::Key, transition: Transition) {
        let loading_state = self
            .entries
            .get(&key)
            .map(|entry| entry.loading_state)
            .unwrap_or_default();
        // No subscribers is fine.
        let _ = self.events.send(StoreEvent {
            key,
            transition,
            loading_state,
        });
    }
}

// =============================================================================
// 3. THE CLIENT
// =============================================================================

/// Cheap, cloneable handle to a [`StateStore`].
pub struct StoreClient<T: SyncEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
    events: broadcast::Sender<StoreEvent<T::Key>>,
}

impl<T: SyncEntity> Clone for StoreClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            events: self.events.clone(),
        }
    }
}

impl<T: SyncEntity> StoreClient<T> {
    pub fn new(
        sender: mpsc::Sender<StoreRequest<T>>,
        events: broadcast::Sender<StoreEvent<T::Key>>,
    ) -> Self {
        Self { sender, events }
    }

    /// Subscribes to transitions applied from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent<T::Key>> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self, key: T::Key) -> Result<Entry<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Snapshot { key, respond_to })
            .await
    }

    /// Claims the fetch for `key`.
    ///
    /// `None` means another fetch is already in flight, or the entry already holds data
    /// and `force` is not set.
    pub async fn start(&self, key: T::Key, force: bool) -> Result<Option<Ticket>, StoreError> {
        self.request(|respond_to| StoreRequest::Start {
            key,
            force,
            respond_to,
        })
        .await
    }

    pub async fn succeed(&self, key: T::Key, ticket: Ticket, payload: T) -> Result<bool, StoreError> {
        self.request(|respond_to| StoreRequest::Succeed {
            key,
            ticket,
            payload,
            respond_to,
        })
        .await
    }

    pub async fn fail(
        &self,
        key: T::Key,
        ticket: Ticket,
        message: impl Into<String>,
    ) -> Result<bool, StoreError> {
        let message = message.into();
        self.request(|respond_to| StoreRequest::Fail {
            key,
            ticket,
            message,
            respond_to,
        })
        .await
    }

    pub async fn abandon(&self, key: T::Key, ticket: Ticket) -> Result<bool, StoreError> {
        self.request(|respond_to| StoreRequest::Abandon {
            key,
            ticket,
            respond_to,
        })
        .await
    }

    pub async fn clear(&self, key: T::Key) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Clear { key, respond_to })
            .await
    }

    /// Clears every entry, returning how many were reset.
    pub async fn clear_all(&self) -> Result<usize, StoreError> {
        self.request(|respond_to| StoreRequest::ClearAll { respond_to })
            .await
    }

    pub async fn len(&self) -> Result<usize, StoreError> {
        self.request(|respond_to| StoreRequest::Len { respond_to })
            .await
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> StoreRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)
    }
}
