use super::fetcher::Fetcher;
use crate::framework::{Entry, LoadingState, StoreClient, StoreError, SyncEntity};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Read-only view a consumer renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityView<T> {
    pub entity: Option<T>,
    pub is_loading: bool,
    pub loading_state: LoadingState,
    pub error: Option<String>,
}

impl<T> From<Entry<T>> for EntityView<T> {
    fn from(entry: Entry<T>) -> Self {
        Self {
            is_loading: entry.is_loading(),
            loading_state: entry.loading_state,
            entity: entry.data,
            error: entry.errors,
        }
    }
}

/// Joins one entity store with one data source.
///
/// A `Binding` is shared by every consumer of an entity type; each consumer calls
/// [`mount`](Binding::mount) with the key it cares about.
pub struct Binding<T: SyncEntity> {
    store: StoreClient<T>,
    fetcher: Arc<dyn Fetcher<T>>,
}

impl<T: SyncEntity> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            fetcher: self.fetcher.clone(),
        }
    }
}

impl<T: SyncEntity> Binding<T> {
    pub fn new(store: StoreClient<T>, fetcher: impl Fetcher<T>) -> Self {
        Self {
            store,
            fetcher: Arc::new(fetcher),
        }
    }

    pub fn store(&self) -> &StoreClient<T> {
        &self.store
    }

    /// Starts reconciling `key`: fetches it unless it is cached or already in flight.
    pub fn mount(&self, key: T::Key) -> BindingHandle<T> {
        let (cancel, signal) = watch::channel(false);
        let task = self.spawn(key.clone(), false, signal);
        BindingHandle {
            binding: self.clone(),
            key,
            cancel,
            task: Some(task),
        }
    }

    /// Current view of `key` without mounting anything.
    pub async fn view(&self, key: T::Key) -> Result<EntityView<T>, StoreError> {
        Ok(self.store.snapshot(key).await?.into())
    }

    fn spawn(&self, key: T::Key, force: bool, signal: watch::Receiver<bool>) -> JoinHandle<()> {
        let store = self.store.clone();
        let fetcher = self.fetcher.clone();
        tokio::spawn(async move {
            if let Err(e) = reconcile(&store, fetcher.as_ref(), key.clone(), force, signal).await {
                warn!(resource = T::RESOURCE, %key, error = %e, "Binding lost its store");
            }
        })
    }
}

/// A mounted binding for one key.
///
/// Dropping the handle (or calling [`unmount`](BindingHandle::unmount)) cancels the fetch
/// it started; a cancelled fetch releases its claim without writing a result.
pub struct BindingHandle<T: SyncEntity> {
    binding: Binding<T>,
    key: T::Key,
    cancel: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl<T: SyncEntity> BindingHandle<T> {
    pub fn key(&self) -> &T::Key {
        &self.key
    }

    pub async fn view(&self) -> Result<EntityView<T>, StoreError> {
        self.binding.view(self.key.clone()).await
    }

    /// Switches to `key`, cancelling the fetch for the previous key.
    pub fn rekey(&mut self, key: T::Key) {
        if key == self.key {
            return;
        }
        self.cancel.send_replace(true);
        let (cancel, signal) = watch::channel(false);
        self.cancel = cancel;
        self.key = key.clone();
        self.task = Some(self.binding.spawn(key, false, signal));
    }

    /// Refetches the current key even if data is cached.
    pub async fn refresh(&mut self) {
        self.settled().await;
        let signal = self.cancel.subscribe();
        self.task = Some(self.binding.spawn(self.key.clone(), true, signal));
    }

    /// Waits for the current reconcile task to finish.
    pub async fn settled(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!(resource = T::RESOURCE, key = %self.key, error = %e, "Binding task failed");
            }
        }
    }

    pub fn unmount(self) {}
}

impl<T: SyncEntity> Drop for BindingHandle<T> {
    fn drop(&mut self) {
        self.cancel.send_replace(true);
    }
}

async fn reconcile<T: SyncEntity>(
    store: &StoreClient<T>,
    fetcher: &dyn Fetcher<T>,
    key: T::Key,
    force: bool,
    mut signal: watch::Receiver<bool>,
) -> Result<(), StoreError> {
    let entry = store.snapshot(key.clone()).await?;
    if entry.is_loading() {
        debug!(resource = T::RESOURCE, %key, "Fetch already in flight");
        return Ok(());
    }
    if entry.data.is_some() && !force {
        debug!(resource = T::RESOURCE, %key, "Cached");
        return Ok(());
    }
    if is_cancelled(&signal) {
        return Ok(());
    }

    // The store re-checks both conditions above; this snapshot can be stale.
    let Some(ticket) = store.start(key.clone(), force).await? else {
        debug!(resource = T::RESOURCE, %key, "Lost the race to another binding");
        return Ok(());
    };

    let outcome = tokio::select! {
        result = fetcher.fetch(&key) => Some(result),
        _ = cancelled(&mut signal) => None,
    };

    match outcome {
        Some(result) if !is_cancelled(&signal) => match result {
            Ok(payload) => {
                store.succeed(key, ticket, payload).await?;
            }
            Err(e) => {
                store.fail(key, ticket, e.to_string()).await?;
            }
        },
        _ => {
            debug!(resource = T::RESOURCE, %key, %ticket, "Cancelled, releasing fetch");
            store.abandon(key, ticket).await?;
        }
    }
    Ok(())
}

fn is_cancelled(signal: &watch::Receiver<bool>) -> bool {
    *signal.borrow()
}

async fn cancelled(signal: &mut watch::Receiver<bool>) {
    loop {
        if is_cancelled(signal) {
            return;
        }
        // A dropped sender means the handle is gone.
        if signal.changed().await.is_err() {
            return;
        }
    }
}
