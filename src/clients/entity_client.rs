use crate::framework::SyncEntity;
use crate::http::{ApiError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard operations.
///
/// Implementors only expose their inner [`ResourceClient`]; `get` and `delete` come for
/// free.
#[async_trait]
pub trait EntityClient<T: SyncEntity>: Send + Sync {
    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Fetch an entity by key.
    #[tracing::instrument(skip(self))]
    async fn get(&self, key: T::Key) -> Result<T, ApiError> {
        tracing::debug!("Sending request");
        self.inner().fetch(&key).await
    }

    /// Delete an entity by key.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, key: T::Key) -> Result<(), ApiError> {
        tracing::debug!("Sending request");
        self.inner().remove(&key).await
    }
}
