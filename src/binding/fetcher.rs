use crate::framework::SyncEntity;
use crate::http::ApiError;
use async_trait::async_trait;

/// Source of entity data for a [`Binding`](super::Binding).
///
/// Implemented by [`ResourceClient`](crate::http::ResourceClient) for the real backend and
/// by [`MockFetcher`](crate::framework::mock::MockFetcher) in tests.
#[async_trait]
pub trait Fetcher<T: SyncEntity>: Send + Sync + 'static {
    async fn fetch(&self, key: &T::Key) -> Result<T, ApiError>;
}
