//! # Generic Resource Client
//!
//! `ResourceClient<T>` is the typed REST wrapper for one [`SyncEntity`]. It is cheap to
//! clone (the [`ApiClient`] is shared) and implements [`Fetcher`] so a
//! [`Binding`](crate::binding::Binding) can use it directly.

use crate::binding::Fetcher;
use crate::framework::SyncEntity;
use crate::http::client::{ApiClient, CallConfig};
use crate::http::error::ApiError;
use crate::http::request::ApiPath;
use crate::http::validation::{each_item, ShapeOutcome};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::instrument;

/// Type-safe REST access to the `T::RESOURCE` collection.
pub struct ResourceClient<T: SyncEntity> {
    api: Arc<ApiClient>,
    config: CallConfig,
    _entity: PhantomData<fn() -> T>,
}

impl<T: SyncEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            config: self.config.clone(),
            _entity: PhantomData,
        }
    }
}

/// Shape check for a JSON array of `T`.
fn list_check<T: SyncEntity>(value: &Value) -> ShapeOutcome {
    each_item(value, T::shape_check())
}

impl<T: SyncEntity> ResourceClient<T> {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            config: CallConfig::default(),
            _entity: PhantomData,
        }
    }

    /// Uses `config` for every call made through this client.
    pub fn with_config(mut self, config: CallConfig) -> Self {
        self.config = config;
        self
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// `/{resource}`
    pub fn collection_path(&self) -> ApiPath {
        ApiPath::resource(T::RESOURCE)
    }

    /// `/{resource}/{key}`
    pub fn item_path(&self, key: &T::Key) -> ApiPath {
        self.collection_path().id(key)
    }

    #[instrument(skip(self), fields(resource = T::RESOURCE))]
    pub async fn fetch(&self, key: &T::Key) -> Result<T, ApiError> {
        self.api
            .get(&self.item_path(key), T::shape_check(), &self.config)
            .await
    }

    #[instrument(skip(self), fields(resource = T::RESOURCE))]
    pub async fn list(&self, query: Vec<(String, String)>) -> Result<Vec<T>, ApiError> {
        let path = self.collection_path().queries(query);
        self.api
            .get(&path, Some(list_check::<T>), &self.config)
            .await
    }

    #[instrument(skip(self, body), fields(resource = T::RESOURCE))]
    pub async fn create<B: Serialize + Sync + ?Sized>(&self, body: &B) -> Result<T, ApiError> {
        self.api
            .post(&self.collection_path(), Some(body), T::shape_check(), &self.config)
            .await
    }

    #[instrument(skip(self, patch), fields(resource = T::RESOURCE))]
    pub async fn update<B: Serialize + Sync + ?Sized>(
        &self,
        key: &T::Key,
        patch: &B,
    ) -> Result<T, ApiError> {
        self.api
            .patch(&self.item_path(key), Some(patch), T::shape_check(), &self.config)
            .await
    }

    #[instrument(skip(self), fields(resource = T::RESOURCE))]
    pub async fn remove(&self, key: &T::Key) -> Result<(), ApiError> {
        // Backends answer 204 or echo a confirmation object; either way nothing to keep.
        self.api
            .delete::<Value>(&self.item_path(key), None, &self.config)
            .await?;
        Ok(())
    }

    /// `POST /{resource}/{key}/{action}` with an optional body.
    #[instrument(skip(self, body), fields(resource = T::RESOURCE))]
    pub async fn action<B: Serialize + Sync + ?Sized, R: DeserializeOwned>(
        &self,
        key: &T::Key,
        action: &str,
        body: Option<&B>,
    ) -> Result<R, ApiError> {
        let path = self.item_path(key).action(action);
        self.api.post(&path, body, None, &self.config).await
    }

    /// `GET /{resource}/{key}/{action}`.
    #[instrument(skip(self), fields(resource = T::RESOURCE))]
    pub async fn related<R: DeserializeOwned>(
        &self,
        key: &T::Key,
        action: &str,
    ) -> Result<R, ApiError> {
        let path = self.item_path(key).action(action);
        self.api.get(&path, None, &self.config).await
    }
}

#[async_trait]
impl<T: SyncEntity> Fetcher<T> for ResourceClient<T> {
    async fn fetch(&self, key: &T::Key) -> Result<T, ApiError> {
        ResourceClient::fetch(self, key).await
    }
}
