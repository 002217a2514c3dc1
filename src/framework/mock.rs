//! # Mock Fetcher
//!
//! Utilities for testing bindings and views without a backend.
//!
//! [`MockFetcher`] implements [`Fetcher`] from a queue of expectations. Each
//! expectation names the key it expects, the result to hand back and, optionally, how
//! long to hold the response (to keep a fetch "in flight" while a test pokes at it).
//!
//! ```ignore
//! let mock = MockFetcher::<Job>::new();
//! mock.expect_fetch("42").return_ok(job);
//! mock.expect_fetch("43").delayed(Duration::from_millis(50)).return_err(ApiError::Transport("timeout".into()));
//!
//! let binding = Binding::new(store, mock.clone());
//! // ... mount, settle, assert ...
//! mock.verify(); // Ensures all expectations were met
//! ```

use crate::binding::Fetcher;
use crate::framework::SyncEntity;
use crate::http::ApiError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct Expectation<T: SyncEntity> {
    key: T::Key,
    delay: Option<Duration>,
    response: Result<T, ApiError>,
}

/// A fetcher driven by queued expectations.
///
/// Clones share the same queue and call counter, so a test keeps one clone for
/// assertions and hands another to the code under test.
pub struct MockFetcher<T: SyncEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    calls: Arc<AtomicUsize>,
}

impl<T: SyncEntity> Clone for MockFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            expectations: self.expectations.clone(),
            calls: self.calls.clone(),
        }
    }
}

impl<T: SyncEntity> Default for MockFetcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SyncEntity> MockFetcher<T> {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Expects a fetch for `key`.
    pub fn expect_fetch(&self, key: impl Into<T::Key>) -> FetchExpectationBuilder<T> {
        FetchExpectationBuilder {
            key: key.into(),
            delay: None,
            expectations: self.expectations.clone(),
        }
    }

    /// Number of fetches performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl<T: SyncEntity> Fetcher<T> for MockFetcher<T> {
    async fn fetch(&self, key: &T::Key) -> Result<T, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let expectation = self.expectations.lock().unwrap().pop_front();

        match expectation {
            Some(exp) if &exp.key == key => {
                if let Some(delay) = exp.delay {
                    tokio::time::sleep(delay).await;
                }
                exp.response
            }
            Some(exp) => panic!("Expected fetch for {}, got {}", exp.key, key),
            None => panic!("Unexpected fetch for {}", key),
        }
    }
}

/// Builder for `fetch` expectations.
pub struct FetchExpectationBuilder<T: SyncEntity> {
    key: T::Key,
    delay: Option<Duration>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: SyncEntity> FetchExpectationBuilder<T> {
    /// Holds the response for `delay` before returning it.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, ApiError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            key: self.key,
            delay: self.delay,
            response,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Job;

    #[tokio::test]
    async fn test_mock_fetcher_with_expectations() {
        let mock = MockFetcher::<Job>::new();
        mock.expect_fetch("42").return_ok(Job::new("42", "Engineer"));
        mock.expect_fetch("43")
            .return_err(ApiError::Transport("timeout".to_string()));

        let job = mock.fetch(&"42".to_string()).await.unwrap();
        assert_eq!(job.title, "Engineer");

        let err = mock.fetch(&"43".to_string()).await.unwrap_err();
        assert_eq!(err.to_string(), "timeout");

        assert_eq!(mock.calls(), 2);
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_panics_on_leftovers() {
        let mock = MockFetcher::<Job>::new();
        mock.expect_fetch("1").return_ok(Job::new("1", "Designer"));
        mock.verify();
    }
}
