//! # SyncEntity Trait
//!
//! The contract every backend resource (Job, Company, Application, ...) implements so the
//! generic [`StateStore`](crate::framework::StateStore), [`Binding`](crate::binding::Binding)
//! and [`ResourceClient`](crate::http::ResourceClient) can be written once and reused for
//! every entity.
//!
//! # Architecture Note
//! An entity only declares *where it lives* (`RESOURCE`), *how it is keyed* (`Key`) and,
//! optionally, *what a well-formed response looks like* (`shape_check`). Everything else
//! (state transitions, fetch-on-mount, error capture) is provided by the framework.

use crate::http::ShapeCheck;
use serde::de::DeserializeOwned;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any backend resource must implement to be synchronized into a store.
///
/// Most implementations are generated by the `define_resource!` macro in [`crate::model`].
pub trait SyncEntity: Clone + Debug + DeserializeOwned + Send + Sync + 'static {
    /// The key an entry is stored under (e.g. the job id).
    type Key: Eq + Hash + Clone + Send + Sync + Display + Debug + 'static;

    /// Resource segment of the REST path, e.g. `"jobs"` in `/api/v1/jobs/42`.
    const RESOURCE: &'static str;

    /// Structural check run on the raw JSON before it is decoded.
    ///
    /// `None` skips the check. Whether a failing check aborts the call is decided by
    /// the client's [`ValidationPolicy`](crate::http::ValidationPolicy).
    fn shape_check() -> Option<ShapeCheck> {
        None
    }
}
