//! HTTP resource client layer.
//!
//! - [`ApiClient`] - versioned JSON client (`/{prefix}/{version}/{resource}[/{id}][/{action}]`)
//! - [`ResourceClient`] - typed wrapper for one [`SyncEntity`](crate::framework::SyncEntity)
//! - [`ApiPath`] / [`ResourceRequest`] - requests as plain data
//! - [`ShapeCheck`] / [`ValidationPolicy`] - optional structural response checks
//! - [`ApiError`] - transport, status and decode failures

pub mod client;
pub mod error;
pub mod request;
pub mod resource;
pub mod validation;

pub use client::{ApiClient, CallConfig};
pub use error::ApiError;
pub use request::{ApiPath, HttpMethod, ResourceRequest};
pub use resource::ResourceClient;
pub use validation::{each_item, require_fields, ShapeCheck, ShapeOutcome, ValidationPolicy};
