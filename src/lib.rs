//! # Job-board Sync
//!
//! > **Client-side data synchronization for a job-board backend.**
//!
//! This crate keeps a local, observable copy of remote job-board resources (jobs,
//! companies, candidate profiles, applications, conversations, analytics). It combines
//! a typed REST client with one **state-store actor per entity type**, so every consumer
//! reads the same `{ data, loading_state, errors }` record for a key.
//!
//! ## 🏗️ Design
//!
//! ### One store, one writer
//! Each entity type has a single process-wide [`StateStore`](framework::StateStore)
//! running in its own Tokio task. All mutation is a message processed in order by the
//! store's reducer ([`Entry`](framework::Entry)), so there are no locks around entries
//! and no ad hoc global state. Consumers hold cheap, cloneable
//! [`StoreClient`](framework::StoreClient) handles.
//!
//! ### Fetch-on-mount without duplicates
//! A [`Binding`](binding::Binding) mounts a key: if the entry has no data and is not
//! loading, it claims the fetch with `start` and calls the resource client. The claim is
//! a compare-and-set inside the store, so any number of concurrent mounts for one key
//! issue a single request. Every mount owns a cancellation signal; an unmounted fetch
//! releases its claim instead of writing stale data.
//!
//! ### Loud validation
//! Responses can be checked against a structural [`ShapeCheck`](http::ShapeCheck)
//! before decoding. A failed check fails the call by default
//! ([`ValidationPolicy::Enforce`](http::ValidationPolicy)); `Warn` logs and continues.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic store actor and its reducer, written once for every entity.
//! - **Key items**: [`SyncEntity`](framework::SyncEntity), [`StateStore`](framework::StateStore),
//!   [`MockFetcher`](framework::mock::MockFetcher).
//!
//! ### 2. The Wire ([`http`])
//! Versioned URL building, the shared [`ApiClient`](http::ApiClient) and the generic
//! [`ResourceClient`](http::ResourceClient).
//!
//! ### 3. The Glue ([`binding`])
//! Joins a store entry with a data source and exposes an [`EntityView`](binding::EntityView).
//!
//! ### 4. The Interface ([`clients`], [`model`])
//! Typed per-resource operations (search, apply, message...) and the backend DTOs.
//!
//! ### 5. The Session ([`access`], [`prefs`])
//! Role gating through [`has_capability`](access::has_capability) and the persisted
//! sidebar preference.
//!
//! ### 6. The Orchestrator ([`lifecycle`], [`config`])
//! [`SyncSystem`](lifecycle::SyncSystem) spawns and wires everything from layered
//! [`Settings`](config::Settings).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! JOBBOARD__API__BASE_URL=http://localhost:8080 RUST_LOG=info cargo run -- 42
//! ```

pub mod access;
pub mod binding;
pub mod clients;
pub mod config;
pub mod framework;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod prefs;
