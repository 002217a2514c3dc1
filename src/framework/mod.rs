//! Generic state-synchronization framework.
//!
//! This module provides the building blocks that are written once and reused for every
//! backend resource.
//!
//! # Main Components
//!
//! - [`SyncEntity`] - Trait that resource types implement to be synchronized
//! - [`Entry`] / [`LoadingState`] - The per-key state record and its reducer
//! - [`StateStore`] - Actor owning all entries of one entity type
//! - [`StoreClient`] - Cloneable handle for dispatching transitions
//!
//! # Testing
//!
//! See [`mock`] for an expectation-based fetcher that stands in for the HTTP layer.

pub mod entity;
pub mod mock;
pub mod state;
pub mod store;

pub use entity::SyncEntity;
pub use state::{Entry, LoadingState, Ticket, TicketIssuer};
pub use store::{StateStore, StoreClient, StoreError, StoreEvent, StoreRequest, Transition};
