//! Runtime orchestration and lifecycle management.
//!
//! # Main Components
//!
//! - [`SyncSystem`] - Spawns one store per entity type and wires clients and bindings to it
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod sync_system;
pub mod tracing;

pub use sync_system::*;
pub use tracing::*;
