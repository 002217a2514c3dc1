//! # Binding Hooks
//!
//! Reconciles one store entry with one data source under a key.
//!
//! On [`mount`](Binding::mount) (and on [`rekey`](BindingHandle::rekey)) a task is spawned
//! that:
//!
//! 1. reads the entry and stops if data is cached or a fetch is already in flight,
//! 2. dispatches `start`, which the store grants to at most one caller per key,
//! 3. awaits the [`Fetcher`],
//! 4. dispatches `succeed` or `fail`, unless the handle was cancelled meanwhile, in which
//!    case it dispatches `abandon` so the key is not left stuck in `Loading`.
//!
//! Consumers read an [`EntityView`] (`entity`, `is_loading`, `loading_state`, `error`).

mod fetcher;
mod hook;

pub use fetcher::Fetcher;
pub use hook::{Binding, BindingHandle, EntityView};
