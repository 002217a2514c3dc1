//! Persisted UI preferences with in-process change notifications.

pub mod flag;
pub mod storage;

pub use flag::*;
pub use storage::*;
