//! Role gating for dashboard routes.

pub mod guard;
pub mod role;

pub use guard::*;
pub use role::*;
