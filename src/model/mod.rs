//! Pure data structures (DTOs) mirroring the backend's JSON, each implementing
//! [`SyncEntity`](crate::framework::SyncEntity).
//!
//! `define_resource!` wires an entity into the framework and generates the
//! `{Entity}Store`, `{Entity}Binding` and `{Entity}Resource` aliases.

macro_rules! define_resource {
    ($entity:ident, $resource:literal, $check:expr) => {
        impl $crate::framework::SyncEntity for $entity {
            type Key = String;
            const RESOURCE: &'static str = $resource;

            fn shape_check() -> Option<$crate::http::ShapeCheck> {
                $check
            }
        }

        paste::paste! {
            #[doc = "State store client for [`" $entity "`]."]
            pub type [<$entity Store>] = $crate::framework::StoreClient<$entity>;
            #[doc = "Binding for [`" $entity "`]."]
            pub type [<$entity Binding>] = $crate::binding::Binding<$entity>;
            #[doc = "REST client for [`" $entity "`]."]
            pub type [<$entity Resource>] = $crate::http::ResourceClient<$entity>;
        }
    };
}

pub mod analytics;
pub mod application;
pub mod candidate;
pub mod company;
pub mod conversation;
pub mod job;

pub use analytics::*;
pub use application::*;
pub use candidate::*;
pub use company::*;
pub use conversation::*;
pub use job::*;
