//! The input model: everything callers register before calling
//! [`compile`](crate::compile).

mod entities;
mod externals;
pub mod field;
mod handles;
mod roots;
mod unions;

pub use entities::EntityId;
pub use externals::ExternalTypeId;
pub use field::{FieldSchema, TypeArg, Validators};
pub use handles::{AssertHandle, DiscriminatorHandle, ResolverHandle};
pub use roots::{RootEntry, RootSet};
pub use unions::{UnionId, UnionMember};

pub(crate) use entities::EntityRecord;
pub(crate) use roots::{MUTATION, QUERY, SUBSCRIPTION};
pub(crate) use externals::{ExternalKind, ExternalTypeRecord};
pub(crate) use unions::UnionRecord;

/// Central registration surface. Owns every entity, union and external type
/// record, addressed by opaque ids.
///
/// The registry is process-local to one compilation universe; nothing leaks
/// between registries, so concurrent compilations of independent schemas
/// each use their own.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    pub(crate) entities: Vec<EntityRecord>,
    pub(crate) unions: Vec<UnionRecord>,
    pub(crate) externals: Vec<ExternalTypeRecord>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}
