use indexmap::IndexMap;

use super::{EntityId, FieldSchema, UnionId};

pub(crate) const QUERY: &str = "Query";
pub(crate) const MUTATION: &str = "Mutation";
pub(crate) const SUBSCRIPTION: &str = "Subscription";

/// One ordered root collection handed to `compile`.
///
/// The keys `Query`, `Mutation` and `Subscription` seed the worklist as
/// output roots; keys starting with `_` are ignored; every other key
/// pre-registers an entity reachable through forward name references.
#[derive(Debug, Default, Clone)]
pub struct RootSet {
    pub(crate) entries: IndexMap<String, RootEntry>,
}

#[derive(Debug, Clone)]
pub enum RootEntry {
    Entity(EntityId),
    Union(UnionId),
    Fields(IndexMap<String, FieldSchema>),
}

impl From<EntityId> for RootEntry {
    fn from(id: EntityId) -> Self {
        RootEntry::Entity(id)
    }
}

impl From<UnionId> for RootEntry {
    fn from(id: UnionId) -> Self {
        RootEntry::Union(id)
    }
}

impl From<IndexMap<String, FieldSchema>> for RootEntry {
    fn from(fields: IndexMap<String, FieldSchema>) -> Self {
        RootEntry::Fields(fields)
    }
}

impl RootSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: impl Into<RootEntry>) -> &mut Self {
        self.entries.insert(key.into(), entry.into());
        self
    }
}
