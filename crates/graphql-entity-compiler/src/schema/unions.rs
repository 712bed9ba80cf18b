use indexmap::IndexMap;

use super::{DiscriminatorHandle, EntityId, FieldSchema, SchemaRegistry};
use crate::error::SchemaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnionId(usize);

impl From<usize> for UnionId {
    fn from(value: usize) -> Self {
        UnionId(value)
    }
}

impl From<UnionId> for usize {
    fn from(value: UnionId) -> Self {
        value.0
    }
}

/// A closed set of 2+ object entities with a runtime discriminator picking
/// the member a resolved value belongs to. Unions are output-only.
#[derive(Debug, Clone)]
pub struct UnionRecord {
    pub(crate) name: String,
    pub(crate) comment: Option<String>,
    pub(crate) members: Vec<UnionMember>,
    pub(crate) discriminator: DiscriminatorHandle,
}

/// What a union member is allowed to be.
#[derive(Debug, Clone)]
pub enum UnionMember {
    Entity(EntityId),
    /// Forward reference, resolved against the known-entity set.
    Name(String),
    /// Inline object literal, compiled under a generated name.
    Fields(IndexMap<String, FieldSchema>),
}

impl From<EntityId> for UnionMember {
    fn from(id: EntityId) -> Self {
        UnionMember::Entity(id)
    }
}

impl From<&str> for UnionMember {
    fn from(name: &str) -> Self {
        UnionMember::Name(name.to_owned())
    }
}

impl From<IndexMap<String, FieldSchema>> for UnionMember {
    fn from(fields: IndexMap<String, FieldSchema>) -> Self {
        UnionMember::Fields(fields)
    }
}

impl std::ops::Index<UnionId> for SchemaRegistry {
    type Output = UnionRecord;

    fn index(&self, index: UnionId) -> &Self::Output {
        &self.unions[index.0]
    }
}

impl SchemaRegistry {
    /// Declare a union. Fewer than 2 members is a construction error.
    pub fn union(
        &mut self,
        name: impl Into<String>,
        comment: Option<&str>,
        members: Vec<UnionMember>,
        discriminator: DiscriminatorHandle,
    ) -> Result<UnionId, SchemaError> {
        let name = name.into();
        if members.len() < 2 {
            return Err(SchemaError::UnionArity {
                union: name,
                got: members.len(),
            });
        }
        let id = UnionId(self.unions.len());
        self.unions.push(UnionRecord {
            name,
            comment: comment.map(str::to_owned),
            members,
            discriminator,
        });
        Ok(id)
    }
}
