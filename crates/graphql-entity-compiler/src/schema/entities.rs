use indexmap::IndexMap;

use super::{FieldSchema, SchemaRegistry};
use crate::error::SchemaError;

/// Opaque identity of a registered entity. Assigned at registration time and
/// used as the memoization key everywhere, instead of runtime identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(usize);

impl From<usize> for EntityId {
    fn from(value: usize) -> Self {
        EntityId(value)
    }
}

impl From<EntityId> for usize {
    fn from(value: EntityId) -> Self {
        value.0
    }
}

/// A named bag of field descriptors.
#[derive(Debug, Default, Clone)]
pub struct EntityRecord {
    pub(crate) name: Option<String>,
    pub(crate) comment: Option<String>,
    pub(crate) fields: IndexMap<String, FieldSchema>,
}

impl std::ops::Index<EntityId> for SchemaRegistry {
    type Output = EntityRecord;

    fn index(&self, index: EntityId) -> &Self::Output {
        &self.entities[index.0]
    }
}

impl SchemaRegistry {
    /// Register an entity with an explicit name. Name collisions within one
    /// compiled mode are detected by `compile`, not here.
    pub fn entity(&mut self, name: impl Into<String>) -> EntityId {
        self.push_entity(EntityRecord {
            name: Some(name.into()),
            ..Default::default()
        })
    }

    /// Register an entity with no identity of its own; the compiler
    /// synthesizes a unique name for it.
    pub fn anonymous_entity(&mut self) -> EntityId {
        self.push_entity(EntityRecord::default())
    }

    /// Register a subtype: the parent's already-registered fields are copied
    /// in first, then the subtype's own registrations override per key.
    /// Sharing descriptor values is safe, they are frozen after registration.
    pub fn entity_extending(&mut self, name: impl Into<String>, parent: EntityId) -> EntityId {
        let fields = self[parent].fields.clone();
        self.push_entity(EntityRecord {
            name: Some(name.into()),
            comment: None,
            fields,
        })
    }

    /// Attach or overwrite one field. Last registration wins.
    pub fn attach_field(
        &mut self,
        entity: EntityId,
        key: impl Into<String>,
        schema: FieldSchema,
    ) {
        self.entities[entity.0].fields.insert(key.into(), schema);
    }

    /// Entity-level documentation.
    pub fn entity_comment(&mut self, entity: EntityId, comment: impl Into<String>) {
        self.entities[entity.0].comment = Some(comment.into());
    }

    /// Synthesize a new entity by copying fields from two or more sources in
    /// listed order, later sources overriding earlier on key collision.
    pub fn merge(
        &mut self,
        name: impl Into<String>,
        sources: &[EntityId],
    ) -> Result<EntityId, SchemaError> {
        if sources.len() < 2 {
            return Err(SchemaError::MergeArity(sources.len()));
        }
        let mut fields = IndexMap::new();
        for source in sources {
            for (key, schema) in &self[*source].fields {
                fields.insert(key.clone(), schema.clone());
            }
        }
        Ok(self.push_entity(EntityRecord {
            name: Some(name.into()),
            comment: None,
            fields,
        }))
    }

    fn push_entity(&mut self, record: EntityRecord) -> EntityId {
        let id = EntityId(self.entities.len());
        self.entities.push(record);
        id
    }
}
