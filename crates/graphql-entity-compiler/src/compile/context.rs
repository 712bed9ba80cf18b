use std::collections::{HashMap, VecDeque, hash_map::Entry};

use indexmap::IndexMap;

use super::names::{NameGenerator, check_reserved};
use crate::{
    error::CompileError,
    graph::{CompiledGraph, EnumNode, Mode, Node, NodeId, ObjectNode, ScalarNode},
    schema::{
        EntityId, ExternalKind, ExternalTypeId, FieldSchema, RootEntry, SchemaRegistry, UnionId,
    },
};

/// One pending unit of work: fill the fields of an already-created node
/// shell from its source, in the given mode. `path` is the root → field
/// chain that first reached the node, carried for error provenance.
pub(crate) struct WorkItem {
    pub(crate) source: WorkSource,
    pub(crate) node: NodeId,
    pub(crate) mode: Mode,
    pub(crate) path: Vec<String>,
}

pub(crate) enum WorkSource {
    Entity(EntityId),
    Fields(IndexMap<String, FieldSchema>),
}

/// Who claimed a compiled name. Two claims of the same (name, mode) pair
/// from different origins are a fatal duplicate-name error.
#[derive(Debug, Clone, PartialEq, Eq)]
enum NameOrigin {
    Entity(EntityId),
    Union(UnionId),
    External(ExternalTypeId),
    Known(String),
    Root,
    Anonymous(usize),
}

/// Per-compilation state: the worklist, the dedup and memoization tables,
/// and the growing graph. Nothing survives a `compile` call.
pub(crate) struct Context<'a> {
    pub(crate) registry: &'a SchemaRegistry,
    pub(crate) graph: CompiledGraph,
    names: NameGenerator,
    /// Non-root top-level entries, the resolution set for forward names.
    pub(crate) known: IndexMap<String, RootEntry>,
    entity_nodes: HashMap<(EntityId, Mode), NodeId>,
    union_nodes: HashMap<UnionId, NodeId>,
    external_nodes: HashMap<ExternalTypeId, NodeId>,
    known_fields_nodes: HashMap<(String, Mode), NodeId>,
    node_names: HashMap<(String, Mode), NameOrigin>,
    anonymous_claims: usize,
    worklist: VecDeque<WorkItem>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(registry: &'a SchemaRegistry) -> Self {
        Context {
            registry,
            graph: CompiledGraph::new(),
            names: NameGenerator::default(),
            known: IndexMap::new(),
            entity_nodes: HashMap::new(),
            union_nodes: HashMap::new(),
            external_nodes: HashMap::new(),
            known_fields_nodes: HashMap::new(),
            node_names: HashMap::new(),
            anonymous_claims: 0,
            worklist: VecDeque::new(),
        }
    }

    pub(crate) fn into_graph(self) -> CompiledGraph {
        self.graph
    }

    pub(crate) fn pop(&mut self) -> Option<WorkItem> {
        self.worklist.pop_front()
    }

    pub(crate) fn enqueue(&mut self, item: WorkItem) {
        tracing::debug!(
            node = %self.graph[item.node].name(),
            mode = %item.mode,
            "enqueueing node for field resolution"
        );
        self.worklist.push_back(item);
    }

    fn claim_name(
        &mut self,
        name: &str,
        mode: Mode,
        origin: NameOrigin,
    ) -> Result<(), CompileError> {
        match self.node_names.entry((name.to_owned(), mode)) {
            Entry::Occupied(existing) if *existing.get() == origin => Ok(()),
            Entry::Occupied(_) => Err(CompileError::DuplicateEntityName {
                name: name.to_owned(),
            }),
            Entry::Vacant(vacant) => {
                vacant.insert(origin);
                Ok(())
            }
        }
    }

    fn claim_anonymous(&mut self, name: &str, mode: Mode) -> Result<(), CompileError> {
        self.anonymous_claims += 1;
        self.claim_name(name, mode, NameOrigin::Anonymous(self.anonymous_claims))
    }

    /// Register or reuse the root node for `name` (`Query`, `Mutation` or
    /// `Subscription`).
    pub(crate) fn root_node(&mut self, name: &str) -> Result<NodeId, CompileError> {
        self.claim_name(name, Mode::Output, NameOrigin::Root)?;
        Ok(self.graph.push_node(Node::Object(ObjectNode {
            name: name.to_owned(),
            comment: None,
            mode: Mode::Output,
            fields: Vec::new(),
        })))
    }

    /// Map a root-collection entity straight onto an existing root node, so
    /// references to it reuse the root instead of compiling a second copy.
    pub(crate) fn alias_entity(&mut self, id: EntityId, node: NodeId) {
        self.entity_nodes.insert((id, Mode::Output), node);
    }

    /// The compiled node for `(entity, mode)`. Creates the node shell and
    /// queues its fields on first request; every later request reuses the
    /// same node, which is what terminates cyclic entity graphs.
    ///
    /// `hint` is the base for the generated name when the entity is
    /// anonymous, typically the referencing field key.
    pub(crate) fn ensure_entity_node(
        &mut self,
        id: EntityId,
        mode: Mode,
        hint: &str,
        path: &[String],
    ) -> Result<NodeId, CompileError> {
        if let Some(&node) = self.entity_nodes.get(&(id, mode)) {
            return Ok(node);
        }
        let registry = self.registry;
        let record = &registry[id];
        let name = match &record.name {
            Some(name) => {
                check_reserved(name)?;
                let name = format!("{name}{}", mode.suffix());
                self.claim_name(&name, mode, NameOrigin::Entity(id))?;
                name
            }
            None => {
                let name = self.names.unique(&format!("{hint}{}", mode.suffix()));
                self.claim_anonymous(&name, mode)?;
                name
            }
        };
        tracing::debug!(%name, mode = %mode, "creating object node");
        let node = self.graph.push_node(Node::Object(ObjectNode {
            name,
            comment: record.comment.clone(),
            mode,
            fields: Vec::new(),
        }));
        self.entity_nodes.insert((id, mode), node);
        self.enqueue(WorkItem {
            source: WorkSource::Entity(id),
            node,
            mode,
            path: path.to_vec(),
        });
        Ok(node)
    }

    /// The compiled node for an inline field map that lives under an
    /// explicit name (a top-level known entry), memoized per (name, mode).
    pub(crate) fn ensure_known_fields_node(
        &mut self,
        known_name: &str,
        fields: &IndexMap<String, FieldSchema>,
        mode: Mode,
        path: &[String],
    ) -> Result<NodeId, CompileError> {
        if let Some(&node) = self
            .known_fields_nodes
            .get(&(known_name.to_owned(), mode))
        {
            return Ok(node);
        }
        check_reserved(known_name)?;
        let name = format!("{known_name}{}", mode.suffix());
        self.claim_name(&name, mode, NameOrigin::Known(known_name.to_owned()))?;
        let node = self.graph.push_node(Node::Object(ObjectNode {
            name,
            comment: None,
            mode,
            fields: Vec::new(),
        }));
        self.known_fields_nodes
            .insert((known_name.to_owned(), mode), node);
        self.enqueue(WorkItem {
            source: WorkSource::Fields(fields.clone()),
            node,
            mode,
            path: path.to_vec(),
        });
        Ok(node)
    }

    /// The compiled node for an inline field map with no identity at all.
    /// Each occurrence compiles to its own node under a generated name.
    pub(crate) fn anonymous_fields_node(
        &mut self,
        hint: &str,
        fields: &IndexMap<String, FieldSchema>,
        mode: Mode,
        path: &[String],
    ) -> Result<NodeId, CompileError> {
        let name = self.names.unique(&format!("{hint}{}", mode.suffix()));
        self.claim_anonymous(&name, mode)?;
        let node = self.graph.push_node(Node::Object(ObjectNode {
            name,
            comment: None,
            mode,
            fields: Vec::new(),
        }));
        self.enqueue(WorkItem {
            source: WorkSource::Fields(fields.clone()),
            node,
            mode,
            path: path.to_vec(),
        });
        Ok(node)
    }

    /// Passthrough node for an external scalar or enum, created on first
    /// use. Externals are shared across modes.
    pub(crate) fn external_node(&mut self, id: ExternalTypeId) -> Result<NodeId, CompileError> {
        if let Some(&node) = self.external_nodes.get(&id) {
            return Ok(node);
        }
        let registry = self.registry;
        let record = &registry[id];
        self.claim_name(&record.name, Mode::Output, NameOrigin::External(id))?;
        let node = match &record.kind {
            ExternalKind::Scalar => self.graph.push_node(Node::Scalar(ScalarNode {
                name: record.name.clone(),
            })),
            ExternalKind::Enum { values } => self.graph.push_node(Node::Enum(EnumNode {
                name: record.name.clone(),
                values: values.clone(),
            })),
        };
        self.external_nodes.insert(id, node);
        Ok(node)
    }

    pub(crate) fn union_node_memo(&self, id: UnionId) -> Option<NodeId> {
        self.union_nodes.get(&id).copied()
    }

    pub(crate) fn remember_union(
        &mut self,
        id: UnionId,
        name: &str,
        node: NodeId,
    ) -> Result<(), CompileError> {
        self.claim_name(name, Mode::Output, NameOrigin::Union(id))?;
        self.union_nodes.insert(id, node);
        Ok(())
    }
}
