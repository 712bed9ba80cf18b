//! The normalized graph emitted by the compiler, ready to be materialized
//! into a concrete schema-definition API.

mod nodes;
mod type_expr;

use indexmap::IndexMap;

pub use nodes::{CompiledField, EnumNode, Mode, Node, NodeId, ObjectNode, ScalarNode, UnionNode};
pub use type_expr::TypeExpr;

/// The resolved, deduplicated node graph. Append-only during compilation;
/// every node name is unique within its mode namespace.
#[derive(Debug)]
pub struct CompiledGraph {
    nodes: Vec<Node>,
    by_name: IndexMap<(String, Mode), NodeId>,
    pub(crate) query: Option<NodeId>,
    pub(crate) mutation: Option<NodeId>,
    pub(crate) subscription: Option<NodeId>,
    pub(crate) string_scalar: NodeId,
    pub(crate) float_scalar: NodeId,
    pub(crate) boolean_scalar: NodeId,
}

impl CompiledGraph {
    pub(crate) fn new() -> Self {
        let mut graph = CompiledGraph {
            nodes: Vec::new(),
            by_name: IndexMap::new(),
            query: None,
            mutation: None,
            subscription: None,
            string_scalar: NodeId::from(0),
            float_scalar: NodeId::from(0),
            boolean_scalar: NodeId::from(0),
        };
        graph.string_scalar = graph.push_node(Node::Scalar(ScalarNode {
            name: "String".to_owned(),
        }));
        graph.float_scalar = graph.push_node(Node::Scalar(ScalarNode {
            name: "Float".to_owned(),
        }));
        graph.boolean_scalar = graph.push_node(Node::Scalar(ScalarNode {
            name: "Boolean".to_owned(),
        }));
        graph
    }

    pub(crate) fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId::from(self.nodes.len());
        self.by_name.insert((node.name().to_owned(), node.mode()), id);
        self.nodes.push(node);
        id
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[usize::from(id)]
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// Look a node up by its compiled name within one mode namespace.
    pub fn lookup(&self, name: &str, mode: Mode) -> Option<NodeId> {
        self.by_name.get(&(name.to_owned(), mode)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::from(index), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn query(&self) -> Option<NodeId> {
        self.query
    }

    pub fn mutation(&self) -> Option<NodeId> {
        self.mutation
    }

    pub fn subscription(&self) -> Option<NodeId> {
        self.subscription
    }

    /// Convenience accessor for object-shaped nodes.
    pub fn object(&self, id: NodeId) -> Option<&ObjectNode> {
        self[id].as_object()
    }
}

impl std::ops::Index<NodeId> for CompiledGraph {
    type Output = Node;

    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[usize::from(index)]
    }
}
