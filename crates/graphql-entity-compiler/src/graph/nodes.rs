use std::fmt;

use serde_json::Value;

use super::TypeExpr;
use crate::{
    decorate::DecoratorUse,
    schema::{DiscriminatorHandle, ResolverHandle, Validators},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl From<usize> for NodeId {
    fn from(value: usize) -> Self {
        NodeId(value)
    }
}

impl From<NodeId> for usize {
    fn from(value: NodeId) -> Self {
        value.0
    }
}

/// Compilation context of a node. Each mode has its own namespace and its
/// own naming suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mode {
    Output,
    Input,
    Argument,
}

impl Mode {
    pub(crate) fn suffix(self) -> &'static str {
        match self {
            Mode::Output => "",
            Mode::Input => "Input",
            Mode::Argument => "_Arg",
        }
    }

    /// The mode nested entity references compile in. Argument members
    /// resolve their nested types as input objects.
    pub(crate) fn nested(self) -> Mode {
        match self {
            Mode::Output => Mode::Output,
            Mode::Input | Mode::Argument => Mode::Input,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Output => "output",
            Mode::Input => "input",
            Mode::Argument => "argument",
        })
    }
}

/// A node of the compiled graph.
#[derive(Debug, Clone)]
pub enum Node {
    Object(ObjectNode),
    Scalar(ScalarNode),
    Enum(EnumNode),
    Union(UnionNode),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Object(object) => &object.name,
            Node::Scalar(scalar) => &scalar.name,
            Node::Enum(r#enum) => &r#enum.name,
            Node::Union(union) => &union.name,
        }
    }

    /// The namespace the node's name lives in. Scalars, enums and unions
    /// always belong to the output namespace.
    pub fn mode(&self) -> Mode {
        match self {
            Node::Object(object) => object.mode,
            Node::Scalar(_) | Node::Enum(_) | Node::Union(_) => Mode::Output,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            Node::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_union(&self) -> Option<&UnionNode> {
        match self {
            Node::Union(union) => Some(union),
            _ => None,
        }
    }

    /// Argument sets share the object shape; the mode tags them.
    pub fn is_argument_set(&self) -> bool {
        matches!(
            self,
            Node::Object(ObjectNode {
                mode: Mode::Argument,
                ..
            })
        )
    }
}

/// An output object, input object or argument set, depending on `mode`.
#[derive(Debug, Clone)]
pub struct ObjectNode {
    pub name: String,
    pub comment: Option<String>,
    pub mode: Mode,
    pub fields: Vec<CompiledField>,
}

impl ObjectNode {
    pub fn field(&self, key: &str) -> Option<&CompiledField> {
        self.fields.iter().find(|field| field.key == key)
    }
}

#[derive(Debug, Clone)]
pub struct ScalarNode {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct EnumNode {
    pub name: String,
    pub values: Vec<(String, Value)>,
}

/// Member order is preserved: the discriminator's return value indexes into
/// `members`.
#[derive(Debug, Clone)]
pub struct UnionNode {
    pub name: String,
    pub comment: Option<String>,
    pub members: Vec<NodeId>,
    pub discriminator: DiscriminatorHandle,
}

/// One emitted field of an object, input object or argument set.
#[derive(Debug, Clone)]
pub struct CompiledField {
    pub key: String,
    pub ty: TypeExpr,
    /// Argument set attached to this field, output mode only.
    pub arguments: Option<NodeId>,
    /// Output mode only.
    pub resolver: Option<ResolverHandle>,
    pub subscribe: Option<ResolverHandle>,
    /// Input and argument modes only.
    pub default_value: Option<Value>,
    pub comment: Option<String>,
    pub deprecated: Option<String>,
    /// Input and argument modes only; evaluated at request time by the
    /// materialized schema.
    pub validators: Validators,
    pub(crate) decorators: Vec<DecoratorUse>,
}
