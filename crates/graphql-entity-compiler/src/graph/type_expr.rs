use super::NodeId;

/// A compiled field type: a node reference wrapped in zero or more list and
/// non-null modifiers. Wrappers are order-significant and compose freely,
/// so lists of lists are representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Node(NodeId),
    List(Box<TypeExpr>),
    NonNull(Box<TypeExpr>),
}

impl TypeExpr {
    #[must_use]
    pub fn list_of(self) -> TypeExpr {
        TypeExpr::List(Box::new(self))
    }

    #[must_use]
    pub fn non_null(self) -> TypeExpr {
        TypeExpr::NonNull(Box::new(self))
    }

    /// The node at the bottom of the wrapper stack.
    pub fn innermost(&self) -> NodeId {
        match self {
            TypeExpr::Node(id) => *id,
            TypeExpr::List(inner) | TypeExpr::NonNull(inner) => inner.innermost(),
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, TypeExpr::NonNull(_))
    }
}

impl From<NodeId> for TypeExpr {
    fn from(id: NodeId) -> Self {
        TypeExpr::Node(id)
    }
}
