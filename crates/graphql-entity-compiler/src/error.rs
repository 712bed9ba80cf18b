use crate::graph::Mode;

/// Errors raised while building descriptors, before any compilation takes
/// place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("List as type expects exactly one entry, got {0}")]
    ListArity(usize),
    #[error("Expected at least 2 members for union `{union}`, got {got}")]
    UnionArity { union: String, got: usize },
    #[error("Merge expects at least 2 sources, got {0}")]
    MergeArity(usize),
    #[error("Invalid enum value `{value}` on enum `{enum_name}`")]
    InvalidEnumValue { enum_name: String, value: String },
    #[error("Arguments for a field must be an entity, a forward name or a field map")]
    IllegalArgumentShape,
}

/// Compile-time structural errors. All of them are fatal: `compile` returns
/// no partial graph.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("Duplicate field `{key}` on `{node}`")]
    DuplicateField { node: String, key: String },
    #[error("Found two entities with the same name: `{name}`")]
    DuplicateEntityName { name: String },
    #[error("Found two root entries with the same name: `{name}`")]
    DuplicateKnownEntity { name: String },
    #[error("Missing reference on field `{field}`")]
    MissingReference { field: String },
    #[error("Missing entity `{name}`")]
    UnknownForwardName { name: String },
    #[error("Entity name `{name}` ends with a reserved suffix")]
    ReservedSuffix { name: String },
    #[error("Union `{name}` is used only for output")]
    UnionInInput { name: String },
    #[error("Union member `{member}` of `{union}` must resolve to an object entity")]
    IllegalUnionMember { union: String, member: String },
    #[error("Missing argument entity `{name}` on field `{field}`")]
    MissingArguments { field: String, name: String },
    #[error("Root entry `{name}` must be an entity or a field map")]
    IllegalRoot { name: String },
    #[error("No Query, Mutation or Subscription found")]
    NoRootFields,
    #[error("{source} (while compiling {mode} at {path})")]
    Context {
        mode: Mode,
        path: String,
        #[source]
        source: Box<CompileError>,
    },
}

impl CompileError {
    /// The error without its provenance wrapper, for matching on the kind.
    pub fn root_cause(&self) -> &CompileError {
        match self {
            CompileError::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// The `root → field` chain that produced the failure, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            CompileError::Context { path, .. } => Some(path),
            _ => None,
        }
    }
}
