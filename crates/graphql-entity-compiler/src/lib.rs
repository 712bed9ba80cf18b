//! Compiles annotated entity descriptions into a normalized, deduplicated
//! node graph ready for GraphQL schema materialization.
//!
//! Callers build a [`SchemaRegistry`] of entities, unions and external
//! types, describe one or more root collections with [`RootSet`], then call
//! [`compile`]. The result is a [`CompiledGraph`] in which every logical
//! entity appears exactly once per compilation mode (output, input,
//! argument), with generated names for anonymous shapes and fully resolved
//! list/non-null type expressions. [`apply_decorators`] runs the optional
//! resolver-wrapping pass over the finished graph.
//!
//! ```
//! use graphql_entity_compiler::{compile, field, RootSet, SchemaRegistry, TypeArg};
//!
//! let mut registry = SchemaRegistry::new();
//! let user = registry.entity("User");
//! registry.attach_field(user, "name", field::ty(TypeArg::Str).required());
//!
//! let mut roots = RootSet::new();
//! roots.insert("Query", user);
//!
//! let graph = compile(&registry, &[roots]).unwrap();
//! assert!(graph.query().is_some());
//! ```

mod compile;
mod decorate;
mod error;
mod graph;
mod schema;

pub use compile::compile;
pub use decorate::{apply_decorators, DecoratedSite, DecoratorObserver, DecoratorUse};
pub use error::{CompileError, SchemaError};
pub use graph::{
    CompiledField, CompiledGraph, EnumNode, Mode, Node, NodeId, ObjectNode, ScalarNode, TypeExpr,
    UnionNode,
};
pub use schema::{
    field, AssertHandle, DiscriminatorHandle, EntityId, ExternalTypeId, FieldSchema,
    ResolverHandle, RootEntry, RootSet, SchemaRegistry, TypeArg, UnionId, UnionMember, Validators,
};
