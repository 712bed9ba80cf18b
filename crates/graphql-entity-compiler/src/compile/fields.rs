//! Per-field resolution: unwrapping the list/required wrapper stack,
//! resolving the base reference and attaching argument sets.

use super::{context::Context, unions::resolve_union};
use crate::{
    error::{CompileError, SchemaError},
    graph::{Mode, NodeId, TypeExpr},
    schema::{
        FieldSchema, RootEntry,
        field::{FieldKind, Reference},
    },
};

enum Wrapper {
    List,
    NonNull,
}

/// Resolve one field's complete type: walk from the outermost descriptor
/// layer inward collecting wrappers, resolve the innermost base reference,
/// then rewrap innermost-first.
pub(crate) fn resolve_field_type(
    ctx: &mut Context<'_>,
    schema: &FieldSchema,
    key: &str,
    mode: Mode,
    path: &[String],
) -> Result<TypeExpr, CompileError> {
    let mut wrappers = Vec::new();
    let mut layer = schema;
    loop {
        if let Some(invalid) = &layer.invalid {
            return Err(invalid.clone().into());
        }
        if layer.required == Some(true) {
            wrappers.push(Wrapper::NonNull);
        }
        match layer.kind {
            Some(FieldKind::List) => {
                wrappers.push(Wrapper::List);
                layer = layer
                    .items
                    .as_deref()
                    .ok_or_else(|| CompileError::MissingReference {
                        field: key.to_owned(),
                    })?;
            }
            _ => break,
        }
    }

    // A renamed field lends its display name to anonymous nested shapes.
    let hint = schema.name.as_deref().unwrap_or(key);
    let base = resolve_base(ctx, layer.reference.as_ref(), key, hint, mode, path)?;

    let mut expr = TypeExpr::Node(base);
    for wrapper in wrappers.into_iter().rev() {
        expr = match wrapper {
            Wrapper::List => expr.list_of(),
            Wrapper::NonNull => expr.non_null(),
        };
    }
    Ok(expr)
}

fn resolve_base(
    ctx: &mut Context<'_>,
    reference: Option<&Reference>,
    key: &str,
    hint: &str,
    mode: Mode,
    path: &[String],
) -> Result<NodeId, CompileError> {
    let Some(reference) = reference else {
        return Err(CompileError::MissingReference {
            field: key.to_owned(),
        });
    };
    match reference {
        Reference::Str => Ok(ctx.graph.string_scalar),
        Reference::Float => Ok(ctx.graph.float_scalar),
        Reference::Bool => Ok(ctx.graph.boolean_scalar),
        Reference::External(id) => ctx.external_node(*id),
        Reference::Union(id) => {
            if mode != Mode::Output {
                return Err(CompileError::UnionInInput {
                    name: ctx.registry[*id].name.clone(),
                });
            }
            resolve_union(ctx, *id, path)
        }
        Reference::Entity(id) => ctx.ensure_entity_node(*id, mode.nested(), hint, path),
        Reference::Name(name) => resolve_forward_name(ctx, name, mode, path),
        Reference::Fields(fields) => ctx.anonymous_fields_node(hint, fields, mode.nested(), path),
    }
}

fn resolve_forward_name(
    ctx: &mut Context<'_>,
    name: &str,
    mode: Mode,
    path: &[String],
) -> Result<NodeId, CompileError> {
    match ctx.known.get(name).cloned() {
        Some(RootEntry::Entity(id)) => ctx.ensure_entity_node(id, mode.nested(), name, path),
        Some(RootEntry::Fields(fields)) => {
            ctx.ensure_known_fields_node(name, &fields, mode.nested(), path)
        }
        Some(RootEntry::Union(id)) => {
            if mode != Mode::Output {
                return Err(CompileError::UnionInInput {
                    name: name.to_owned(),
                });
            }
            resolve_union(ctx, id, path)
        }
        None => Err(CompileError::UnknownForwardName {
            name: name.to_owned(),
        }),
    }
}

/// Resolve the argument entity of a resolver-backed field in ARG mode.
pub(crate) fn resolve_arguments(
    ctx: &mut Context<'_>,
    arguments: &Reference,
    key: &str,
    path: &[String],
) -> Result<NodeId, CompileError> {
    match arguments {
        Reference::Entity(id) => ctx.ensure_entity_node(*id, Mode::Argument, key, path),
        Reference::Fields(fields) => {
            ctx.anonymous_fields_node(key, fields, Mode::Argument, path)
        }
        Reference::Name(name) => match ctx.known.get(name).cloned() {
            Some(RootEntry::Entity(id)) => ctx.ensure_entity_node(id, Mode::Argument, name, path),
            Some(RootEntry::Fields(fields)) => {
                ctx.ensure_known_fields_node(name, &fields, Mode::Argument, path)
            }
            Some(RootEntry::Union(_)) => Err(CompileError::UnionInInput {
                name: name.to_owned(),
            }),
            None => Err(CompileError::MissingArguments {
                field: key.to_owned(),
                name: name.to_owned(),
            }),
        },
        _ => Err(SchemaError::IllegalArgumentShape.into()),
    }
}
