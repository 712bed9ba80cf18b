//! The worklist-based graph compiler.
//!
//! Compilation starts from the root collections, creates a node shell for
//! every entity the first time it is referenced in a given mode, and queues
//! the shell's fields for resolution. Because the `(entity, mode)` and
//! `(name, mode)` dedup tables are consulted before anything is enqueued,
//! every logical entity compiles exactly once per mode and cyclic entity
//! graphs terminate.

mod context;
mod fields;
mod names;
mod unions;

use itertools::Itertools;

use self::{
    context::{Context, WorkItem, WorkSource},
    fields::{resolve_arguments, resolve_field_type},
};
use crate::{
    error::CompileError,
    graph::{CompiledField, CompiledGraph, Mode, Node, NodeId},
    schema::{
        FieldSchema, MUTATION, QUERY, RootEntry, RootSet, SUBSCRIPTION, SchemaRegistry, Validators,
    },
};

/// Compile a set of root collections against a registry into the resolved
/// node graph.
///
/// Compilation is synchronous, deterministic and all-or-nothing: any
/// structural error aborts the whole call, wrapped with the root → field
/// chain that produced it.
pub fn compile(
    registry: &SchemaRegistry,
    roots: &[RootSet],
) -> Result<CompiledGraph, CompileError> {
    let mut ctx = Context::new(registry);
    seed(&mut ctx, roots)?;
    while let Some(item) = ctx.pop() {
        fill_node(&mut ctx, item)?;
    }
    let graph = ctx.into_graph();
    tracing::debug!(nodes = graph.len(), "compilation finished");
    Ok(graph)
}

/// Distribute top-level entries: `Query`/`Mutation`/`Subscription` seed the
/// worklist, `_`-prefixed keys are skipped, everything else becomes a
/// forward-reference target compiled only if reachable from a root.
fn seed(ctx: &mut Context<'_>, roots: &[RootSet]) -> Result<(), CompileError> {
    let mut root_sources = [
        (QUERY, Vec::new()),
        (MUTATION, Vec::new()),
        (SUBSCRIPTION, Vec::new()),
    ];

    for set in roots {
        for (key, entry) in &set.entries {
            if key.starts_with('_') {
                continue;
            }
            if let Some((_, sources)) = root_sources
                .iter_mut()
                .find(|(name, _)| *name == key.as_str())
            {
                sources.push(entry.clone());
            } else {
                if ctx.known.contains_key(key) {
                    return Err(CompileError::DuplicateKnownEntity { name: key.clone() });
                }
                ctx.known.insert(key.clone(), entry.clone());
            }
        }
    }

    if root_sources.iter().all(|(_, sources)| sources.is_empty()) {
        return Err(CompileError::NoRootFields);
    }

    for (name, sources) in root_sources {
        if sources.is_empty() {
            continue;
        }
        let node = ctx.root_node(name)?;
        match name {
            QUERY => ctx.graph.query = Some(node),
            MUTATION => ctx.graph.mutation = Some(node),
            _ => ctx.graph.subscription = Some(node),
        }
        for entry in sources {
            let source = match entry {
                RootEntry::Entity(id) => {
                    ctx.alias_entity(id, node);
                    WorkSource::Entity(id)
                }
                RootEntry::Fields(fields) => WorkSource::Fields(fields),
                RootEntry::Union(_) => {
                    return Err(CompileError::IllegalRoot {
                        name: name.to_owned(),
                    });
                }
            };
            ctx.enqueue(WorkItem {
                source,
                node,
                mode: Mode::Output,
                path: vec![name.to_owned()],
            });
        }
    }
    Ok(())
}

fn fill_node(ctx: &mut Context<'_>, item: WorkItem) -> Result<(), CompileError> {
    let WorkItem {
        source,
        node,
        mode,
        path,
    } = item;
    match source {
        WorkSource::Entity(id) => {
            let registry = ctx.registry;
            for (key, schema) in &registry[id].fields {
                fill_field(ctx, node, mode, &path, key, schema)?;
            }
        }
        WorkSource::Fields(fields) => {
            for (key, schema) in &fields {
                fill_field(ctx, node, mode, &path, key, schema)?;
            }
        }
    }
    Ok(())
}

fn fill_field(
    ctx: &mut Context<'_>,
    node: NodeId,
    mode: Mode,
    path: &[String],
    key: &str,
    schema: &FieldSchema,
) -> Result<(), CompileError> {
    compile_field(ctx, node, mode, path, key, schema)
        .map_err(|err| wrap_with_provenance(err, mode, path, key))
}

/// Attach the root → field chain to an error so the surfaced failure names
/// the exact traversal that produced it.
fn wrap_with_provenance(
    err: CompileError,
    mode: Mode,
    path: &[String],
    key: &str,
) -> CompileError {
    if matches!(err, CompileError::Context { .. }) {
        return err;
    }
    let path = path.iter().map(String::as_str).chain([key]).join(".");
    CompileError::Context {
        mode,
        path,
        source: Box::new(err),
    }
}

fn compile_field(
    ctx: &mut Context<'_>,
    node: NodeId,
    mode: Mode,
    path: &[String],
    key: &str,
    schema: &FieldSchema,
) -> Result<(), CompileError> {
    // Mode filtering: an input override substitutes wholesale, otherwise the
    // field's visibility flags decide.
    let effective = match mode {
        Mode::Output => {
            if !schema.visible_in_output() {
                return Ok(());
            }
            schema
        }
        Mode::Input | Mode::Argument => match &schema.input_override {
            Some(override_schema) => override_schema.as_ref(),
            None => {
                if !schema.visible_in_input() {
                    return Ok(());
                }
                schema
            }
        },
    };

    if let Some(invalid) = &effective.invalid {
        return Err(invalid.clone().into());
    }

    if ctx.graph[node]
        .as_object()
        .is_some_and(|object| object.field(key).is_some())
    {
        return Err(CompileError::DuplicateField {
            node: ctx.graph[node].name().to_owned(),
            key: key.to_owned(),
        });
    }

    let mut field_path = path.to_vec();
    field_path.push(key.to_owned());

    let ty = resolve_field_type(ctx, effective, key, mode, &field_path)?;

    let arguments = match (&effective.arguments, mode) {
        (Some(arguments), Mode::Output) => {
            Some(resolve_arguments(ctx, arguments, key, &field_path)?)
        }
        _ => None,
    };

    let is_output = mode == Mode::Output;
    let field = CompiledField {
        key: key.to_owned(),
        ty,
        arguments,
        resolver: is_output.then(|| effective.resolver.clone()).flatten(),
        subscribe: is_output.then(|| effective.subscribe.clone()).flatten(),
        default_value: (!is_output)
            .then(|| effective.default_value.clone())
            .flatten(),
        comment: effective.comment.clone(),
        deprecated: effective.deprecated.clone(),
        validators: if is_output {
            Validators::default()
        } else {
            effective.validators.clone()
        },
        decorators: if is_output {
            effective.decorators.clone()
        } else {
            Vec::new()
        },
    };

    if let Node::Object(object) = ctx.graph.node_mut(node) {
        object.fields.push(field);
    }
    Ok(())
}
