use super::{context::Context, names::check_reserved};
use crate::{
    error::CompileError,
    graph::{Mode, Node, NodeId, UnionNode},
    schema::{RootEntry, UnionId, UnionMember},
};

/// Resolve a union into its compiled node, memoized per union. Members
/// compile strictly in OUTPUT mode and keep their declared order so the
/// discriminator's index mapping stays valid.
pub(crate) fn resolve_union(
    ctx: &mut Context<'_>,
    id: UnionId,
    path: &[String],
) -> Result<NodeId, CompileError> {
    if let Some(node) = ctx.union_node_memo(id) {
        return Ok(node);
    }
    let registry = ctx.registry;
    let record = &registry[id];
    check_reserved(&record.name)?;
    tracing::debug!(name = %record.name, "resolving union");

    let mut members = Vec::with_capacity(record.members.len());
    for member in &record.members {
        let node = match member {
            UnionMember::Entity(entity) => {
                ctx.ensure_entity_node(*entity, Mode::Output, &record.name, path)?
            }
            UnionMember::Name(name) => match ctx.known.get(name).cloned() {
                Some(RootEntry::Entity(entity)) => {
                    ctx.ensure_entity_node(entity, Mode::Output, name, path)?
                }
                Some(RootEntry::Fields(fields)) => {
                    ctx.ensure_known_fields_node(name, &fields, Mode::Output, path)?
                }
                Some(RootEntry::Union(_)) => {
                    return Err(CompileError::IllegalUnionMember {
                        union: record.name.clone(),
                        member: name.clone(),
                    });
                }
                None => {
                    return Err(CompileError::UnknownForwardName { name: name.clone() });
                }
            },
            UnionMember::Fields(fields) => {
                ctx.anonymous_fields_node(&record.name, fields, Mode::Output, path)?
            }
        };
        members.push(node);
    }

    let node = ctx.graph.push_node(Node::Union(UnionNode {
        name: record.name.clone(),
        comment: record.comment.clone(),
        members,
        discriminator: record.discriminator.clone(),
    }));
    ctx.remember_union(id, &record.name, node)?;
    Ok(node)
}
