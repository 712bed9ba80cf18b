//! Post-compile decorator pass.
//!
//! Decorators are observers registered on field descriptors; after
//! compilation they wrap the resolvers of OUTPUT object fields, in
//! registration order. The rest of the graph is untouched.

use std::{fmt, sync::Arc};

use serde_json::Value;

use crate::{
    graph::{CompiledGraph, Mode, Node},
    schema::ResolverHandle,
};

/// A resolver middleware attached to a field descriptor. Implementors wrap
/// the downstream resolver and return the composed one.
pub trait DecoratorObserver: Send + Sync {
    fn wrap_output_field(
        &self,
        next: ResolverHandle,
        args: &[Value],
        site: DecoratedSite<'_>,
    ) -> ResolverHandle;
}

/// One registration of an observer on a field, with the arguments captured
/// at registration time. Identity is the observer pointer; re-registering
/// the same observer on a descriptor replaces the arguments.
#[derive(Clone)]
pub struct DecoratorUse {
    pub(crate) observer: Arc<dyn DecoratorObserver>,
    pub(crate) args: Vec<Value>,
}

impl fmt::Debug for DecoratorUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoratorUse")
            .field("observer", &"<observer>")
            .field("args", &self.args)
            .finish()
    }
}

/// Read-only view of the field being decorated.
#[derive(Debug, Clone, Copy)]
pub struct DecoratedSite<'a> {
    pub node: &'a str,
    pub field: &'a str,
    pub comment: Option<&'a str>,
}

/// Wrap the resolvers of every decorated OUTPUT object field. Fields
/// without a resolver get the default property-lookup resolver as the
/// innermost layer. No-op on graphs without decorators.
pub fn apply_decorators(graph: &mut CompiledGraph) {
    for node in graph.nodes_mut() {
        let Node::Object(object) = node else {
            continue;
        };
        if object.mode != Mode::Output {
            continue;
        }
        let node_name = object.name.clone();
        for field in &mut object.fields {
            if field.decorators.is_empty() {
                continue;
            }
            tracing::debug!(
                node = %node_name,
                field = %field.key,
                count = field.decorators.len(),
                "decorating field resolver"
            );
            let mut resolver = field
                .resolver
                .clone()
                .unwrap_or_else(|| property_resolver(&field.key));
            // Taking the list keeps a second pass from re-wrapping.
            let decorators = std::mem::take(&mut field.decorators);
            for decorator in &decorators {
                let site = DecoratedSite {
                    node: &node_name,
                    field: &field.key,
                    comment: field.comment.as_deref(),
                };
                resolver = decorator
                    .observer
                    .wrap_output_field(resolver, &decorator.args, site);
            }
            field.resolver = Some(resolver);
        }
    }
}

/// The default resolver: read the field's key out of the parent value.
fn property_resolver(key: &str) -> ResolverHandle {
    let key = key.to_owned();
    ResolverHandle::new(move |parent, _args| parent.get(&key).cloned().unwrap_or(Value::Null))
}
