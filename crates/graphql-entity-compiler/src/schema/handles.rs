use std::{fmt, sync::Arc};

use serde_json::Value;

/// An opaque resolver (or subscribe) function captured from the source
/// metadata. The compiler passes it through untouched; it runs per-request,
/// outside the compiler's lifetime.
#[derive(Clone)]
pub struct ResolverHandle(Arc<dyn Fn(&Value, &Value) -> Value + Send + Sync>);

impl ResolverHandle {
    pub fn new(f: impl Fn(&Value, &Value) -> Value + Send + Sync + 'static) -> Self {
        ResolverHandle(Arc::new(f))
    }

    pub fn call(&self, parent: &Value, args: &Value) -> Value {
        (self.0)(parent, args)
    }
}

impl fmt::Debug for ResolverHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResolverHandle(..)")
    }
}

/// Maps a runtime value to the index of the union member it belongs to.
#[derive(Clone)]
pub struct DiscriminatorHandle(Arc<dyn Fn(&Value) -> usize + Send + Sync>);

impl DiscriminatorHandle {
    pub fn new(f: impl Fn(&Value) -> usize + Send + Sync + 'static) -> Self {
        DiscriminatorHandle(Arc::new(f))
    }

    pub fn call(&self, value: &Value) -> usize {
        (self.0)(value)
    }
}

impl fmt::Debug for DiscriminatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DiscriminatorHandle(..)")
    }
}

/// A generic assertion predicate attached to a field. Evaluated at request
/// time by the materialized schema, never by the compiler.
#[derive(Clone)]
pub struct AssertHandle(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl AssertHandle {
    pub fn new(f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        AssertHandle(Arc::new(f))
    }

    pub fn call(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for AssertHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AssertHandle(..)")
    }
}
