//! The fluent field descriptor builder and the closed set of shapes a field
//! reference can take.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use super::handles::{AssertHandle, ResolverHandle};
use crate::{
    decorate::{DecoratorObserver, DecoratorUse},
    error::SchemaError,
    schema::{EntityId, ExternalTypeId, UnionId},
};

bitflags::bitflags! {
    /// Which compiled modes a field is visible in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct Visibility: u8 {
        const INPUT = 1;
        const OUTPUT = 1 << 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    List,
    Reference,
}

/// Everything a field reference is allowed to be. Closed on purpose: the
/// compiler matches on this instead of inspecting runtime shapes.
#[derive(Debug, Clone)]
pub enum TypeArg {
    /// Built-in string scalar.
    Str,
    /// Built-in numeric scalar, materialized as Float.
    Float,
    /// Built-in boolean scalar.
    Bool,
    /// Externally provided scalar or enum, passed through unchanged.
    External(ExternalTypeId),
    Entity(EntityId),
    Union(UnionId),
    /// Forward reference by name, resolved against the known-entity set.
    Name(String),
    /// Inline object literal, compiled under a generated name.
    Fields(IndexMap<String, FieldSchema>),
    /// Merge another descriptor's defined keys into this one.
    Schema(Box<FieldSchema>),
    /// Must hold exactly one element; delegates to `list`.
    List(Vec<TypeArg>),
    /// A regular expression: types the field as a string scalar and attaches
    /// the pattern as a validator.
    Pattern(String),
}

impl From<&str> for TypeArg {
    fn from(name: &str) -> Self {
        TypeArg::Name(name.to_owned())
    }
}

impl From<String> for TypeArg {
    fn from(name: String) -> Self {
        TypeArg::Name(name)
    }
}

impl From<EntityId> for TypeArg {
    fn from(id: EntityId) -> Self {
        TypeArg::Entity(id)
    }
}

impl From<UnionId> for TypeArg {
    fn from(id: UnionId) -> Self {
        TypeArg::Union(id)
    }
}

impl From<ExternalTypeId> for TypeArg {
    fn from(id: ExternalTypeId) -> Self {
        TypeArg::External(id)
    }
}

impl From<FieldSchema> for TypeArg {
    fn from(schema: FieldSchema) -> Self {
        TypeArg::Schema(Box::new(schema))
    }
}

impl From<Vec<TypeArg>> for TypeArg {
    fn from(items: Vec<TypeArg>) -> Self {
        TypeArg::List(items)
    }
}

impl From<IndexMap<String, FieldSchema>> for TypeArg {
    fn from(fields: IndexMap<String, FieldSchema>) -> Self {
        TypeArg::Fields(fields)
    }
}

/// The storage form of a resolved reference. `Schema`, `List` and `Pattern`
/// arguments are folded away by the builder before it gets here.
#[derive(Debug, Clone)]
pub(crate) enum Reference {
    Str,
    Float,
    Bool,
    External(ExternalTypeId),
    Entity(EntityId),
    Union(UnionId),
    Name(String),
    Fields(IndexMap<String, FieldSchema>),
}

/// Validation bounds carried on a field, evaluated at request time by the
/// materialized schema. Each bound has an optional error-message override.
#[derive(Debug, Clone, Default)]
pub struct Validators {
    pub max: Option<f64>,
    pub max_err: Option<String>,
    pub min: Option<f64>,
    pub min_err: Option<String>,
    pub lt: Option<f64>,
    pub lt_err: Option<String>,
    pub gt: Option<f64>,
    pub gt_err: Option<String>,
    pub length: Option<usize>,
    pub length_err: Option<String>,
    pub regex: Option<String>,
    pub regex_err: Option<String>,
    pub assert_in: Option<Vec<Value>>,
    pub assert_in_err: Option<String>,
    pub assert_with: Option<AssertHandle>,
    pub assert_err: Option<String>,
}

impl Validators {
    pub fn is_empty(&self) -> bool {
        self.max.is_none()
            && self.min.is_none()
            && self.lt.is_none()
            && self.gt.is_none()
            && self.length.is_none()
            && self.regex.is_none()
            && self.assert_in.is_none()
            && self.assert_with.is_none()
    }

    /// Defined keys of `other` overwrite ours.
    fn merge_from(&mut self, other: &Validators) {
        macro_rules! take {
            ($($key:ident),*) => {
                $(if other.$key.is_some() {
                    self.$key = other.$key.clone();
                })*
            };
        }
        take!(
            max, max_err, min, min_err, lt, lt_err, gt, gt_err, length, length_err, regex,
            regex_err, assert_in, assert_in_err, assert_with, assert_err
        );
    }
}

/// One field's compiled policy: type, requiredness, visibility, validation
/// bounds, resolver handles, input override and decorators.
///
/// Built fluently; every modifier takes and returns the descriptor by value.
/// Descriptors are frozen once handed to the registry: the compiler never
/// mutates them.
#[derive(Debug, Clone, Default)]
pub struct FieldSchema {
    pub(crate) name: Option<String>,
    pub(crate) kind: Option<FieldKind>,
    pub(crate) required: Option<bool>,
    pub(crate) visibility: Option<Visibility>,
    pub(crate) comment: Option<String>,
    pub(crate) deprecated: Option<String>,
    pub(crate) default_value: Option<Value>,
    pub(crate) validators: Validators,
    pub(crate) reference: Option<Reference>,
    pub(crate) items: Option<Box<FieldSchema>>,
    pub(crate) arguments: Option<Reference>,
    pub(crate) resolver: Option<ResolverHandle>,
    pub(crate) subscribe: Option<ResolverHandle>,
    pub(crate) input_override: Option<Box<FieldSchema>>,
    pub(crate) decorators: Vec<DecoratorUse>,
    /// Construction error recorded by an infallible builder method, surfaced
    /// by `compile` with full provenance.
    pub(crate) invalid: Option<SchemaError>,
}

impl FieldSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the type of the field.
    #[must_use]
    pub fn ty(mut self, arg: impl Into<TypeArg>) -> Self {
        match arg.into() {
            TypeArg::List(mut items) => {
                let arity = items.len();
                match (items.pop(), arity) {
                    (Some(item), 1) => self.list(item),
                    _ => {
                        self.invalid = Some(SchemaError::ListArity(arity));
                        self
                    }
                }
            }
            TypeArg::Schema(other) => self.merge(*other),
            TypeArg::Pattern(pattern) => {
                self.kind = Some(FieldKind::Reference);
                self.reference = Some(Reference::Str);
                self.validators.regex = Some(pattern);
                self
            }
            other => {
                self.kind = Some(FieldKind::Reference);
                self.reference = Some(other.into_reference());
                self
            }
        }
    }

    /// Required list of required items, equivalent to `[T!]!`.
    #[must_use]
    pub fn list(mut self, item: impl Into<TypeArg>) -> Self {
        self.kind = Some(FieldKind::List);
        self.required = Some(true);
        let item = match item.into() {
            TypeArg::Schema(schema) => *schema,
            other => FieldSchema::new().required().ty(other),
        };
        self.items = Some(Box::new(item));
        self
    }

    /// Nullable list of nullable items.
    #[must_use]
    pub fn nlist(mut self, item: impl Into<TypeArg>) -> Self {
        self.kind = Some(FieldKind::List);
        let item = match item.into() {
            TypeArg::Schema(schema) => *schema,
            other => FieldSchema::new().ty(other),
        };
        self.items = Some(Box::new(item));
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = Some(false);
        self
    }

    #[must_use]
    pub fn input_only(mut self) -> Self {
        self.visibility = Some(Visibility::INPUT);
        self
    }

    #[must_use]
    pub fn output_only(mut self) -> Self {
        self.visibility = Some(Visibility::OUTPUT);
        self
    }

    #[must_use]
    pub fn input_output(mut self) -> Self {
        self.visibility = Some(Visibility::INPUT | Visibility::OUTPUT);
        self
    }

    /// Grant or revoke input visibility without touching the output side.
    /// The way to reopen a resolver-backed field for input.
    #[must_use]
    pub fn input_visible(mut self, visible: bool) -> Self {
        let mut visibility = self
            .visibility
            .unwrap_or(Visibility::INPUT | Visibility::OUTPUT);
        visibility.set(Visibility::INPUT, visible);
        self.visibility = Some(visibility);
        self
    }

    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Default value, used on input and argument variants.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.deprecated = Some(reason.into());
        self
    }

    #[must_use]
    pub fn max(mut self, max: f64, err: Option<&str>) -> Self {
        self.validators.max = Some(max);
        self.validators.max_err = err.map(str::to_owned);
        self
    }

    #[must_use]
    pub fn min(mut self, min: f64, err: Option<&str>) -> Self {
        self.validators.min = Some(min);
        self.validators.min_err = err.map(str::to_owned);
        self
    }

    #[must_use]
    pub fn lt(mut self, bound: f64, err: Option<&str>) -> Self {
        self.validators.lt = Some(bound);
        self.validators.lt_err = err.map(str::to_owned);
        self
    }

    #[must_use]
    pub fn gt(mut self, bound: f64, err: Option<&str>) -> Self {
        self.validators.gt = Some(bound);
        self.validators.gt_err = err.map(str::to_owned);
        self
    }

    #[must_use]
    pub fn between(mut self, min: f64, max: f64, err: Option<&str>) -> Self {
        self.validators.min = Some(min);
        self.validators.max = Some(max);
        self.validators.min_err = err.map(str::to_owned);
        self.validators.max_err = err.map(str::to_owned);
        self
    }

    /// Exact length for strings and lists.
    #[must_use]
    pub fn length(mut self, length: usize, err: Option<&str>) -> Self {
        self.validators.length = Some(length);
        self.validators.length_err = err.map(str::to_owned);
        self
    }

    /// Length bounds for strings and lists.
    #[must_use]
    pub fn length_between(self, min: usize, max: usize, err: Option<&str>) -> Self {
        self.between(min as f64, max as f64, err)
    }

    #[must_use]
    pub fn regex(mut self, pattern: impl Into<String>, err: Option<&str>) -> Self {
        self.validators.regex = Some(pattern.into());
        self.validators.regex_err = err.map(str::to_owned);
        self
    }

    /// Closed set membership.
    #[must_use]
    pub fn assert_in(mut self, values: impl IntoIterator<Item = Value>, err: Option<&str>) -> Self {
        self.validators.assert_in = Some(values.into_iter().collect());
        self.validators.assert_in_err = err.map(str::to_owned);
        self
    }

    #[must_use]
    pub fn assert_with(mut self, assert: AssertHandle, err: Option<&str>) -> Self {
        self.validators.assert_with = Some(assert);
        self.validators.assert_err = err.map(str::to_owned);
        self
    }

    /// Override the display name (and optionally the comment).
    #[must_use]
    pub fn rename(mut self, name: impl Into<String>, comment: Option<&str>) -> Self {
        self.name = Some(name.into());
        if let Some(comment) = comment {
            self.comment = Some(comment.to_owned());
        }
        self
    }

    /// Attach a resolver. Resolver-backed fields are output-only unless
    /// reopened with [`input_visible`](Self::input_visible).
    #[must_use]
    pub fn resolve(mut self, resolver: ResolverHandle) -> Self {
        self.resolver = Some(resolver);
        self
    }

    #[must_use]
    pub fn subscribe(mut self, subscribe: ResolverHandle) -> Self {
        self.subscribe = Some(subscribe);
        self
    }

    /// Declare the entity providing this field's resolver arguments.
    #[must_use]
    pub fn arguments(mut self, arg: impl Into<TypeArg>) -> Self {
        match arg.into() {
            TypeArg::Entity(id) => self.arguments = Some(Reference::Entity(id)),
            TypeArg::Name(name) => self.arguments = Some(Reference::Name(name)),
            TypeArg::Fields(fields) => self.arguments = Some(Reference::Fields(fields)),
            _ => self.invalid = Some(SchemaError::IllegalArgumentShape),
        }
        self
    }

    /// Attach an input-mode override: INPUT and ARG compilation use it
    /// wholesale instead of deriving from this descriptor.
    #[must_use]
    pub fn input(mut self, override_schema: FieldSchema) -> Self {
        self.input_override = Some(Box::new(override_schema));
        self
    }

    /// Register a decorator observer with its captured arguments.
    /// Re-registering the same observer replaces its arguments in place.
    #[must_use]
    pub fn decorate(mut self, observer: Arc<dyn DecoratorObserver>, args: Vec<Value>) -> Self {
        if let Some(existing) = self
            .decorators
            .iter_mut()
            .find(|deco| Arc::ptr_eq(&deco.observer, &observer))
        {
            existing.args = args;
        } else {
            self.decorators.push(DecoratorUse { observer, args });
        }
        self
    }

    /// Shallow last-write-wins merge: every defined key of `other` overrides
    /// this descriptor; decorator lists merge keyed by observer identity.
    fn merge(mut self, other: FieldSchema) -> Self {
        macro_rules! take {
            ($($key:ident),*) => {
                $(if other.$key.is_some() {
                    self.$key = other.$key;
                })*
            };
        }
        take!(
            name,
            kind,
            required,
            visibility,
            comment,
            deprecated,
            default_value,
            reference,
            items,
            arguments,
            resolver,
            subscribe,
            input_override
        );
        self.validators.merge_from(&other.validators);
        for deco in other.decorators {
            self = self.decorate(deco.observer, deco.args);
        }
        if other.invalid.is_some() {
            self.invalid = other.invalid;
        }
        self
    }

    pub(crate) fn visible_in_output(&self) -> bool {
        self.visibility
            .is_none_or(|visibility| visibility.contains(Visibility::OUTPUT))
    }

    pub(crate) fn visible_in_input(&self) -> bool {
        match self.visibility {
            Some(visibility) => visibility.contains(Visibility::INPUT),
            // Resolver-backed fields are output-only by default.
            None => self.resolver.is_none(),
        }
    }
}

impl TypeArg {
    fn into_reference(self) -> Reference {
        match self {
            TypeArg::Str => Reference::Str,
            TypeArg::Float => Reference::Float,
            TypeArg::Bool => Reference::Bool,
            TypeArg::External(id) => Reference::External(id),
            TypeArg::Entity(id) => Reference::Entity(id),
            TypeArg::Union(id) => Reference::Union(id),
            TypeArg::Name(name) => Reference::Name(name),
            TypeArg::Fields(fields) => Reference::Fields(fields),
            TypeArg::Schema(_) | TypeArg::List(_) | TypeArg::Pattern(_) => {
                unreachable!("folded away by FieldSchema::ty")
            }
        }
    }
}

/// Free constructors mirroring the builder, for terse field maps.
pub fn ty(arg: impl Into<TypeArg>) -> FieldSchema {
    FieldSchema::new().ty(arg)
}

pub fn list(item: impl Into<TypeArg>) -> FieldSchema {
    FieldSchema::new().list(item)
}

pub fn nlist(item: impl Into<TypeArg>) -> FieldSchema {
    FieldSchema::new().nlist(item)
}

pub fn comment(text: impl Into<String>) -> FieldSchema {
    FieldSchema::new().comment(text)
}

pub fn required() -> FieldSchema {
    FieldSchema::new().required()
}

pub fn optional() -> FieldSchema {
    FieldSchema::new().optional()
}

pub fn input_only() -> FieldSchema {
    FieldSchema::new().input_only()
}

pub fn output_only() -> FieldSchema {
    FieldSchema::new().output_only()
}

pub fn max(bound: f64, err: Option<&str>) -> FieldSchema {
    FieldSchema::new().max(bound, err)
}

pub fn min(bound: f64, err: Option<&str>) -> FieldSchema {
    FieldSchema::new().min(bound, err)
}

pub fn between(min: f64, max: f64, err: Option<&str>) -> FieldSchema {
    FieldSchema::new().between(min, max, err)
}

pub fn lt(bound: f64, err: Option<&str>) -> FieldSchema {
    FieldSchema::new().lt(bound, err)
}

pub fn gt(bound: f64, err: Option<&str>) -> FieldSchema {
    FieldSchema::new().gt(bound, err)
}

pub fn length(length: usize, err: Option<&str>) -> FieldSchema {
    FieldSchema::new().length(length, err)
}

pub fn regex(pattern: impl Into<String>, err: Option<&str>) -> FieldSchema {
    FieldSchema::new().regex(pattern, err)
}

pub fn assert_in(values: impl IntoIterator<Item = Value>, err: Option<&str>) -> FieldSchema {
    FieldSchema::new().assert_in(values, err)
}

pub fn deprecated(reason: impl Into<String>) -> FieldSchema {
    FieldSchema::new().deprecated(reason)
}
