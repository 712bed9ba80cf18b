use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use super::SchemaRegistry;
use crate::error::SchemaError;

static ENUM_VALUE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[_a-zA-Z][_a-zA-Z0-9]*$").expect("hardcoded pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExternalTypeId(usize);

impl From<usize> for ExternalTypeId {
    fn from(value: usize) -> Self {
        ExternalTypeId(value)
    }
}

impl From<ExternalTypeId> for usize {
    fn from(value: ExternalTypeId) -> Self {
        value.0
    }
}

/// A scalar or enum type defined outside the compiler and passed through
/// unchanged into the compiled graph.
#[derive(Debug, Clone)]
pub struct ExternalTypeRecord {
    pub(crate) name: String,
    pub(crate) kind: ExternalKind,
}

#[derive(Debug, Clone)]
pub(crate) enum ExternalKind {
    Scalar,
    Enum { values: Vec<(String, Value)> },
}

impl std::ops::Index<ExternalTypeId> for SchemaRegistry {
    type Output = ExternalTypeRecord;

    fn index(&self, index: ExternalTypeId) -> &Self::Output {
        &self.externals[index.0]
    }
}

impl SchemaRegistry {
    /// Register an external scalar, usable in every mode.
    pub fn scalar(&mut self, name: impl Into<String>) -> ExternalTypeId {
        self.push_external(ExternalTypeRecord {
            name: name.into(),
            kind: ExternalKind::Scalar,
        })
    }

    /// Register an external enum. Value keys must be valid GraphQL names.
    pub fn enumeration(
        &mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = (String, Value)>,
    ) -> Result<ExternalTypeId, SchemaError> {
        let name = name.into();
        let values: Vec<_> = values.into_iter().collect();
        for (key, _) in &values {
            if !ENUM_VALUE_NAME.is_match(key) {
                return Err(SchemaError::InvalidEnumValue {
                    enum_name: name,
                    value: key.clone(),
                });
            }
        }
        Ok(self.push_external(ExternalTypeRecord {
            name,
            kind: ExternalKind::Enum { values },
        }))
    }

    fn push_external(&mut self, record: ExternalTypeRecord) -> ExternalTypeId {
        let id = ExternalTypeId(self.externals.len());
        self.externals.push(record);
        id
    }
}
