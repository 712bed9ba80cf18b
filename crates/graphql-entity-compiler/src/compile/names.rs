use std::collections::HashMap;

use crate::error::CompileError;

/// Suffixes appended by the compiler to distinguish input and argument
/// variants of an entity. User-declared names must not end with one of
/// these, since the result would be ambiguous with a generated name.
const RESERVED_SUFFIXES: [&str; 2] = ["Input", "_Arg"];

pub(crate) fn check_reserved(name: &str) -> Result<(), CompileError> {
    if RESERVED_SUFFIXES
        .iter()
        .any(|suffix| name.ends_with(suffix))
    {
        return Err(CompileError::ReservedSuffix {
            name: name.to_owned(),
        });
    }
    Ok(())
}

/// Deterministic unique names for entities without an explicit one: each
/// base name gets an auto-incrementing suffix starting at 0.
#[derive(Debug, Default)]
pub(crate) struct NameGenerator {
    counters: HashMap<String, usize>,
}

impl NameGenerator {
    pub(crate) fn unique(&mut self, base: &str) -> String {
        let counter = self.counters.entry(base.to_owned()).or_insert(0);
        let name = format!("{base}_{counter}");
        *counter += 1;
        name
    }
}
