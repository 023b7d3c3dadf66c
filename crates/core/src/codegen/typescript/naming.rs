//! Definition name → TypeScript identifier resolution.

use std::collections::HashSet;

use indexmap::IndexMap;

use super::utils::{BUILTIN_TYPE_NAMES, to_type_identifier};

/// Unique TypeScript identifiers for every definition of one artifact.
///
/// Namespaces are dropped, so two definitions from different namespaces may
/// want the same identifier. The first in document order keeps it; later ones
/// get a numeric suffix (`Item`, `Item2`, `Item3`).
#[derive(Debug)]
pub struct TypeNames {
    by_definition: IndexMap<String, String>,
}

impl TypeNames {
    /// Assign identifiers to `definitions`, in order.
    pub fn new<'a>(definitions: impl IntoIterator<Item = &'a str>) -> Self {
        Self::assign(definitions, false)
    }

    /// Like [`TypeNames::new`], but every identifier `X` also claims `IX` for
    /// the constructor interface emitted beside class `X`.
    pub fn with_constructor_interfaces<'a>(
        definitions: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::assign(definitions, true)
    }

    fn assign<'a>(definitions: impl IntoIterator<Item = &'a str>, interfaces: bool) -> Self {
        let mut used: HashSet<String> = BUILTIN_TYPE_NAMES
            .iter()
            .map(|name| (*name).to_string())
            .collect();
        let mut by_definition = IndexMap::new();

        for definition in definitions {
            let base = to_type_identifier(definition);
            let mut candidate = base.clone();
            let mut suffix = 2;
            while used.contains(&candidate)
                || (interfaces && used.contains(&format!("I{candidate}")))
            {
                candidate = format!("{base}{suffix}");
                suffix += 1;
            }
            if interfaces {
                used.insert(format!("I{candidate}"));
            }
            used.insert(candidate.clone());
            by_definition.insert(definition.to_string(), candidate);
        }

        Self { by_definition }
    }

    /// The identifier assigned to `definition`.
    pub fn get(&self, definition: &str) -> Option<&str> {
        self.by_definition.get(definition).map(String::as_str)
    }

    /// Identifiers in the order the definitions were given.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.by_definition.values().map(String::as_str)
    }
}
