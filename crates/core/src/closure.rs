//! Transitive closure of a group under reference.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::document::{DefinitionUniverse, DocumentInfo, Schema, SchemaDialect, SchemaDocument};
use crate::partition::Group;
use crate::references::collect_references;

/// A self-contained document for one group.
///
/// Holds the group's own members plus every definition they transitively
/// reference, cloned out of the source universe.
#[derive(Debug, Clone, PartialEq)]
pub struct IsolatedDocument {
    /// The grouping key this document was built for.
    pub key: String,
    /// Metadata copied from the source document.
    pub info: DocumentInfo,
    /// Dialect of the source document.
    pub dialect: SchemaDialect,
    /// Version string of the source document.
    pub spec_version: String,
    /// Members first, then referenced definitions in discovery order.
    pub definitions: IndexMap<String, Schema>,
}

impl IsolatedDocument {
    /// Whether `name` is a definition of this document.
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Definition names in document order.
    pub fn definition_names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }
}

/// Grow `initial` until it is closed under reference within `universe`.
///
/// Each round scans every definition in the result and adds any referenced
/// name the universe defines. References to names the universe lacks are
/// skipped. One visited set spans all rounds, so no node is walked twice and
/// the loop ends after at most `universe.len()` rounds.
pub fn resolve_closure<'a>(
    initial: &IndexMap<&'a str, &'a Schema>,
    universe: &'a DefinitionUniverse,
    prefix: &str,
) -> IndexMap<&'a str, &'a Schema> {
    let mut result = initial.clone();
    let mut visited = HashSet::new();

    loop {
        let mut referenced = Vec::new();
        for schema in result.values() {
            referenced.extend(collect_references(schema, prefix, &mut visited));
        }

        let mut progress = false;
        for name in referenced {
            if result.contains_key(name.as_str()) {
                continue;
            }
            if let Some((name, schema)) = universe.get_key_value(name.as_str()) {
                result.insert(name.as_str(), schema);
                progress = true;
            } else {
                debug!(reference = %name, "Skipping dangling reference.");
            }
        }

        if !progress {
            return result;
        }
    }
}

/// Build the isolated document for `group`.
pub fn build_closure(group: &Group<'_>, document: &SchemaDocument) -> IsolatedDocument {
    let closure = resolve_closure(
        &group.members,
        &document.definitions,
        document.dialect.reference_prefix(),
    );

    debug!(
        group = %group.key,
        members = group.members.len(),
        definitions = closure.len(),
        "Resolved group closure."
    );

    IsolatedDocument {
        key: group.key.clone(),
        info: document.info.clone(),
        dialect: document.dialect,
        spec_version: document.spec_version.clone(),
        definitions: closure
            .into_iter()
            .map(|(name, schema)| (name.to_string(), schema.clone()))
            .collect(),
    }
}
