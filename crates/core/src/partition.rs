//! Partitioning of a definition universe into namespace groups.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::document::{DefinitionUniverse, Schema};

/// Key assigned to definitions whose name carries no namespace.
pub const GLOBAL_NAMESPACE: &str = "Global";

/// Separator between namespace segments in definition names.
pub const DEFAULT_SEPARATOR: char = '.';

/// The definitions sharing one grouping key, in universe order.
#[derive(Debug, Clone)]
pub struct Group<'a> {
    /// The grouping key, e.g. `Corax.Core.Inbound.Commands`.
    pub key: String,
    /// Member definitions, borrowed from the universe.
    pub members: IndexMap<&'a str, &'a Schema>,
}

impl Group<'_> {
    /// Member names in universe order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().copied()
    }
}

/// Derive the namespace of a definition name using [`DEFAULT_SEPARATOR`].
///
/// `Corax.Core.Inbound.Commands.ManageReceiptLinesCommand` → `Corax.Core.Inbound.Commands`
pub fn namespace_key(name: &str) -> String {
    namespace_key_with(name, DEFAULT_SEPARATOR)
}

/// Derive the namespace of a definition name: every segment but the last.
///
/// Names without a separator belong to [`GLOBAL_NAMESPACE`].
pub fn namespace_key_with(name: &str, separator: char) -> String {
    match name.rsplit_once(separator) {
        Some((namespace, _)) => namespace.to_string(),
        None => GLOBAL_NAMESPACE.to_string(),
    }
}

/// Partition the universe into groups keyed by `key_fn`.
///
/// Groups come out in first-seen-key order, members in universe order.
/// An empty universe yields no groups.
pub fn group_by_key<'a, F>(universe: &'a DefinitionUniverse, key_fn: F) -> Vec<Group<'a>>
where
    F: Fn(&str) -> String,
{
    if universe.is_empty() {
        warn!("No definitions found in the source document.");
        return Vec::new();
    }

    let mut groups: IndexMap<String, Group<'a>> = IndexMap::new();
    for (name, schema) in universe {
        let key = key_fn(name);
        groups
            .entry(key)
            .or_insert_with_key(|key| Group {
                key: key.clone(),
                members: IndexMap::new(),
            })
            .members
            .insert(name.as_str(), schema);
    }

    debug!(
        definitions = universe.len(),
        groups = groups.len(),
        "Partitioned definitions by key."
    );

    groups.into_values().collect()
}
