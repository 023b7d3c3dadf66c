//! Reference extraction over schema nodes.

use std::collections::HashSet;
use std::hash::BuildHasher;
use std::ptr;

use crate::document::{AdditionalProperties, Schema};

/// Identity of a schema node borrowed from an immutable universe.
///
/// Inline nodes have no name, so nodes are told apart by address. The address
/// is stable for as long as the universe stays borrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Identity of `node`.
    pub fn of(node: &Schema) -> Self {
        Self(ptr::from_ref(node).addr())
    }
}

/// Extract the definition name from a local `$ref`.
///
/// Returns `None` for references without `prefix` or with nothing after it.
///
/// ```
/// use nsplit_core::references::extract_reference_name;
///
/// assert_eq!(
///     extract_reference_name("#/definitions/Corax.Core.Receipt", "#/definitions/"),
///     Some("Corax.Core.Receipt")
/// );
/// assert_eq!(extract_reference_name("#/definitions/", "#/definitions/"), None);
/// assert_eq!(extract_reference_name("other.json#/Foo", "#/definitions/"), None);
/// ```
pub fn extract_reference_name<'r>(reference: &'r str, prefix: &str) -> Option<&'r str> {
    reference
        .strip_prefix(prefix)
        .filter(|name| !name.is_empty())
}

/// Collect every definition name referenced anywhere inside `node`.
///
/// Walks direct references, properties, array items, map values and
/// all-of/any-of/one-of members. Nodes already in `visited` are not walked
/// again, which bounds the walk on shared or self-referential structures.
/// Duplicates are possible; callers deduplicate.
pub fn collect_references<S: BuildHasher>(
    node: &Schema,
    prefix: &str,
    visited: &mut HashSet<NodeId, S>,
) -> Vec<String> {
    let mut found = Vec::new();
    collect_into(node, prefix, visited, &mut found);
    found
}

fn collect_into<S: BuildHasher>(
    node: &Schema,
    prefix: &str,
    visited: &mut HashSet<NodeId, S>,
    found: &mut Vec<String>,
) {
    if !visited.insert(NodeId::of(node)) {
        return;
    }

    if let Some(name) = node
        .ref_path
        .as_deref()
        .and_then(|reference| extract_reference_name(reference, prefix))
    {
        found.push(name.to_string());
    }

    for property in node.properties.values() {
        collect_into(property, prefix, visited, found);
    }

    if let Some(items) = &node.items {
        collect_into(items, prefix, visited, found);
    }

    if let Some(AdditionalProperties::Schema(values)) = &node.additional_properties {
        collect_into(values, prefix, visited, found);
    }

    for member in node.all_of.iter().chain(&node.any_of).chain(&node.one_of) {
        collect_into(member, prefix, visited, found);
    }
}
