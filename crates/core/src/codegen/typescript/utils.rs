//! Identifier and literal helpers for the TypeScript emitter.

use std::collections::HashSet;

use super::types::{TsLiteral, TsPrimitive, TsType};
use crate::document::EnumValue;

/// Words a generated type may not be named after: JavaScript keywords,
/// strict-mode reserved words and the TypeScript primitive type names.
const RESERVED_WORDS: &[&str] = &[
    "any", "async", "await", "boolean", "break", "case", "catch", "class", "const", "continue",
    "debugger", "default", "delete", "do", "else", "enum", "export", "extends", "false",
    "finally", "for", "function", "if", "implements", "import", "in", "instanceof", "interface",
    "let", "never", "new", "null", "number", "object", "package", "private", "protected",
    "public", "return", "static", "string", "super", "switch", "this", "throw", "true", "try",
    "type", "typeof", "undefined", "unknown", "var", "void", "while", "with", "yield",
];

/// Global type names generated code relies on; definitions must not shadow them.
pub const BUILTIN_TYPE_NAMES: &[&str] = &["Array", "Blob", "Date", "Record"];

fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.binary_search(&name).is_ok()
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Whether `name` can be written bare as a property or object key.
pub fn is_plain_key(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_identifier_start) && chars.all(is_identifier_char)
}

/// `s` as a double-quoted JavaScript string literal.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// `name` as a property key: bare when possible, quoted otherwise.
pub fn property_key(name: &str) -> String {
    if is_plain_key(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// Derive a type identifier from a definition name.
///
/// Namespaces are dropped (`Corax.Core.Receipt` → `Receipt`). Characters that
/// cannot appear in an identifier split the name into parts joined by `_`, and
/// each dotted part keeps only its last segment
/// (`Paged[Corax.Core.Item]` → `Paged_Item`).
pub fn to_type_identifier(name: &str) -> String {
    let mut ident = name
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$' || c == '.'))
        .filter_map(|path| path.rsplit('.').find(|segment| !segment.is_empty()))
        .collect::<Vec<_>>()
        .join("_");

    if ident.is_empty() {
        return "Anonymous".to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) || is_reserved_word(&ident) {
        ident.insert(0, '_');
    }
    ident
}

impl From<&EnumValue> for TsLiteral {
    fn from(value: &EnumValue) -> Self {
        match value {
            EnumValue::String(s) => TsLiteral::String(s.clone()),
            EnumValue::Integer(n) => TsLiteral::Int(*n),
            EnumValue::Float(f) => TsLiteral::Number(*f),
            EnumValue::Bool(b) => TsLiteral::Bool(*b),
            EnumValue::Null => TsLiteral::Null,
        }
    }
}

/// Member name of a const enum value without `x-enumNames`, before quoting.
///
/// Strings name themselves; other values get a synthetic upper-case name
/// spelled from the value (`-1` → `VALUE_MINUS_1`, `0.5` → `VALUE_0_5`).
pub fn enum_member_name(value: &EnumValue) -> String {
    match value {
        EnumValue::String(s) => s.clone(),
        EnumValue::Integer(n) => numeric_member_name(&n.to_string()),
        EnumValue::Float(f) => numeric_member_name(&f.to_string()),
        EnumValue::Bool(true) => "TRUE".to_string(),
        EnumValue::Bool(false) => "FALSE".to_string(),
        EnumValue::Null => "NULL".to_string(),
    }
}

fn numeric_member_name(text: &str) -> String {
    format!("VALUE_{}", text.replace('-', "MINUS_").replace('.', "_"))
}

/// Make `names` pairwise distinct, in order.
///
/// A repeated name gets `_2`, `_3`, ... appended, skipping names already taken.
pub fn unique_member_names(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut used = HashSet::new();
    names
        .into_iter()
        .map(|name| {
            let mut candidate = name.clone();
            let mut suffix = 2;
            while used.contains(&candidate) {
                candidate = format!("{name}_{suffix}");
                suffix += 1;
            }
            used.insert(candidate.clone());
            candidate
        })
        .collect()
}

/// `Record<string, value>`.
pub fn string_record(value: TsType) -> TsType {
    TsType::Record {
        key: Box::new(TsType::Primitive(TsPrimitive::String)),
        value: Box::new(value),
    }
}

/// `Record<string, unknown>`, for open objects without a value schema.
pub fn unknown_record() -> TsType {
    string_record(TsType::Primitive(TsPrimitive::Unknown))
}
