//! Rendering of the declaration IR as TypeScript source.

use std::fmt::Write as _;

use super::types::{TsLiteral, TsModule, TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind};
use super::utils::{property_key, string_literal};

/// Trait for emitting TypeScript code from IR nodes.
pub trait Emit {
    /// Convert the node to its TypeScript string representation.
    fn emit(&self) -> String;
}

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string",
            TsPrimitive::Number => "number",
            TsPrimitive::Boolean => "boolean",
            TsPrimitive::Null => "null",
            TsPrimitive::Undefined => "undefined",
            TsPrimitive::Unknown => "unknown",
        }
        .to_string()
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            TsLiteral::String(s) => string_literal(s),
            TsLiteral::Number(n) => n.to_string(),
            TsLiteral::Int(i) => i.to_string(),
            TsLiteral::Bool(b) => b.to_string(),
            TsLiteral::Null => "null".to_string(),
        }
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(element) => match **element {
                TsType::Union(_) | TsType::Intersection(_) => format!("({})[]", element.emit()),
                _ => format!("{}[]", element.emit()),
            },
            TsType::Union(members) => join_members(members, " | "),
            TsType::Intersection(members) => join_members(members, " & "),
            TsType::Object(props) if props.is_empty() => "{}".to_string(),
            TsType::Object(props) => {
                let members: Vec<_> = props.iter().map(Emit::emit).collect();
                format!("{{ {} }}", members.join("; "))
            }
            TsType::Record { key, value } => format!("Record<{}, {}>", key.emit(), value.emit()),
            TsType::Literal(lit) => lit.emit(),
            TsType::Ref(name) => name.clone(),
        }
    }
}

/// Join `members` with `separator`, parenthesizing unions inside an intersection.
fn join_members(members: &[TsType], separator: &str) -> String {
    let wrap_unions = separator == " & ";
    members
        .iter()
        .map(|member| match member {
            TsType::Union(_) if wrap_unions => format!("({})", member.emit()),
            _ => member.emit(),
        })
        .collect::<Vec<_>>()
        .join(separator)
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let marker = if self.optional { "?" } else { "" };
        format!("{}{marker}: {}", property_key(&self.name), self.ty.emit())
    }
}

/// A `/** ... */` block for `description`, indented by `indent`.
fn doc_comment(description: Option<&str>, indent: &str) -> String {
    let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) else {
        return String::new();
    };
    let description = description.replace("*/", "*\\/");
    let lines: Vec<_> = description.lines().map(str::trim_end).collect();
    if let [line] = lines.as_slice() {
        return format!("{indent}/** {line} */\n");
    }

    let mut output = format!("{indent}/**\n");
    for line in lines {
        if line.is_empty() {
            let _ = writeln!(output, "{indent} *");
        } else {
            let _ = writeln!(output, "{indent} * {line}");
        }
    }
    let _ = writeln!(output, "{indent} */");
    output
}

/// Interface members, one per line.
fn interface_body(properties: &[TsProp]) -> String {
    let mut output = String::new();
    for prop in properties {
        output.push_str(&doc_comment(prop.description.as_deref(), "  "));
        let _ = writeln!(output, "  {};", prop.emit());
    }
    output
}

fn emit_class(
    name: &str,
    extends: Option<&str>,
    properties: &[TsProp],
    constructor_interface: bool,
    clone_method: bool,
) -> String {
    let mut output = format!("export class {name}");
    if let Some(base) = extends {
        let _ = write!(output, " extends {base}");
    }
    if constructor_interface {
        let _ = write!(output, " implements I{name}");
    }
    output.push_str(" {\n");

    for prop in properties {
        output.push_str(&doc_comment(prop.description.as_deref(), "  "));
        let key = property_key(&prop.name);
        let marker = if prop.optional { "?" } else { "!" };
        let _ = writeln!(output, "  {key}{marker}: {};", prop.ty.emit());
    }

    if constructor_interface {
        if !properties.is_empty() {
            output.push('\n');
        }
        let _ = writeln!(output, "  constructor(data?: I{name}) {{");
        if extends.is_some() {
            output.push_str("    super(data);\n");
        } else {
            output.push_str(concat!(
                "    if (data) {\n",
                "      for (const property in data) {\n",
                "        if (Object.prototype.hasOwnProperty.call(data, property)) {\n",
                "          (this as any)[property] = (data as any)[property];\n",
                "        }\n",
                "      }\n",
                "    }\n",
            ));
        }
        output.push_str("  }\n");
    }

    if clone_method {
        if constructor_interface || !properties.is_empty() {
            output.push('\n');
        }
        let _ = writeln!(output, "  clone(): {name} {{");
        output.push_str("    const json = JSON.parse(JSON.stringify(this));\n");
        let _ = writeln!(output, "    const result = new {name}();");
        output.push_str("    Object.assign(result, json);\n");
        output.push_str("    return result;\n");
        output.push_str("  }\n");
    }
    output.push_str("}\n");

    if constructor_interface {
        output.push('\n');
        let _ = write!(output, "export interface I{name}");
        if let Some(base) = extends {
            let _ = write!(output, " extends I{base}");
        }
        output.push_str(" {\n");
        output.push_str(&interface_body(properties));
        output.push_str("}\n");
    }
    output
}

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        let mut output = doc_comment(self.description.as_deref(), "");
        let name = &self.name;
        match &self.kind {
            TypeDefKind::Interface {
                extends,
                properties,
            } => {
                let _ = write!(output, "export interface {name}");
                if !extends.is_empty() {
                    let _ = write!(output, " extends {}", extends.join(", "));
                }
                output.push_str(" {\n");
                output.push_str(&interface_body(properties));
                output.push_str("}\n");
            }
            TypeDefKind::Class {
                extends,
                properties,
                constructor_interface,
                clone_method,
            } => {
                output.push_str(&emit_class(
                    name,
                    extends.as_deref(),
                    properties,
                    *constructor_interface,
                    *clone_method,
                ));
            }
            TypeDefKind::TypeAlias { ty } => {
                let _ = writeln!(output, "export type {name} = {};", ty.emit());
            }
            TypeDefKind::ConstEnum { values } => {
                let _ = writeln!(output, "export const {name} = {{");
                for (key, value) in values {
                    let _ = writeln!(output, "  {key}: {},", value.emit());
                }
                output.push_str("} as const;\n\n");
                let _ = writeln!(
                    output,
                    "export type {name} = (typeof {name})[keyof typeof {name}];"
                );
            }
        }
        output
    }
}

impl Emit for TsModule {
    fn emit(&self) -> String {
        let mut output = String::new();

        for line in &self.header {
            output.push_str(line);
            output.push('\n');
        }

        for type_def in &self.types {
            output.push('\n');
            output.push_str(&type_def.emit());
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(name: &str, ty: TsType, optional: bool) -> TsProp {
        TsProp {
            name: name.into(),
            ty,
            optional,
            description: None,
        }
    }

    #[test]
    fn test_emit_literal() {
        assert_eq!(TsLiteral::String("Each".into()).emit(), "\"Each\"");
        assert_eq!(TsLiteral::String("6\" pallet".into()).emit(), "\"6\\\" pallet\"");
        assert_eq!(TsLiteral::Number(0.25).emit(), "0.25");
        assert_eq!(TsLiteral::Int(-3).emit(), "-3");
        assert_eq!(TsLiteral::Bool(false).emit(), "false");
        assert_eq!(TsLiteral::Null.emit(), "null");
    }

    #[test]
    fn test_emit_union_array() {
        let inner = TsType::Union(vec![
            TsType::Primitive(TsPrimitive::String),
            TsType::Primitive(TsPrimitive::Undefined),
        ]);
        let ty = TsType::Array(Box::new(inner));
        assert_eq!(ty.emit(), "(string | undefined)[]");
    }

    #[test]
    fn test_emit_intersection_wraps_unions() {
        let ty = TsType::Intersection(vec![
            TsType::Ref("Base".into()),
            TsType::Union(vec![TsType::Ref("A".into()), TsType::Ref("B".into())]),
        ]);
        assert_eq!(ty.emit(), "Base & (A | B)");
    }

    #[test]
    fn test_emit_object_type() {
        let ty = TsType::Object(vec![
            prop("id", TsType::Primitive(TsPrimitive::Number), false),
            prop("display-name", TsType::Primitive(TsPrimitive::String), true),
        ]);
        assert_eq!(ty.emit(), "{ id: number; \"display-name\"?: string }");
    }

    #[test]
    fn test_emit_interface_with_docs_and_extends() {
        let def = TsTypeDef {
            name: "Receipt".into(),
            description: Some("An inbound receipt.".into()),
            kind: TypeDefKind::Interface {
                extends: vec!["Document".into()],
                properties: vec![TsProp {
                    description: Some("First line\nSecond line".into()),
                    ..prop("id", TsType::Primitive(TsPrimitive::Number), false)
                }],
            },
        };
        let expected = "/** An inbound receipt. */\n\
                        export interface Receipt extends Document {\n  \
                        /**\n   \
                        * First line\n   \
                        * Second line\n   \
                        */\n  \
                        id: number;\n\
                        }\n";
        assert_eq!(def.emit(), expected);
    }

    #[test]
    fn test_emit_const_enum() {
        let def = TsTypeDef {
            name: "Status".into(),
            description: None,
            kind: TypeDefKind::ConstEnum {
                values: vec![("Open".into(), TsLiteral::String("Open".into()))],
            },
        };
        assert_eq!(
            def.emit(),
            "export const Status = {\n  Open: \"Open\",\n} as const;\n\n\
             export type Status = (typeof Status)[keyof typeof Status];\n"
        );
    }

    #[test]
    fn test_emit_plain_class() {
        let def = TsTypeDef {
            name: "Line".into(),
            description: None,
            kind: TypeDefKind::Class {
                extends: Some("Entity".into()),
                properties: vec![
                    prop("sku", TsType::Primitive(TsPrimitive::String), false),
                    prop("qty", TsType::Primitive(TsPrimitive::Number), true),
                ],
                constructor_interface: false,
                clone_method: false,
            },
        };
        assert_eq!(
            def.emit(),
            "export class Line extends Entity {\n  sku!: string;\n  qty?: number;\n}\n"
        );
    }

    #[test]
    fn test_emit_class_with_constructor_interface_and_clone() {
        let def = TsTypeDef {
            name: "Line".into(),
            description: None,
            kind: TypeDefKind::Class {
                extends: None,
                properties: vec![prop("sku", TsType::Primitive(TsPrimitive::String), false)],
                constructor_interface: true,
                clone_method: true,
            },
        };
        let out = def.emit();

        assert!(out.starts_with("export class Line implements ILine {\n  sku!: string;\n"));
        assert!(out.contains("  constructor(data?: ILine) {\n    if (data) {\n"));
        assert!(out.contains("  clone(): Line {\n"));
        assert!(out.contains("    const result = new Line();\n"));
        assert!(out.ends_with("export interface ILine {\n  sku: string;\n}\n"));
    }

    #[test]
    fn test_emit_derived_class_calls_super() {
        let def = TsTypeDef {
            name: "Line".into(),
            description: None,
            kind: TypeDefKind::Class {
                extends: Some("Entity".into()),
                properties: vec![],
                constructor_interface: true,
                clone_method: false,
            },
        };
        let out = def.emit();

        assert!(out.contains("export class Line extends Entity implements ILine {\n"));
        assert!(out.contains("    super(data);\n"));
        assert!(out.contains("export interface ILine extends IEntity {\n}\n"));
    }

    #[test]
    fn test_emit_module() {
        let module = TsModule {
            header: vec!["// header".into()],
            types: vec![TsTypeDef {
                name: "Id".into(),
                description: None,
                kind: TypeDefKind::TypeAlias {
                    ty: TsType::Primitive(TsPrimitive::String),
                },
            }],
        };
        assert_eq!(module.emit(), "// header\n\nexport type Id = string;\n");
    }
}
