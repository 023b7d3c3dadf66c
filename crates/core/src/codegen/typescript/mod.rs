//! TypeScript declarations for isolated documents.
//!
//! The pipeline per document is:
//! 1. Name: every definition gets a unique identifier (`naming`)
//! 2. Normalize: schema definitions → declaration IR (`normalize`)
//! 3. Emit: IR → code string via the `Emit` trait (`emit`)

mod emit;
mod naming;
mod normalize;
mod settings;
mod types;
mod utils;

pub use settings::{DateTimeType, NullValue, TypeScriptSettings, TypeStyle};

use tracing::debug;

use self::emit::Emit;
use self::naming::TypeNames;
use self::normalize::Normalizer;
use self::types::TsModule;
use super::Codegen;
use crate::closure::IsolatedDocument;
use crate::error::CodegenError;

/// Emits one TypeScript module of type declarations per isolated document.
#[derive(Debug, Clone, Default)]
pub struct TypeScriptGenerator {
    settings: TypeScriptSettings,
}

impl TypeScriptGenerator {
    /// Create a generator with the given settings.
    pub fn new(settings: TypeScriptSettings) -> Self {
        Self { settings }
    }

    /// The settings in effect.
    pub fn settings(&self) -> &TypeScriptSettings {
        &self.settings
    }

    fn header(&self, document: &IsolatedDocument, file_name: &str) -> Vec<String> {
        vec![
            "/* eslint-disable */".to_string(),
            "// Generated by nsplit. Do not edit.".to_string(),
            format!("// Source: {} {}", document.info.title, document.info.version),
            format!("// Group: {}", document.key),
            format!("// Client: {}", self.settings.client_class_name(file_name)),
        ]
    }
}

impl Codegen for TypeScriptGenerator {
    fn extension(&self) -> &'static str {
        "ts"
    }

    fn generate(&self, document: &IsolatedDocument, file_name: &str) -> Result<String, CodegenError> {
        let names = if self.settings.type_style == TypeStyle::Class
            && self.settings.generate_constructor_interface
        {
            TypeNames::with_constructor_interfaces(document.definition_names())
        } else {
            TypeNames::new(document.definition_names())
        };
        let normalizer = Normalizer::new(document, &names, &self.settings);

        let types = document
            .definitions
            .iter()
            .zip(names.identifiers())
            .map(|((definition, schema), name)| normalizer.type_def(definition, name, schema))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            group = %document.key,
            declarations = types.len(),
            "Normalized TypeScript declarations."
        );

        let module = TsModule {
            header: self.header(document, file_name),
            types,
        };
        Ok(module.emit())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::document::{DocumentInfo, SchemaDialect};

    fn document(json: &str) -> IsolatedDocument {
        IsolatedDocument {
            key: "Corax.Core.Inbound".to_string(),
            info: DocumentInfo {
                title: "Corax WMS".to_string(),
                version: "v1".to_string(),
            },
            dialect: SchemaDialect::Swagger2,
            spec_version: "2.0".to_string(),
            definitions: serde_json::from_str(json).unwrap(),
        }
    }

    #[test]
    fn test_generates_module_with_header() {
        let doc = document(
            r##"{
              "Corax.Core.Inbound.Receipt": {
                "type": "object",
                "description": "An inbound receipt.",
                "required": ["id"],
                "properties": {
                  "id": { "type": "integer" },
                  "status": { "$ref": "#/definitions/Corax.Core.Status" }
                }
              },
              "Corax.Core.Status": { "type": "string", "enum": ["Open", "Closed"] }
            }"##,
        );
        let out = TypeScriptGenerator::default()
            .generate(&doc, "Corax.Core.Inbound")
            .unwrap();

        assert!(out.starts_with("/* eslint-disable */\n// Generated by nsplit. Do not edit.\n"));
        assert!(out.contains("// Source: Corax WMS v1\n"));
        assert!(out.contains("// Group: Corax.Core.Inbound\n"));
        assert!(out.contains("// Client: Corax.Core.InboundClient\n"));
        assert!(out.contains(
            "/** An inbound receipt. */\nexport interface Receipt {\n  id: number;\n  status?: Status;\n}\n"
        ));
        assert!(out.contains("export const Status = {\n  Open: \"Open\",\n  Closed: \"Closed\",\n} as const;"));
    }

    #[test]
    fn test_same_named_definitions_from_different_namespaces() {
        let doc = document(
            r##"{
              "Billing.Item": { "type": "object", "properties": { "price": { "type": "number" } } },
              "Catalog.Item": { "type": "object", "properties": { "sku": { "type": "string" } } },
              "Billing.Order": {
                "type": "object",
                "properties": {
                  "billed": { "$ref": "#/definitions/Billing.Item" },
                  "listed": { "$ref": "#/definitions/Catalog.Item" }
                }
              }
            }"##,
        );
        let out = TypeScriptGenerator::default().generate(&doc, "Billing").unwrap();

        assert!(out.contains("export interface Item {\n  price?: number;\n}\n"));
        assert!(out.contains("export interface Item2 {\n  sku?: string;\n}\n"));
        assert!(out.contains("  billed?: Item;\n  listed?: Item2;\n"));
    }

    #[test]
    fn test_class_style() {
        let doc = document(
            r##"{ "Ns.Line": { "type": "object", "required": ["sku"], "properties": { "sku": { "type": "string" } } } }"##,
        );
        let generator = TypeScriptGenerator::new(TypeScriptSettings {
            type_style: TypeStyle::Class,
            ..TypeScriptSettings::default()
        });
        let out = generator.generate(&doc, "Ns").unwrap();

        assert!(out.contains("export class Line {\n  sku!: string;\n}\n"));
        assert_eq!(generator.extension(), "ts");
    }

    #[test]
    fn test_constructor_interfaces_do_not_collide_with_definitions() {
        let doc = document(
            r##"{
              "Shop.Line": { "type": "object", "properties": { "sku": { "type": "string" } } },
              "Shop.ILine": { "type": "object", "properties": { "qty": { "type": "integer" } } }
            }"##,
        );
        let generator = TypeScriptGenerator::new(TypeScriptSettings {
            type_style: TypeStyle::Class,
            generate_constructor_interface: true,
            ..TypeScriptSettings::default()
        });
        let out = generator.generate(&doc, "Shop").unwrap();

        assert!(out.contains("export class Line implements ILine {"));
        assert!(out.contains("export class ILine2 implements IILine2 {"));
        assert_eq!(out.matches("interface ILine {").count(), 1);
        assert!(out.contains("export interface IILine2 {"));
    }

    #[test]
    fn test_dangling_reference_fails_the_document() {
        let doc = document(
            r##"{ "Ns.A": { "type": "object", "properties": { "b": { "$ref": "#/definitions/Ns.Gone" } } } }"##,
        );
        let err = TypeScriptGenerator::default().generate(&doc, "Ns").unwrap_err();
        assert!(matches!(err, CodegenError::UnresolvedReference { .. }));
    }
}
