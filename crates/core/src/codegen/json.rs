//! Standalone JSON schema documents.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use super::Codegen;
use crate::closure::IsolatedDocument;
use crate::document::{DocumentInfo, Schema, SchemaDialect};
use crate::error::CodegenError;

/// Writes each isolated document back out as a Swagger 2 or OpenAPI 3 document
/// holding only its definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocumentGenerator;

#[derive(Serialize)]
struct OutputDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    swagger: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    openapi: Option<&'a str>,
    info: &'a DocumentInfo,
    paths: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    definitions: Option<&'a IndexMap<String, Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<OutputComponents<'a>>,
}

#[derive(Serialize)]
struct OutputComponents<'a> {
    schemas: &'a IndexMap<String, Schema>,
}

impl<'a> OutputDocument<'a> {
    fn new(document: &'a IsolatedDocument) -> Self {
        let version = document.spec_version.as_str();
        let definitions = &document.definitions;
        match document.dialect {
            SchemaDialect::Swagger2 => Self {
                swagger: Some(version),
                openapi: None,
                info: &document.info,
                paths: Map::new(),
                definitions: Some(definitions),
                components: None,
            },
            SchemaDialect::OpenApi3 => Self {
                swagger: None,
                openapi: Some(version),
                info: &document.info,
                paths: Map::new(),
                definitions: None,
                components: Some(OutputComponents {
                    schemas: definitions,
                }),
            },
        }
    }
}

impl Codegen for JsonDocumentGenerator {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn generate(&self, document: &IsolatedDocument, _file_name: &str) -> Result<String, CodegenError> {
        let mut text = serde_json::to_string_pretty(&OutputDocument::new(document)).map_err(|source| {
            CodegenError::Serialize {
                document: document.key.clone(),
                source,
            }
        })?;
        text.push('\n');
        Ok(text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::document::SchemaDocument;

    fn isolated(dialect: SchemaDialect) -> IsolatedDocument {
        let mut receipt = Schema::of_type("object");
        receipt.extra.insert("x-abstract".to_string(), Value::Bool(true));
        IsolatedDocument {
            key: "Corax.Core".to_string(),
            info: DocumentInfo {
                title: "Corax WMS".to_string(),
                version: "v1".to_string(),
            },
            dialect,
            spec_version: dialect.default_spec_version().to_string(),
            definitions: [("Corax.Core.Receipt".to_string(), receipt)].into_iter().collect(),
        }
    }

    #[test]
    fn test_swagger_output_is_a_readable_document() {
        let document = isolated(SchemaDialect::Swagger2);
        let text = JsonDocumentGenerator.generate(&document, "Corax.Core").unwrap();

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["swagger"], "2.0");
        assert_eq!(value["info"]["title"], "Corax WMS");
        assert!(value.get("openapi").is_none());
        assert_eq!(value["definitions"]["Corax.Core.Receipt"]["x-abstract"], true);

        let reparsed = SchemaDocument::parse(&text).unwrap();
        assert_eq!(reparsed.definitions, document.definitions);
        assert_eq!(reparsed.info, document.info);
    }

    #[test]
    fn test_openapi_output_uses_components() {
        let document = isolated(SchemaDialect::OpenApi3);
        let text = JsonDocumentGenerator.generate(&document, "Corax.Core").unwrap();

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["openapi"], "3.0.1");
        assert!(value.get("definitions").is_none());
        assert_eq!(value["components"]["schemas"]["Corax.Core.Receipt"]["type"], "object");
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_extension() {
        assert_eq!(JsonDocumentGenerator.extension(), "json");
    }
}
