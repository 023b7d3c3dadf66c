//! Schema document model for serde deserialization.
//!
//! Only the parts of a Swagger 2 / OpenAPI 3 document that matter for
//! splitting are modelled: top-level metadata and the named type definitions.
//! Keys the model does not know about are kept verbatim in [`Schema::extra`]
//! so a re-serialized definition loses nothing.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Title used when the source document has no `info.title`.
pub const DEFAULT_TITLE: &str = "Generated API";

/// Version used when the source document has no `info.version`.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Every named type definition of a document, in document order.
pub type DefinitionUniverse = IndexMap<String, Schema>;

/// Which flavour of API description a document is written in.
///
/// The dialect fixes where definitions live and how `$ref` targets are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaDialect {
    /// Swagger 2: `definitions`, referenced as `#/definitions/Name`.
    Swagger2,
    /// OpenAPI 3: `components.schemas`, referenced as `#/components/schemas/Name`.
    OpenApi3,
}

impl SchemaDialect {
    /// The prefix a local `$ref` must carry to name a type definition.
    pub fn reference_prefix(self) -> &'static str {
        match self {
            SchemaDialect::Swagger2 => "#/definitions/",
            SchemaDialect::OpenApi3 => "#/components/schemas/",
        }
    }

    /// Default version string written into re-serialized documents.
    pub fn default_spec_version(self) -> &'static str {
        match self {
            SchemaDialect::Swagger2 => "2.0",
            SchemaDialect::OpenApi3 => "3.0.1",
        }
    }
}

/// Top-level document metadata, copied unchanged into every isolated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            version: DEFAULT_VERSION.to_string(),
        }
    }
}

/// A parsed source document.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    /// Title and version of the API.
    pub info: DocumentInfo,
    /// Swagger 2 or OpenAPI 3.
    pub dialect: SchemaDialect,
    /// The `swagger` / `openapi` version string of the source.
    pub spec_version: String,
    /// All named type definitions.
    pub definitions: DefinitionUniverse,
}

impl SchemaDocument {
    /// Create a document from parts.
    pub fn new(info: DocumentInfo, dialect: SchemaDialect, definitions: DefinitionUniverse) -> Self {
        Self {
            info,
            dialect,
            spec_version: dialect.default_spec_version().to_string(),
            definitions,
        }
    }

    /// Parse a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let raw: RawDocument<JsonVersion> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse API description as JSON: {e}"))?;
        Ok(raw.into_document())
    }

    /// Parse a document from a YAML string.
    ///
    /// Unquoted versions keep their text (`version: 1.10` stays `1.10`).
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let raw: RawDocument<String> = serde_yaml::from_str(yaml)
            .map_err(|e| format!("Failed to parse API description as YAML: {e}"))?;
        Ok(raw.into_document())
    }

    /// Parse a document, trying JSON first and YAML for anything that does not look like JSON.
    pub fn parse(text: &str) -> Result<Self, String> {
        let trimmed = text.trim_start();
        if trimmed.starts_with('{') {
            Self::from_json(trimmed)
        } else {
            Self::from_yaml(text)
        }
    }
}

/// `V` reads the version scalars. A YAML plain scalar deserializes into a
/// `String` as written; JSON needs [`JsonVersion`] to accept numbers.
#[derive(Debug, Deserialize)]
struct RawDocument<V> {
    swagger: Option<V>,
    openapi: Option<V>,
    info: Option<RawInfo<V>>,
    definitions: Option<DefinitionUniverse>,
    components: Option<RawComponents>,
}

#[derive(Debug, Deserialize)]
struct RawInfo<V> {
    title: Option<String>,
    version: Option<V>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonVersion {
    Text(String),
    Number(serde_json::Number),
}

impl From<JsonVersion> for String {
    fn from(version: JsonVersion) -> Self {
        match version {
            JsonVersion::Text(text) => text,
            JsonVersion::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawComponents {
    schemas: Option<DefinitionUniverse>,
}

impl<V: Into<String>> RawDocument<V> {
    fn into_document(self) -> SchemaDocument {
        let info = self
            .info
            .map(|info| DocumentInfo {
                title: info.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
                version: info
                    .version
                    .map_or_else(|| DEFAULT_VERSION.to_string(), Into::into),
            })
            .unwrap_or_default();

        let component_schemas = self.components.and_then(|c| c.schemas);
        let (dialect, definitions) = match (self.openapi.is_some(), self.definitions) {
            (false, Some(definitions)) => (SchemaDialect::Swagger2, definitions),
            (true, _) => (
                SchemaDialect::OpenApi3,
                component_schemas.unwrap_or_default(),
            ),
            (false, None) => match component_schemas {
                Some(schemas) => (SchemaDialect::OpenApi3, schemas),
                None => (SchemaDialect::Swagger2, DefinitionUniverse::new()),
            },
        };

        let spec_version = match dialect {
            SchemaDialect::Swagger2 => self.swagger,
            SchemaDialect::OpenApi3 => self.openapi,
        }
        .map_or_else(|| dialect.default_spec_version().to_string(), Into::into);

        SchemaDocument {
            info,
            dialect,
            spec_version,
            definitions,
        }
    }
}

/// A schema node: a named definition or any inline node nested inside one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Reference to another definition.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,

    /// The type of the schema (string, number, integer, boolean, object, array, file).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    /// Format hint (e.g. date-time, int64).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Free-text description, emitted as a doc comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Properties for object types.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,

    /// Required property names for object types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Item schema for array types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    /// Value schema for map types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,

    /// Intersection (all of these schemas combined).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Schema>,

    /// Union (any of these schemas).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<Schema>,

    /// Union (exactly one of these schemas).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<Schema>,

    /// Enum values.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<EnumValue>>,

    /// OpenAPI 3.0 nullable flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    /// Swagger 2 vendor extension for nullability.
    #[serde(rename = "x-nullable", skip_serializing_if = "Option::is_none")]
    pub x_nullable: Option<bool>,

    /// Discriminator for polymorphic schemas.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,

    /// Every other key, kept verbatim.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Schema {
    /// A node that only references another definition.
    pub fn reference(target: impl Into<String>) -> Self {
        Self {
            ref_path: Some(target.into()),
            ..Self::default()
        }
    }

    /// A node of a single plain type.
    pub fn of_type(schema_type: &str) -> Self {
        Self {
            schema_type: Some(SchemaType::Single(schema_type.to_string())),
            ..Self::default()
        }
    }

    /// Check if this schema is nullable via `nullable`, `x-nullable` or a `null` type entry.
    pub fn is_nullable(&self) -> bool {
        if self.nullable == Some(true) || self.x_nullable == Some(true) {
            return true;
        }
        matches!(&self.schema_type, Some(SchemaType::Multiple(types)) if types.iter().any(|t| t == "null"))
    }
}

/// Enum value can be string, integer, float, boolean, or null.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EnumValue {
    /// A string member.
    String(String),
    /// An integer member.
    Integer(i64),
    /// A floating point member.
    Float(f64),
    /// A boolean member.
    Bool(bool),
    /// The `null` member.
    Null,
}

/// Schema type can be a single type or an array of types (for nullable).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// `"type": "string"`
    Single(String),
    /// `"type": ["string", "null"]`
    Multiple(Vec<String>),
}

/// Additional properties can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` allows any value, `false` forbids extra keys.
    Bool(bool),
    /// Every extra value must match this schema.
    Schema(Box<Schema>),
}

/// Discriminator for polymorphic schemas.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Discriminator {
    /// Swagger 2 spelling: the discriminating property name.
    Property(String),
    /// OpenAPI 3 spelling.
    Object {
        /// The property name that contains the discriminator value.
        #[serde(rename = "propertyName")]
        property_name: String,
        /// Optional mapping from discriminator values to schema refs.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mapping: Option<IndexMap<String, String>>,
    },
}
