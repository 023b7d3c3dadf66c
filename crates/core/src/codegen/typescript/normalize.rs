//! Normalization from schema definitions to TypeScript declarations.
//!
//! All schema corner cases are resolved here: references become declared
//! identifiers, nullability follows the configured null value, and object
//! definitions built from `allOf` become `extends` clauses where possible.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;

use super::naming::TypeNames;
use super::settings::{DateTimeType, NullValue, TypeScriptSettings, TypeStyle};
use super::types::{TsLiteral, TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind};
use super::utils::{
    enum_member_name, property_key, string_record, unique_member_names, unknown_record,
};
use crate::closure::IsolatedDocument;
use crate::document::{AdditionalProperties, Discriminator, EnumValue, Schema, SchemaType};
use crate::error::CodegenError;
use crate::references::extract_reference_name;

/// Converts the definitions of one isolated document.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    document: &'a IsolatedDocument,
    names: &'a TypeNames,
    settings: &'a TypeScriptSettings,
}

/// An object definition: declared properties plus the definitions it extends.
struct ObjectShape<'s> {
    bases: Vec<&'s str>,
    parts: Vec<&'s Schema>,
}

impl<'a> Normalizer<'a> {
    pub fn new(
        document: &'a IsolatedDocument,
        names: &'a TypeNames,
        settings: &'a TypeScriptSettings,
    ) -> Self {
        Self {
            document,
            names,
            settings,
        }
    }

    /// Convert the definition `definition`, declared as `name`.
    pub fn type_def(
        &self,
        definition: &str,
        name: &str,
        schema: &Schema,
    ) -> Result<TsTypeDef, CodegenError> {
        let kind = if let Some(values) = schema.enum_values.as_deref().filter(|v| !v.is_empty()) {
            TypeDefKind::ConstEnum {
                values: normalize_enum_values(values, schema.extra.get("x-enumNames")),
            }
        } else if let Some(shape) = self.object_shape(schema, &mut HashSet::from([definition])) {
            let extends = shape
                .bases
                .iter()
                .map(|reference| self.resolve_reference(definition, reference))
                .collect::<Result<Vec<_>, _>>()?;
            let mut properties = Vec::new();
            for part in &shape.parts {
                properties.extend(self.properties(definition, &part.properties, &part.required)?);
            }
            match self.settings.type_style {
                TypeStyle::Interface => TypeDefKind::Interface {
                    extends,
                    properties,
                },
                TypeStyle::Class => TypeDefKind::Class {
                    extends: extends.into_iter().next(),
                    properties,
                    constructor_interface: self.settings.generate_constructor_interface,
                    clone_method: self.settings.generate_clone_method,
                },
            }
        } else {
            TypeDefKind::TypeAlias {
                ty: self.ts_type(definition, schema)?,
            }
        };

        Ok(TsTypeDef {
            name: name.to_string(),
            description: schema.description.clone(),
            kind,
        })
    }

    /// Decide whether `schema` is declared as an interface or class.
    ///
    /// `visiting` holds the definitions on the current `extends` chain.
    fn object_shape<'s>(
        &self,
        schema: &'s Schema,
        visiting: &mut HashSet<&'s str>,
    ) -> Option<ObjectShape<'s>>
    where
        'a: 's,
    {
        if !is_plain_object(schema, true) {
            return None;
        }
        if schema.all_of.is_empty() && schema.properties.is_empty() && schema.schema_type.is_none() {
            return None;
        }

        let mut shape = ObjectShape {
            bases: Vec::new(),
            parts: vec![schema],
        };
        for member in &schema.all_of {
            match member.ref_path.as_deref() {
                Some(reference) if self.is_extendable(reference, visiting) => {
                    shape.bases.push(reference);
                }
                None if is_plain_object(member, false) => shape.parts.push(member),
                _ => return None,
            }
        }

        if self.settings.type_style == TypeStyle::Class && shape.bases.len() > 1 {
            return None;
        }
        Some(shape)
    }

    fn is_extendable<'s>(&self, reference: &'s str, visiting: &mut HashSet<&'s str>) -> bool
    where
        'a: 's,
    {
        let prefix = self.document.dialect.reference_prefix();
        let Some((name, target)) = extract_reference_name(reference, prefix)
            .and_then(|name| self.document.definitions.get_key_value(name))
        else {
            return false;
        };
        let is_enum = target.enum_values.as_ref().is_some_and(|v| !v.is_empty());
        if is_enum || !visiting.insert(name.as_str()) {
            return false;
        }
        let extendable = self.object_shape(target, visiting).is_some();
        visiting.remove(name.as_str());
        extendable
    }

    fn properties(
        &self,
        definition: &str,
        properties: &IndexMap<String, Schema>,
        required: &[String],
    ) -> Result<Vec<TsProp>, CodegenError> {
        let required: HashSet<&str> = required.iter().map(String::as_str).collect();

        properties
            .iter()
            .map(|(name, schema)| {
                Ok(TsProp {
                    name: name.clone(),
                    ty: self.ts_type(definition, schema)?,
                    optional: !required.contains(name.as_str()),
                    description: schema.description.clone(),
                })
            })
            .collect()
    }

    /// Convert a schema node inside `definition` to a type.
    pub fn ts_type(&self, definition: &str, schema: &Schema) -> Result<TsType, CodegenError> {
        let ty = self.base_type(definition, schema)?;
        if schema.is_nullable() {
            Ok(self.with_null(ty))
        } else {
            Ok(ty)
        }
    }

    fn null_type(&self) -> TsType {
        TsType::Primitive(match self.settings.null_value {
            NullValue::Null => TsPrimitive::Null,
            NullValue::Undefined => TsPrimitive::Undefined,
        })
    }

    fn with_null(&self, ty: TsType) -> TsType {
        let null = self.null_type();
        match ty {
            ty if ty == null => ty,
            TsType::Union(mut types) => {
                if !types.contains(&null) {
                    types.push(null);
                }
                TsType::Union(types)
            }
            ty => TsType::Union(vec![ty, null]),
        }
    }

    fn base_type(&self, definition: &str, schema: &Schema) -> Result<TsType, CodegenError> {
        if let Some(reference) = &schema.ref_path {
            return Ok(TsType::Ref(self.resolve_reference(definition, reference)?));
        }

        if !schema.all_of.is_empty() {
            let mut types = self.ts_types(definition, &schema.all_of)?;
            if !schema.properties.is_empty() {
                types.push(self.object_type(definition, schema)?);
            }
            return Ok(match types.len() {
                1 => types.swap_remove(0),
                _ => TsType::Intersection(types),
            });
        }

        if !schema.any_of.is_empty() {
            return Ok(TsType::Union(self.ts_types(definition, &schema.any_of)?));
        }

        if !schema.one_of.is_empty() {
            return self.discriminated_union(definition, &schema.one_of, schema.discriminator.as_ref());
        }

        if let Some(values) = schema.enum_values.as_deref().filter(|v| !v.is_empty()) {
            return Ok(enum_to_union_type(values));
        }

        match &schema.schema_type {
            Some(SchemaType::Single(t)) => self.schema_type_to_ts(definition, t, schema),
            Some(SchemaType::Multiple(types)) => {
                let mut ts_types = types
                    .iter()
                    .filter(|t| *t != "null")
                    .map(|t| self.schema_type_to_ts(definition, t, schema))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(match ts_types.len() {
                    0 => self.null_type(),
                    1 => ts_types.swap_remove(0),
                    _ => TsType::Union(ts_types),
                })
            }
            None if !schema.properties.is_empty() || schema.additional_properties.is_some() => {
                self.object_type(definition, schema)
            }
            None => Ok(TsType::Primitive(TsPrimitive::Unknown)),
        }
    }

    fn ts_types(&self, definition: &str, schemas: &[Schema]) -> Result<Vec<TsType>, CodegenError> {
        schemas
            .iter()
            .map(|schema| self.ts_type(definition, schema))
            .collect()
    }

    /// `oneOf` members, tagged with their discriminator value where one is known.
    fn discriminated_union(
        &self,
        definition: &str,
        schemas: &[Schema],
        discriminator: Option<&Discriminator>,
    ) -> Result<TsType, CodegenError> {
        let (property, mapping) = match discriminator {
            Some(Discriminator::Property(property)) => (property, None),
            Some(Discriminator::Object {
                property_name,
                mapping,
            }) => (property_name, mapping.as_ref()),
            None => return Ok(TsType::Union(self.ts_types(definition, schemas)?)),
        };

        let prefix = self.document.dialect.reference_prefix();
        let mut union_types = Vec::with_capacity(schemas.len());
        for schema in schemas {
            let base_type = self.ts_type(definition, schema)?;
            let value = schema.ref_path.as_deref().and_then(|reference| match mapping {
                Some(mapping) => mapping
                    .iter()
                    .find(|(_, target)| *target == reference)
                    .map(|(value, _)| value.clone()),
                None => extract_reference_name(reference, prefix).map(str::to_string),
            });

            union_types.push(match value {
                Some(value) => TsType::Intersection(vec![
                    TsType::Object(vec![TsProp {
                        name: property.clone(),
                        ty: TsType::Literal(TsLiteral::String(value)),
                        optional: false,
                        description: None,
                    }]),
                    base_type,
                ]),
                None => base_type,
            });
        }
        Ok(TsType::Union(union_types))
    }

    fn schema_type_to_ts(
        &self,
        definition: &str,
        schema_type: &str,
        schema: &Schema,
    ) -> Result<TsType, CodegenError> {
        Ok(match schema_type {
            "string" => match schema.format.as_deref() {
                Some("date" | "date-time") => match self.settings.date_time_type {
                    DateTimeType::Date => TsType::Ref("Date".to_string()),
                    DateTimeType::String => TsType::Primitive(TsPrimitive::String),
                },
                Some("binary") => TsType::Ref("Blob".to_string()),
                _ => TsType::Primitive(TsPrimitive::String),
            },
            "number" | "integer" => TsType::Primitive(TsPrimitive::Number),
            "boolean" => TsType::Primitive(TsPrimitive::Boolean),
            "null" => self.null_type(),
            "file" => TsType::Ref("Blob".to_string()),
            "array" => {
                let item_type = match &schema.items {
                    Some(items) => self.ts_type(definition, items)?,
                    None => TsType::Primitive(TsPrimitive::Unknown),
                };
                TsType::Array(Box::new(item_type))
            }
            "object" => self.object_type(definition, schema)?,
            _ => TsType::Primitive(TsPrimitive::Unknown),
        })
    }

    fn object_type(&self, definition: &str, schema: &Schema) -> Result<TsType, CodegenError> {
        let record = match &schema.additional_properties {
            Some(AdditionalProperties::Bool(true)) => Some(unknown_record()),
            Some(AdditionalProperties::Schema(values)) => {
                Some(string_record(self.ts_type(definition, values)?))
            }
            Some(AdditionalProperties::Bool(false)) | None => None,
        };

        if schema.properties.is_empty() {
            return Ok(record.unwrap_or_else(unknown_record));
        }

        let object = TsType::Object(self.properties(definition, &schema.properties, &schema.required)?);
        Ok(match record {
            Some(record) => TsType::Intersection(vec![object, record]),
            None => object,
        })
    }

    /// Resolve a `$ref` inside `definition` to the declared identifier of its target.
    fn resolve_reference(&self, definition: &str, reference: &str) -> Result<String, CodegenError> {
        let prefix = self.document.dialect.reference_prefix();
        let Some(target) = extract_reference_name(reference, prefix) else {
            return Err(CodegenError::UnsupportedReference {
                definition: definition.to_string(),
                reference: reference.to_string(),
            });
        };

        self.names
            .get(target)
            .map(str::to_string)
            .ok_or_else(|| CodegenError::UnresolvedReference {
                document: self.document.key.clone(),
                definition: definition.to_string(),
                reference: reference.to_string(),
            })
    }
}

/// An object node with nothing that forces a type alias.
///
/// `allOf` members are allowed only on the definition itself, not on its parts.
fn is_plain_object(schema: &Schema, allow_all_of: bool) -> bool {
    let object_typed = match &schema.schema_type {
        None => true,
        Some(SchemaType::Single(t)) => t == "object",
        Some(SchemaType::Multiple(_)) => false,
    };
    object_typed
        && schema.ref_path.is_none()
        && schema.enum_values.is_none()
        && schema.any_of.is_empty()
        && schema.one_of.is_empty()
        && (allow_all_of || schema.all_of.is_empty())
        && !schema.is_nullable()
        && matches!(
            schema.additional_properties,
            None | Some(AdditionalProperties::Bool(false))
        )
}

/// Normalize enum values to (key, literal) pairs for const enum objects.
///
/// Keys come from an `x-enumNames` extension when it names every value.
/// Repeated keys are suffixed so the object never declares a member twice.
fn normalize_enum_values(values: &[EnumValue], names: Option<&Value>) -> Vec<(String, TsLiteral)> {
    let names: Option<Vec<String>> = names
        .and_then(Value::as_array)
        .filter(|names| names.len() == values.len())
        .and_then(|names| {
            names
                .iter()
                .map(|name| name.as_str().map(str::to_string))
                .collect()
        });
    let names = names.unwrap_or_else(|| values.iter().map(enum_member_name).collect());

    unique_member_names(names)
        .iter()
        .zip(values)
        .map(|(name, v)| (property_key(name), TsLiteral::from(v)))
        .collect()
}

/// Convert enum values to a union of literal types.
fn enum_to_union_type(values: &[EnumValue]) -> TsType {
    TsType::Union(
        values
            .iter()
            .map(|v| TsType::Literal(v.into()))
            .collect(),
    )
}
