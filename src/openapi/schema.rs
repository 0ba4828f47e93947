//! Schema objects shared by definitions, properties and responses.

use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Primitive `type` keyword values.
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `array`
    Array,
    /// `object`
    Object,
}

/// JSON pointer to a named entry of `#/definitions`.
pub fn definition_ref(name: &str) -> String {
    format!("#/definitions/{name}")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
/// Schema object used for definitions, properties and response bodies.
pub struct Schema {
    /// Reference to a named definition.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Primitive type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// Format hint refining `type`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Element schema for arrays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Named properties for objects.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,
}

impl Schema {
    fn typed(schema_type: SchemaType, format: Option<&str>) -> Self {
        Self {
            schema_type: Some(schema_type),
            format: format.map(str::to_string),
            ..Self::default()
        }
    }

    /// `{"type": "string"}`
    pub fn string() -> Self {
        Self::typed(SchemaType::String, None)
    }

    /// `{"type": "integer", "format": "int8"}`
    pub fn int8() -> Self {
        Self::typed(SchemaType::Integer, Some("int8"))
    }

    /// `{"type": "integer", "format": "int32"}`
    pub fn int32() -> Self {
        Self::typed(SchemaType::Integer, Some("int32"))
    }

    /// `{"type": "integer", "format": "int64"}`
    pub fn int64() -> Self {
        Self::typed(SchemaType::Integer, Some("int64"))
    }

    /// `{"type": "number", "format": "float"}`
    pub fn float32() -> Self {
        Self::typed(SchemaType::Number, Some("float"))
    }

    /// `{"type": "number", "format": "double"}`
    pub fn float64() -> Self {
        Self::typed(SchemaType::Number, Some("double"))
    }

    /// `{"type": "boolean"}`
    pub fn boolean() -> Self {
        Self::typed(SchemaType::Boolean, None)
    }

    /// `{"type": "object"}` with no declared properties.
    pub fn object() -> Self {
        Self::typed(SchemaType::Object, None)
    }

    /// `{"type": "array", "items": ...}`
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::typed(SchemaType::Array, None)
        }
    }

    /// `{"$ref": "#/definitions/<name>"}`
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(definition_ref(name)),
            ..Self::default()
        }
    }

    /// Set or replace a named property.
    pub fn set_property(&mut self, name: impl Into<String>, schema: Schema) {
        self.properties.insert(name.into(), schema);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_only_present_keywords() {
        let mut def = Schema::object();
        def.set_property("tags", Schema::array(Schema::string()));
        def.set_property("owner", Schema::reference("User"));

        assert_eq!(
            serde_json::to_value(&def).unwrap(),
            json!({
                "type": "object",
                "properties": {
                    "tags": {"type": "array", "items": {"type": "string"}},
                    "owner": {"$ref": "#/definitions/User"}
                }
            })
        );
    }

    #[test]
    fn numeric_formats() {
        assert_eq!(
            serde_json::to_value(Schema::float64()).unwrap(),
            json!({"type": "number", "format": "double"})
        );
        assert_eq!(
            serde_json::to_value(Schema::int8()).unwrap(),
            json!({"type": "integer", "format": "int8"})
        );
    }
}
