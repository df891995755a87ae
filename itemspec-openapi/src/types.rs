use itemspec_core::{Field, FieldType};
use serde_json::{json, Map, Value};

/// OpenAPI fragment for a type with a faithful primitive representation.
///
/// Returns `None` for opaque types (JSON, aliases, geometry, anything
/// unrecognized): those must be described without a `type` keyword so any
/// value shape validates.
pub fn primitive_schema(field_type: &FieldType) -> Option<Value> {
    let schema = match field_type {
        FieldType::BigInteger => json!({ "type": "integer", "format": "int64" }),
        FieldType::Integer => json!({ "type": "integer" }),
        FieldType::Float => json!({ "type": "number", "format": "float" }),
        FieldType::Decimal => json!({ "type": "number" }),
        FieldType::String | FieldType::Text | FieldType::Hash => json!({ "type": "string" }),
        FieldType::Uuid => json!({ "type": "string", "format": "uuid" }),
        FieldType::Binary => json!({ "type": "string", "format": "binary" }),
        FieldType::Boolean => json!({ "type": "boolean" }),
        FieldType::Date => json!({ "type": "string", "format": "date" }),
        FieldType::Time => json!({ "type": "string", "format": "time" }),
        FieldType::DateTime => json!({ "type": "string", "format": "date-time" }),
        FieldType::Timestamp => json!({ "type": "string", "format": "timestamp" }),
        FieldType::Csv => json!({ "type": "array", "items": { "type": "string" } }),
        FieldType::Json
        | FieldType::Alias
        | FieldType::Unknown
        | FieldType::Geometry(_)
        | FieldType::Other(_) => return None,
    };
    Some(schema)
}

/// Whether a field's type maps to a fragment without `type`.
pub fn is_opaque(field_type: &FieldType) -> bool {
    primitive_schema(field_type).is_none()
}

/// `nullable` as it should appear on the field's property.
///
/// Primary keys are never null in a stored row; alias fields have no column
/// and therefore no nullability at all.
pub fn nullable_flag(field: &Field) -> Option<bool> {
    if field.is_primary_key() {
        return Some(false);
    }
    field.is_nullable()
}

/// Map a non-relational field to its OpenAPI property schema.
pub fn map_field_type(field: &Field) -> Map<String, Value> {
    let mut fragment = base_fragment(field);

    match primitive_schema(&field.field_type) {
        Some(Value::Object(primitive)) => fragment.extend(primitive),
        _ => {
            if let FieldType::Other(name) = &field.field_type {
                tracing::debug!(
                    collection = %field.collection,
                    field = %field.field,
                    field_type = %name,
                    "Unrecognized field type, describing it without a type"
                );
            }
        }
    }

    fragment
}

/// `nullable` and `description`, the keywords shared by every property shape.
pub(crate) fn base_fragment(field: &Field) -> Map<String, Value> {
    let mut fragment = Map::new();
    if let Some(nullable) = nullable_flag(field) {
        fragment.insert("nullable".into(), Value::Bool(nullable));
    }
    if let Some(note) = field.note() {
        fragment.insert("description".into(), json!(note));
    }
    fragment
}

/// Schema of a key value: the primary key's primitive type, or
/// "integer or string" when there is no usable primary key.
pub fn key_schema(primary_key: Option<&Field>) -> Value {
    primary_key
        .and_then(|pk| primitive_schema(&pk.field_type))
        .unwrap_or_else(|| json!({ "oneOf": [{ "type": "integer" }, { "type": "string" }] }))
}
