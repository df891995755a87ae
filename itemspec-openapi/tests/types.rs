use itemspec_core::{Field, FieldType};
use itemspec_openapi::types::{is_opaque, key_schema, map_field_type, primitive_schema};
use serde_json::{json, Value};

fn mapped(field: &Field) -> Value {
    Value::Object(map_field_type(field))
}

// ── Opaque types ────────────────────────────────────────────────────────────

#[test]
fn nullable_json_is_untyped() {
    let field = Field::new("test_table", "blob", "json").nullable(true);
    assert_eq!(mapped(&field), json!({ "nullable": true }));
}

#[test]
fn non_nullable_json_is_untyped() {
    let field = Field::new("test_table", "blob", "json").nullable(false);
    let schema = mapped(&field);
    assert_eq!(schema, json!({ "nullable": false }));
    assert!(schema.get("type").is_none());
}

#[test]
fn unrecognized_type_is_untyped() {
    let field = Field::new("t", "embedding", "vector").nullable(false);
    assert_eq!(field.field_type, FieldType::Other("vector".into()));
    assert_eq!(mapped(&field), json!({ "nullable": false }));
}

#[test]
fn geometry_and_unknown_are_untyped() {
    for ty in ["geometry", "geometry.Polygon", "unknown"] {
        let schema = mapped(&Field::new("t", "f", ty));
        assert!(schema.get("type").is_none(), "{ty} should not declare a type");
        assert_eq!(schema["nullable"], true);
    }
}

#[test]
fn alias_has_neither_type_nor_nullable() {
    assert_eq!(mapped(&Field::alias("t", "divider")), json!({}));
}

#[test]
fn opaque_classification() {
    assert!(is_opaque(&FieldType::Json));
    assert!(is_opaque(&FieldType::Other("x".into())));
    assert!(!is_opaque(&FieldType::Uuid));
}

// ── Primitive types ─────────────────────────────────────────────────────────

#[test]
fn integer_primary_key() {
    let field = Field::new("test_table", "id", "integer").primary_key();
    assert_eq!(mapped(&field), json!({ "nullable": false, "type": "integer" }));
}

#[test]
fn primary_key_is_never_nullable() {
    let field = Field::new("t", "id", "uuid").primary_key().nullable(true);
    assert_eq!(
        mapped(&field),
        json!({ "nullable": false, "type": "string", "format": "uuid" })
    );
}

#[test]
fn nullable_follows_schema() {
    let field = Field::new("t", "title", "string").nullable(true);
    assert_eq!(mapped(&field), json!({ "nullable": true, "type": "string" }));
}

#[test]
fn lookup_table() {
    let cases = [
        (FieldType::BigInteger, json!({ "type": "integer", "format": "int64" })),
        (FieldType::Integer, json!({ "type": "integer" })),
        (FieldType::Float, json!({ "type": "number", "format": "float" })),
        (FieldType::Decimal, json!({ "type": "number" })),
        (FieldType::Text, json!({ "type": "string" })),
        (FieldType::Hash, json!({ "type": "string" })),
        (FieldType::Binary, json!({ "type": "string", "format": "binary" })),
        (FieldType::Boolean, json!({ "type": "boolean" })),
        (FieldType::Date, json!({ "type": "string", "format": "date" })),
        (FieldType::Time, json!({ "type": "string", "format": "time" })),
        (FieldType::DateTime, json!({ "type": "string", "format": "date-time" })),
        (FieldType::Timestamp, json!({ "type": "string", "format": "timestamp" })),
        (FieldType::Csv, json!({ "type": "array", "items": { "type": "string" } })),
    ];
    for (ty, expected) in cases {
        assert_eq!(primitive_schema(&ty), Some(expected), "mapping of {ty}");
    }
}

#[test]
fn note_becomes_description() {
    let field = Field::new("t", "title", "string").with_note("Headline shown on cards");
    assert_eq!(mapped(&field)["description"], "Headline shown on cards");
}

// ── Key schema ──────────────────────────────────────────────────────────────

#[test]
fn key_schema_uses_primary_key_type() {
    let pk = Field::new("t", "id", "uuid").primary_key();
    assert_eq!(key_schema(Some(&pk)), json!({ "type": "string", "format": "uuid" }));
}

#[test]
fn key_schema_without_primary_key() {
    assert_eq!(
        key_schema(None),
        json!({ "oneOf": [{ "type": "integer" }, { "type": "string" }] })
    );
}
