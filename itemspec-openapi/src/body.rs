use crate::schema::{schema_ref, SchemaNames};
use serde_json::{json, Value};

/// A schema accepting either one item or an array of items.
///
/// Rendered as a bare `oneOf`: a sibling `type` would have to be either
/// `object` or `array` and would reject the other shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedBody {
    reference: String,
}

impl ComposedBody {
    pub fn single_or_many(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    pub fn to_schema(&self) -> Value {
        json!({
            "oneOf": [
                { "$ref": self.reference },
                { "type": "array", "items": { "$ref": self.reference } }
            ]
        })
    }
}

/// Request bodies of the item write operations.
///
/// `key` is the schema of the collection's primary key, used by the batch
/// shapes to address items.
pub struct RequestBodyComposer<'a> {
    items_ref: String,
    write_ref: String,
    key: &'a Value,
}

impl<'a> RequestBodyComposer<'a> {
    pub fn new(names: &SchemaNames, collection: &str, key: &'a Value) -> Self {
        Self {
            items_ref: names.items_ref(collection),
            write_ref: names.write_ref(collection),
            key,
        }
    }

    /// One item or many, described by the write schema.
    pub fn create(&self) -> Value {
        let schema = ComposedBody::single_or_many(self.write_ref.as_str()).to_schema();
        json_body(schema)
    }

    /// A partial item.
    pub fn update_single(&self) -> Value {
        json_body(json!({ "$ref": self.write_ref }))
    }

    /// The same partial item applied to every item selected by keys or query.
    pub fn update_batch(&self) -> Value {
        json_body(json!({
            "type": "object",
            "required": ["data"],
            "properties": {
                "keys": { "type": "array", "items": self.key },
                "query": { "$ref": schema_ref("Query") },
                "data": { "$ref": self.write_ref }
            }
        }))
    }

    /// Items selected by keys or query.
    pub fn delete_batch(&self) -> Value {
        json_body(json!({
            "type": "object",
            "properties": {
                "keys": { "type": "array", "items": self.key },
                "query": { "$ref": schema_ref("Query") }
            }
        }))
    }

    /// Created items are echoed in the shape they were sent in.
    pub fn created_data(&self) -> Value {
        ComposedBody::single_or_many(self.items_ref.as_str()).to_schema()
    }
}

fn json_body(schema: Value) -> Value {
    json!({
        "required": true,
        "content": {
            "application/json": { "schema": schema }
        }
    })
}
