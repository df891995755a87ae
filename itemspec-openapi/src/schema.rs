use crate::relation::{RelationResolver, SchemaMode};
use crate::types::map_field_type;
use itemspec_core::{Collection, Field, Snapshot};
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashSet};

/// Extension keyword mapping a schema back to its source collection.
pub const COLLECTION_EXTENSION: &str = "x-collection";

/// `snake_case`, `kebab-case`, dotted or spaced names to `PascalCase`.
pub fn pascal_case(name: &str) -> String {
    name.split(|c: char| c == '_' || c == '-' || c == '.' || c.is_whitespace())
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Unique `PascalCase` stem of every table-backed collection.
///
/// Stems name the `Items<Stem>` and `WriteItems<Stem>` components and end
/// every operationId. Collections are taken in name order; when a stem is
/// already taken the next free numeric suffix is appended (`blogPosts` gets
/// `BlogPosts`, then `blog_posts` gets `BlogPosts2`).
#[derive(Debug, Clone, Default)]
pub struct SchemaNames {
    stems: BTreeMap<String, String>,
}

impl SchemaNames {
    pub fn new(snapshot: &Snapshot) -> Self {
        let mut taken = HashSet::new();
        let mut stems = BTreeMap::new();

        for collection in snapshot.collections().filter(|c| !c.is_folder()) {
            let base = pascal_case(&collection.collection);
            let mut stem = base.clone();
            let mut suffix = 2;
            while !taken.insert(stem.clone()) {
                stem = format!("{base}{suffix}");
                suffix += 1;
            }
            if stem != base {
                tracing::warn!(
                    collection = %collection.collection,
                    stem = %stem,
                    "Collection name collides with another once PascalCased, numbering it"
                );
            }
            stems.insert(collection.collection.clone(), stem);
        }

        Self { stems }
    }

    /// Stem of `collection`; collections outside the snapshot fall back to
    /// their plain `PascalCase` form.
    pub fn stem(&self, collection: &str) -> String {
        self.stems
            .get(collection)
            .cloned()
            .unwrap_or_else(|| pascal_case(collection))
    }

    /// Component name of a collection's read schema.
    pub fn items(&self, collection: &str) -> String {
        format!("Items{}", self.stem(collection))
    }

    /// Component name of a collection's write schema.
    pub fn write(&self, collection: &str) -> String {
        format!("WriteItems{}", self.stem(collection))
    }

    pub fn items_ref(&self, collection: &str) -> String {
        schema_ref(&self.items(collection))
    }

    pub fn write_ref(&self, collection: &str) -> String {
        schema_ref(&self.write(collection))
    }
}

pub fn schema_ref(name: &str) -> String {
    format!("#/components/schemas/{name}")
}

/// Registry that collects the schema definitions of `components/schemas`.
///
/// Names iterate in ascending order, so the rendered document does not
/// depend on registration order.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Value>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema definition, returning the definition it replaced.
    pub fn register(&mut self, name: &str, schema: Value) -> Option<Value> {
        self.schemas.insert(name.to_string(), schema)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Consume the registry and return the schemas map for embedding
    /// in the OpenAPI spec.
    pub fn into_schemas(self) -> Map<String, Value> {
        self.schemas.into_iter().collect()
    }
}

/// Whether a field must be present on every stored item.
///
/// Non-nullable, no default, not a primary key and not filled in by the
/// server, or explicitly flagged required in its metadata.
pub fn is_required(field: &Field) -> bool {
    if field.is_marked_required() {
        return true;
    }
    field.is_nullable() == Some(false)
        && !field.has_default()
        && !field.is_primary_key()
        && !field.is_server_generated()
}

/// Whether clients may send a value for this field on create or update.
pub fn is_writable(field: &Field) -> bool {
    if field.is_readonly() || field.is_server_generated() {
        return false;
    }
    !(field.is_primary_key() && field.has_default())
}

/// Builds the per-collection read and write schemas.
pub struct SchemaBuilder<'a> {
    snapshot: &'a Snapshot,
    resolver: RelationResolver<'a>,
}

impl<'a> SchemaBuilder<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            resolver: RelationResolver::new(snapshot),
        }
    }

    /// `Items<Collection>`: every visible field, in provider order.
    pub fn read_schema(&self, collection: &Collection) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in self.snapshot.fields_of(&collection.collection) {
            properties.insert(field.field.clone(), self.property(field, SchemaMode::Read));
            if is_required(field) {
                required.push(json!(field.field));
            }
        }

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".into(), Value::Array(required));
        }
        schema.insert(COLLECTION_EXTENSION.into(), json!(collection.collection));
        Value::Object(schema)
    }

    /// `WriteItems<Collection>`: only client-suppliable fields, all optional.
    pub fn write_schema(&self, collection: &Collection) -> Value {
        let properties: Map<String, Value> = self
            .snapshot
            .fields_of(&collection.collection)
            .filter(|field| is_writable(field))
            .map(|field| (field.field.clone(), self.property(field, SchemaMode::Write)))
            .collect();

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert(COLLECTION_EXTENSION.into(), json!(collection.collection));
        Value::Object(schema)
    }

    /// Register both schemas of every table-backed collection.
    pub fn register_all(&self, registry: &mut SchemaRegistry) {
        let names = self.resolver.names();
        for collection in self.snapshot.collections().filter(|c| !c.is_folder()) {
            let name = names.items(&collection.collection);
            tracing::debug!(collection = %collection.collection, schema = %name, "Building schema");

            registry.register(&name, self.read_schema(collection));
            registry.register(&names.write(&collection.collection), self.write_schema(collection));
        }
    }

    fn property(&self, field: &Field, mode: SchemaMode) -> Value {
        let resolution = self.resolver.resolve(field);
        let property = self
            .resolver
            .property(field, &resolution, mode)
            .unwrap_or_else(|| map_field_type(field));
        Value::Object(property)
    }
}

/// Schemas shared by every generated document.
pub fn shared_schemas() -> Vec<(&'static str, Value)> {
    vec![
        (
            "Query",
            json!({
                "type": "object",
                "properties": {
                    "fields": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Control what fields are being returned in the object."
                    },
                    "filter": { "type": "object" },
                    "search": {
                        "type": "string",
                        "description": "Filter by items that contain the given search query in one of their fields."
                    },
                    "sort": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "How to sort the returned items."
                    },
                    "limit": {
                        "type": "number",
                        "description": "Set the maximum number of items that will be returned"
                    },
                    "offset": {
                        "type": "number",
                        "description": "How many items to skip when fetching data."
                    },
                    "page": {
                        "type": "number",
                        "description": "Cursor for use in pagination. Often used in combination with limit."
                    },
                    "deep": {
                        "type": "object",
                        "description": "Deeply influence the result of relational datasets."
                    }
                }
            }),
        ),
        (
            "Metadata",
            json!({
                "type": "object",
                "properties": {
                    "total_count": {
                        "type": "integer",
                        "description": "Returns the total item count of the collection you're querying."
                    },
                    "filter_count": {
                        "type": "integer",
                        "description": "Returns the item count of the collection you're querying, taking the current filter/search parameters into account."
                    }
                }
            }),
        ),
    ]
}
