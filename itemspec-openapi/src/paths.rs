use crate::body::RequestBodyComposer;
use crate::schema::{schema_ref, SchemaNames};
use crate::types::key_schema;
use itemspec_core::{Collection, Snapshot};
use serde_json::{json, Map, Value};

/// Query parameters attached to list operations.
pub const LIST_PARAMETERS: &[&str] = &[
    "Fields", "Limit", "Offset", "Sort", "Filter", "Search", "Meta", "Page",
];

/// Query parameters attached to single-item reads and writes.
pub const ITEM_PARAMETERS: &[&str] = &["Fields", "Meta"];

/// Path of a collection's list endpoint.
pub fn collection_path(collection: &str) -> String {
    format!("/items/{collection}")
}

/// Path of a collection's item endpoint.
pub fn item_path(collection: &str) -> String {
    format!("/items/{collection}/{{id}}")
}

/// Builds the CRUD path items of each collection.
pub struct PathBuilder<'a> {
    snapshot: &'a Snapshot,
    names: SchemaNames,
}

impl<'a> PathBuilder<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            names: SchemaNames::new(snapshot),
        }
    }

    /// Path items for every collection that exposes endpoints, keyed by path.
    pub fn build_all(&self) -> Map<String, Value> {
        let mut paths = Map::new();
        for collection in self.snapshot.collections().filter(|c| exposes_paths(c)) {
            for (path, item) in self.build(collection) {
                paths.insert(path, item);
            }
        }
        paths
    }

    /// Path items of one collection.
    pub fn build(&self, collection: &Collection) -> Vec<(String, Value)> {
        let name = collection.collection.as_str();
        let primary_key = self.snapshot.primary_key(name);
        if primary_key.is_none() && !collection.is_singleton() {
            tracing::warn!(
                collection = %name,
                "Collection has no primary key, item paths accept any key"
            );
        }
        let key = key_schema(primary_key);
        let ops = Operations {
            collection: name,
            stem: self.names.stem(name),
            items_ref: self.names.items_ref(name),
            bodies: RequestBodyComposer::new(&self.names, name, &key),
            key: &key,
        };

        if collection.is_singleton() {
            let mut item = Map::new();
            item.insert("get".into(), ops.read_singleton());
            item.insert("patch".into(), ops.update_singleton());
            return vec![(collection_path(name), Value::Object(item))];
        }

        let mut list = Map::new();
        list.insert("post".into(), ops.create());
        list.insert("get".into(), ops.list());
        list.insert("patch".into(), ops.update_batch());
        list.insert("delete".into(), ops.delete_batch());

        let mut item = Map::new();
        item.insert("get".into(), ops.read_single());
        item.insert("patch".into(), ops.update_single());
        item.insert("delete".into(), ops.delete_single());

        vec![
            (collection_path(name), Value::Object(list)),
            (item_path(name), Value::Object(item)),
        ]
    }
}

/// Hidden collections and folders get no endpoints.
pub fn exposes_paths(collection: &Collection) -> bool {
    !collection.is_folder() && !collection.is_hidden()
}

struct Operations<'a> {
    collection: &'a str,
    stem: String,
    items_ref: String,
    bodies: RequestBodyComposer<'a>,
    key: &'a Value,
}

impl Operations<'_> {
    fn list(&self) -> Value {
        let mut op = self.operation("readItems", "List Items", "List the {} items.");
        op.insert("parameters".into(), parameter_refs(LIST_PARAMETERS));
        op.insert(
            "responses".into(),
            responses(ok(json!({
                "type": "array",
                "items": { "$ref": self.items_ref }
            }))),
        );
        Value::Object(op)
    }

    fn create(&self) -> Value {
        let mut op = self.operation("createItems", "Create an Item", "Create a new {} item.");
        op.insert("parameters".into(), parameter_refs(&["Meta"]));
        op.insert("requestBody".into(), self.bodies.create());
        op.insert("responses".into(), responses(ok(self.bodies.created_data())));
        Value::Object(op)
    }

    fn update_batch(&self) -> Value {
        let mut op = self.operation(
            "updateItems",
            "Update Multiple Items",
            "Update multiple {} items at the same time.",
        );
        op.insert("parameters".into(), parameter_refs(ITEM_PARAMETERS));
        op.insert("requestBody".into(), self.bodies.update_batch());
        op.insert(
            "responses".into(),
            responses(ok(json!({
                "type": "array",
                "items": { "$ref": self.items_ref }
            }))),
        );
        Value::Object(op)
    }

    fn delete_batch(&self) -> Value {
        let mut op = self.operation(
            "deleteItems",
            "Delete Multiple Items",
            "Delete multiple existing {} items.",
        );
        op.insert("requestBody".into(), self.bodies.delete_batch());
        op.insert("responses".into(), responses(no_content()));
        Value::Object(op)
    }

    fn read_single(&self) -> Value {
        let mut op = self.operation(
            "readSingleItems",
            "Retrieve an Item",
            "Retrieve a single {} item by unique identifier.",
        );
        op.insert("parameters".into(), self.with_id(ITEM_PARAMETERS));
        op.insert("responses".into(), responses(ok(self.item_ref())));
        Value::Object(op)
    }

    fn update_single(&self) -> Value {
        let mut op = self.operation(
            "updateSingleItems",
            "Update an Item",
            "Update an existing {} item.",
        );
        op.insert("parameters".into(), self.with_id(ITEM_PARAMETERS));
        op.insert("requestBody".into(), self.bodies.update_single());
        op.insert("responses".into(), responses(ok(self.item_ref())));
        Value::Object(op)
    }

    fn delete_single(&self) -> Value {
        let mut op = self.operation(
            "deleteSingleItems",
            "Delete an Item",
            "Delete an existing {} item.",
        );
        op.insert("parameters".into(), self.with_id(&[]));
        op.insert("responses".into(), responses(no_content()));
        Value::Object(op)
    }

    fn read_singleton(&self) -> Value {
        let mut op = self.operation(
            "readSingleItems",
            "Retrieve the Item",
            "Retrieve the {} singleton.",
        );
        op.insert("parameters".into(), parameter_refs(ITEM_PARAMETERS));
        op.insert("responses".into(), responses(ok(self.item_ref())));
        Value::Object(op)
    }

    fn update_singleton(&self) -> Value {
        let mut op = self.operation(
            "updateSingleItems",
            "Update the Item",
            "Update the {} singleton.",
        );
        op.insert("parameters".into(), parameter_refs(ITEM_PARAMETERS));
        op.insert("requestBody".into(), self.bodies.update_single());
        op.insert("responses".into(), responses(ok(self.item_ref())));
        Value::Object(op)
    }

    /// `description` has its `{}` replaced by the collection name.
    fn operation(&self, verb: &str, summary: &str, description: &str) -> Map<String, Value> {
        let mut op = Map::new();
        op.insert("summary".into(), json!(summary));
        op.insert(
            "description".into(),
            json!(description.replacen("{}", self.collection, 1)),
        );
        op.insert("operationId".into(), json!(format!("{verb}{}", self.stem)));
        op.insert("tags".into(), json!([self.collection]));
        op
    }

    fn item_ref(&self) -> Value {
        json!({ "$ref": self.items_ref })
    }

    fn with_id(&self, shared: &[&str]) -> Value {
        let mut params = vec![json!({
            "name": "id",
            "in": "path",
            "required": true,
            "description": "Index of the item.",
            "schema": self.key
        })];
        if let Value::Array(refs) = parameter_refs(shared) {
            params.extend(refs);
        }
        Value::Array(params)
    }
}

fn parameter_refs(names: &[&str]) -> Value {
    names
        .iter()
        .map(|name| json!({ "$ref": format!("#/components/parameters/{name}") }))
        .collect()
}

fn ok(data: Value) -> (String, Value) {
    (
        "200".into(),
        json!({
            "description": "Successful request",
            "content": {
                "application/json": {
                    "schema": {
                        "type": "object",
                        "properties": {
                            "data": data,
                            "meta": { "$ref": schema_ref("Metadata") }
                        }
                    }
                }
            }
        }),
    )
}

fn no_content() -> (String, Value) {
    ("204".into(), json!({ "description": "Successful request" }))
}

fn responses((status, success): (String, Value)) -> Value {
    let mut responses = Map::new();
    responses.insert(status, success);
    responses.insert(
        "401".into(),
        json!({ "$ref": "#/components/responses/UnauthorizedError" }),
    );
    responses.insert(
        "404".into(),
        json!({ "$ref": "#/components/responses/NotFoundError" }),
    );
    Value::Object(responses)
}

/// Reusable `components.parameters`.
pub fn shared_parameters() -> Map<String, Value> {
    let parameters = json!({
        "Fields": {
            "name": "fields",
            "in": "query",
            "required": false,
            "description": "Control what fields are being returned in the object.",
            "explode": false,
            "schema": { "type": "array", "items": { "type": "string" } }
        },
        "Limit": {
            "name": "limit",
            "in": "query",
            "required": false,
            "description": "A limit on the number of objects that are returned.",
            "schema": { "type": "integer" }
        },
        "Offset": {
            "name": "offset",
            "in": "query",
            "required": false,
            "description": "How many items to skip when fetching data.",
            "schema": { "type": "integer" }
        },
        "Sort": {
            "name": "sort",
            "in": "query",
            "required": false,
            "description": "How to sort the returned items. `sort` is a CSV of fields used to sort the fetched items. A minus sign (`-`) reverses a field to descending order.",
            "explode": false,
            "schema": { "type": "array", "items": { "type": "string" } }
        },
        "Filter": {
            "name": "filter",
            "in": "query",
            "required": false,
            "description": "Select items in collection by given conditions.",
            "content": {
                "application/json": {
                    "schema": { "type": "object" }
                }
            }
        },
        "Search": {
            "name": "search",
            "in": "query",
            "required": false,
            "description": "Filter by items that contain the given search query in one of their fields.",
            "schema": { "type": "string" }
        },
        "Meta": {
            "name": "meta",
            "in": "query",
            "required": false,
            "description": "What metadata to return in the response.",
            "schema": { "type": "string" }
        },
        "Page": {
            "name": "page",
            "in": "query",
            "required": false,
            "description": "Cursor for use in pagination. Often used in combination with limit.",
            "schema": { "type": "integer" }
        }
    });
    match parameters {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Reusable `components.responses`.
pub fn shared_responses() -> Map<String, Value> {
    let mut responses = Map::new();
    responses.insert("NotFoundError".into(), error_response("Error: Not found."));
    responses.insert(
        "UnauthorizedError".into(),
        error_response("Error: Unauthorized request"),
    );
    responses
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": {
                        "error": {
                            "type": "object",
                            "properties": {
                                "code": { "type": "integer", "format": "int64" },
                                "message": { "type": "string" }
                            }
                        }
                    }
                }
            }
        }
    })
}
