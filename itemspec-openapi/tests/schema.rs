use itemspec_core::{Collection, Field, Relation, Snapshot};
use itemspec_openapi::schema::{
    is_required, is_writable, pascal_case, SchemaNames, COLLECTION_EXTENSION,
};
use itemspec_openapi::{SchemaBuilder, SchemaRegistry};
use serde_json::json;

#[test]
fn pascal_case_names() {
    assert_eq!(pascal_case("test_table"), "TestTable");
    assert_eq!(pascal_case("blog-posts"), "BlogPosts");
    assert_eq!(pascal_case("a.b c"), "ABC");
    assert_eq!(pascal_case("articles"), "Articles");
    assert_eq!(pascal_case("__x__y"), "XY");
}

#[test]
fn schema_names() {
    let snapshot = Snapshot::new(vec![Collection::new("test_table")], vec![], vec![]);
    let names = SchemaNames::new(&snapshot);
    assert_eq!(names.stem("test_table"), "TestTable");
    assert_eq!(names.items("test_table"), "ItemsTestTable");
    assert_eq!(names.write("test_table"), "WriteItemsTestTable");
    assert_eq!(
        names.items_ref("test_table"),
        "#/components/schemas/ItemsTestTable"
    );
    assert_eq!(
        names.write_ref("test_table"),
        "#/components/schemas/WriteItemsTestTable"
    );
}

#[test]
fn colliding_stems_are_numbered_in_name_order() {
    let snapshot = Snapshot::new(
        vec![
            Collection::new("blog_posts"),
            Collection::new("blogPosts"),
            Collection::new("blog-posts"),
            Collection::folder("BlogPosts"),
        ],
        vec![],
        vec![],
    );
    let names = SchemaNames::new(&snapshot);

    // '-' < 'P' < '_'; folders take no stem.
    assert_eq!(names.stem("blog-posts"), "BlogPosts");
    assert_eq!(names.stem("blogPosts"), "BlogPosts2");
    assert_eq!(names.stem("blog_posts"), "BlogPosts3");
}

#[test]
fn numbered_stems_skip_taken_names() {
    let snapshot = Snapshot::new(
        vec![Collection::new("a"), Collection::new("A2"), Collection::new("A")],
        vec![],
        vec![],
    );
    let names = SchemaNames::new(&snapshot);

    assert_eq!(names.stem("A"), "A");
    assert_eq!(names.stem("A2"), "A2");
    assert_eq!(names.stem("a"), "A3");
}

#[test]
fn unknown_collections_fall_back_to_pascal_case() {
    let names = SchemaNames::new(&Snapshot::default());
    assert_eq!(names.items("late_arrival"), "ItemsLateArrival");
}

// ── Registry ────────────────────────────────────────────────────────────────

#[test]
fn registry_register_and_lookup() {
    let mut registry = SchemaRegistry::new();
    assert!(registry.is_empty());
    assert!(registry.register("ItemsA", json!({ "type": "object" })).is_none());
    assert!(registry.contains("ItemsA"));
    assert_eq!(registry.get("ItemsA").unwrap()["type"], "object");
    assert_eq!(registry.len(), 1);
}

#[test]
fn registry_returns_replaced_schema() {
    let mut registry = SchemaRegistry::new();
    registry.register("ItemsA", json!({ "v": 1 }));
    let previous = registry.register("ItemsA", json!({ "v": 2 }));
    assert_eq!(previous, Some(json!({ "v": 1 })));
    assert_eq!(registry.len(), 1);
}

#[test]
fn registry_output_is_name_ordered() {
    let mut registry = SchemaRegistry::new();
    registry.register("Zeta", json!({}));
    registry.register("Alpha", json!({}));
    let names: Vec<String> = registry.into_schemas().keys().cloned().collect();
    assert_eq!(names, vec!["Alpha", "Zeta"]);
}

// ── Required / writable ─────────────────────────────────────────────────────

#[test]
fn required_rules() {
    assert!(is_required(&Field::new("t", "title", "string").nullable(false)));
    assert!(!is_required(&Field::new("t", "title", "string")));
    assert!(!is_required(
        &Field::new("t", "status", "string")
            .nullable(false)
            .with_default(json!("draft"))
    ));
    assert!(!is_required(&Field::new("t", "id", "integer").primary_key()));
    assert!(!is_required(
        &Field::new("t", "created", "timestamp")
            .nullable(false)
            .with_special("date-created")
    ));
    assert!(is_required(&Field::new("t", "slug", "string").with_required(true)));
    assert!(!is_required(&Field::alias("t", "divider")));
}

#[test]
fn null_default_is_no_default() {
    let field = Field::new("t", "title", "string")
        .nullable(false)
        .with_default(serde_json::Value::Null);
    assert!(is_required(&field));
}

#[test]
fn writable_rules() {
    assert!(is_writable(&Field::new("t", "title", "string")));
    assert!(!is_writable(&Field::new("t", "title", "string").with_readonly(true)));
    assert!(!is_writable(
        &Field::new("t", "id", "integer").primary_key().auto_increment()
    ));
    assert!(!is_writable(
        &Field::new("t", "id", "uuid").primary_key().with_special("uuid")
    ));
    assert!(!is_writable(
        &Field::new("t", "id", "integer")
            .primary_key()
            .with_default(json!(1))
    ));
    assert!(is_writable(&Field::new("t", "code", "string").primary_key()));
    assert!(!is_writable(
        &Field::new("t", "updated", "timestamp").with_special("date-updated")
    ));
}

// ── Read and write schemas ──────────────────────────────────────────────────

fn articles() -> Snapshot {
    Snapshot::new(
        vec![Collection::new("articles"), Collection::new("authors")],
        vec![
            Field::new("articles", "id", "integer").primary_key().auto_increment(),
            Field::new("articles", "title", "string").nullable(false),
            Field::new("articles", "status", "string")
                .nullable(false)
                .with_default(json!("draft")),
            Field::new("articles", "views", "integer").with_readonly(true),
            Field::new("articles", "created_on", "timestamp").with_special("date-created"),
            Field::new("articles", "author", "integer"),
            Field::new("authors", "id", "integer").primary_key(),
        ],
        vec![Relation::many_to_one("articles", "author", "authors")],
    )
}

#[test]
fn read_schema_lists_every_field() {
    let snapshot = articles();
    let builder = SchemaBuilder::new(&snapshot);
    let schema = builder.read_schema(snapshot.collection("articles").unwrap());

    let names: Vec<&str> = schema["properties"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        names,
        vec!["id", "title", "status", "views", "created_on", "author"]
    );
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["required"], json!(["title"]));
    assert_eq!(schema[COLLECTION_EXTENSION], "articles");
    assert_eq!(
        schema["properties"]["author"]["oneOf"][1]["$ref"],
        "#/components/schemas/ItemsAuthors"
    );
}

#[test]
fn read_schema_omits_empty_required() {
    let snapshot = Snapshot::new(
        vec![Collection::new("notes")],
        vec![
            Field::new("notes", "id", "integer").primary_key(),
            Field::new("notes", "body", "text"),
        ],
        vec![],
    );
    let schema = SchemaBuilder::new(&snapshot).read_schema(snapshot.collection("notes").unwrap());
    assert!(schema.get("required").is_none());
}

#[test]
fn write_schema_keeps_client_fields() {
    let snapshot = articles();
    let builder = SchemaBuilder::new(&snapshot);
    let schema = builder.write_schema(snapshot.collection("articles").unwrap());

    let names: Vec<&str> = schema["properties"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(names, vec!["title", "status", "author"]);
    assert!(schema.get("required").is_none());
    assert_eq!(schema[COLLECTION_EXTENSION], "articles");
    assert_eq!(
        schema["properties"]["author"],
        json!({ "nullable": true, "type": "integer" })
    );
}

#[test]
fn dangling_relation_falls_back_to_field_type() {
    let snapshot = Snapshot::new(
        vec![Collection::new("articles")],
        vec![
            Field::new("articles", "id", "integer").primary_key(),
            Field::new("articles", "author", "uuid"),
        ],
        vec![Relation::many_to_one("articles", "author", "ghosts")],
    );
    let schema =
        SchemaBuilder::new(&snapshot).read_schema(snapshot.collection("articles").unwrap());
    assert_eq!(
        schema["properties"]["author"],
        json!({ "nullable": true, "type": "string", "format": "uuid" })
    );
}

#[test]
fn register_all_skips_folders() {
    let snapshot = Snapshot::new(
        vec![Collection::new("articles"), Collection::folder("content")],
        vec![Field::new("articles", "id", "integer").primary_key()],
        vec![],
    );
    let mut registry = SchemaRegistry::new();
    SchemaBuilder::new(&snapshot).register_all(&mut registry);

    assert!(registry.contains("ItemsArticles"));
    assert!(registry.contains("WriteItemsArticles"));
    assert!(!registry.contains("ItemsContent"));
    assert_eq!(registry.len(), 2);
}

#[test]
fn colliding_names_keep_both_collections() {
    let snapshot = Snapshot::new(
        vec![Collection::new("blog_posts"), Collection::new("blogPosts")],
        vec![
            Field::new("blog_posts", "id", "integer").primary_key(),
            Field::new("blogPosts", "id", "uuid").primary_key(),
        ],
        vec![],
    );
    let mut registry = SchemaRegistry::new();
    SchemaBuilder::new(&snapshot).register_all(&mut registry);

    assert_eq!(registry.len(), 4);
    assert_eq!(registry.get("ItemsBlogPosts").unwrap()[COLLECTION_EXTENSION], "blogPosts");
    assert_eq!(registry.get("ItemsBlogPosts2").unwrap()[COLLECTION_EXTENSION], "blog_posts");
    assert_eq!(
        registry.get("ItemsBlogPosts2").unwrap()["properties"]["id"]["type"],
        "integer"
    );
    assert!(registry.contains("WriteItemsBlogPosts"));
    assert!(registry.contains("WriteItemsBlogPosts2"));
}
