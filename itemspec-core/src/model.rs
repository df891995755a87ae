use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A named data container (a table, or a folder grouping other collections).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub collection: String,
    #[serde(default)]
    pub meta: Option<CollectionMeta>,
    #[serde(default)]
    pub schema: Option<CollectionSchema>,
}

impl Collection {
    /// A table-backed collection with default metadata.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            meta: Some(CollectionMeta::new(&name)),
            schema: Some(CollectionSchema { name: name.clone(), comment: None }),
            collection: name,
        }
    }

    /// A folder: grouping metadata only, no backing table.
    pub fn folder(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            meta: Some(CollectionMeta::new(&name)),
            schema: None,
            collection: name,
        }
    }

    pub fn with_singleton(mut self, singleton: bool) -> Self {
        self.meta_mut().singleton = singleton;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.meta_mut().hidden = hidden;
        self
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.meta_mut().note = Some(note.to_string());
        self
    }

    pub fn is_folder(&self) -> bool {
        self.schema.is_none()
    }

    pub fn is_singleton(&self) -> bool {
        self.meta.as_ref().is_some_and(|m| m.singleton)
    }

    pub fn is_hidden(&self) -> bool {
        self.meta.as_ref().is_some_and(|m| m.hidden)
    }

    pub fn note(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.note.as_deref())
    }

    fn meta_mut(&mut self) -> &mut CollectionMeta {
        let name = self.collection.clone();
        self.meta.get_or_insert_with(|| CollectionMeta::new(&name))
    }
}

/// Display and behavior metadata for a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionMeta {
    #[serde(default)]
    pub collection: String,
    #[serde(default)]
    pub accountability: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub singleton: bool,
    #[serde(default)]
    pub translations: Option<Value>,
    #[serde(default)]
    pub item_duplication_fields: Option<Value>,
}

impl CollectionMeta {
    fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            accountability: Some("all".into()),
            group: None,
            hidden: false,
            icon: None,
            note: None,
            singleton: false,
            translations: None,
            item_duplication_fields: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchema {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Logical type of a field.
///
/// Unrecognized type names deserialize into [`FieldType::Other`] rather than
/// failing, so a newer platform type never breaks a snapshot load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    BigInteger,
    Binary,
    Boolean,
    Csv,
    Date,
    DateTime,
    Decimal,
    Float,
    Hash,
    Integer,
    Json,
    String,
    Text,
    Time,
    Timestamp,
    Uuid,
    Alias,
    Unknown,
    Geometry(GeometryKind),
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Any,
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::BigInteger => "bigInteger",
            FieldType::Binary => "binary",
            FieldType::Boolean => "boolean",
            FieldType::Csv => "csv",
            FieldType::Date => "date",
            FieldType::DateTime => "dateTime",
            FieldType::Decimal => "decimal",
            FieldType::Float => "float",
            FieldType::Hash => "hash",
            FieldType::Integer => "integer",
            FieldType::Json => "json",
            FieldType::String => "string",
            FieldType::Text => "text",
            FieldType::Time => "time",
            FieldType::Timestamp => "timestamp",
            FieldType::Uuid => "uuid",
            FieldType::Alias => "alias",
            FieldType::Unknown => "unknown",
            FieldType::Geometry(GeometryKind::Any) => "geometry",
            FieldType::Geometry(GeometryKind::Point) => "geometry.Point",
            FieldType::Geometry(GeometryKind::LineString) => "geometry.LineString",
            FieldType::Geometry(GeometryKind::Polygon) => "geometry.Polygon",
            FieldType::Geometry(GeometryKind::MultiPoint) => "geometry.MultiPoint",
            FieldType::Geometry(GeometryKind::MultiLineString) => "geometry.MultiLineString",
            FieldType::Geometry(GeometryKind::MultiPolygon) => "geometry.MultiPolygon",
            FieldType::Other(name) => name,
        }
    }
}

impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        match name {
            "bigInteger" => FieldType::BigInteger,
            "binary" => FieldType::Binary,
            "boolean" => FieldType::Boolean,
            "csv" => FieldType::Csv,
            "date" => FieldType::Date,
            "dateTime" => FieldType::DateTime,
            "decimal" => FieldType::Decimal,
            "float" => FieldType::Float,
            "hash" => FieldType::Hash,
            "integer" => FieldType::Integer,
            "json" => FieldType::Json,
            "string" => FieldType::String,
            "text" => FieldType::Text,
            "time" => FieldType::Time,
            "timestamp" => FieldType::Timestamp,
            "uuid" => FieldType::Uuid,
            "alias" => FieldType::Alias,
            "unknown" => FieldType::Unknown,
            "geometry" => FieldType::Geometry(GeometryKind::Any),
            "geometry.Point" => FieldType::Geometry(GeometryKind::Point),
            "geometry.LineString" => FieldType::Geometry(GeometryKind::LineString),
            "geometry.Polygon" => FieldType::Geometry(GeometryKind::Polygon),
            "geometry.MultiPoint" => FieldType::Geometry(GeometryKind::MultiPoint),
            "geometry.MultiLineString" => FieldType::Geometry(GeometryKind::MultiLineString),
            "geometry.MultiPolygon" => FieldType::Geometry(GeometryKind::MultiPolygon),
            other => FieldType::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        FieldType::from(name.as_str())
    }
}

impl From<FieldType> for String {
    fn from(ty: FieldType) -> Self {
        ty.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named attribute of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub collection: String,
    pub field: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub meta: Option<FieldMeta>,
    #[serde(default)]
    pub schema: Option<FieldSchema>,
}

/// Special flag values that make the server populate a field on write.
pub const SERVER_POPULATED_SPECIALS: &[&str] =
    &["date-created", "date-updated", "user-created", "user-updated", "uuid"];

impl Field {
    /// A column-backed, nullable field.
    pub fn new(collection: &str, field: &str, field_type: impl Into<FieldType>) -> Self {
        let field_type = field_type.into();
        Self {
            collection: collection.to_string(),
            field: field.to_string(),
            meta: Some(FieldMeta::default()),
            schema: Some(FieldSchema {
                name: field.to_string(),
                table: collection.to_string(),
                data_type: field_type.as_str().to_string(),
                is_nullable: true,
                ..FieldSchema::default()
            }),
            field_type,
        }
    }

    /// A field with no backing column (relational or presentation alias).
    pub fn alias(collection: &str, field: &str) -> Self {
        Self {
            collection: collection.to_string(),
            field: field.to_string(),
            field_type: FieldType::Alias,
            meta: Some(FieldMeta::default()),
            schema: None,
        }
    }

    /// Marks the field as the collection's primary key (non-nullable, unique).
    pub fn primary_key(mut self) -> Self {
        if let Some(schema) = self.schema.as_mut() {
            schema.is_primary_key = true;
            schema.is_nullable = false;
            schema.is_unique = true;
        }
        self
    }

    pub fn auto_increment(mut self) -> Self {
        if let Some(schema) = self.schema.as_mut() {
            schema.has_auto_increment = true;
        }
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        if let Some(schema) = self.schema.as_mut() {
            schema.is_nullable = nullable;
        }
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        if let Some(schema) = self.schema.as_mut() {
            schema.default_value = Some(default);
        }
        self
    }

    pub fn with_special(mut self, special: &str) -> Self {
        let meta = self.meta.get_or_insert_with(FieldMeta::default);
        meta.special.get_or_insert_with(Vec::new).push(special.to_string());
        self
    }

    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.meta.get_or_insert_with(FieldMeta::default).readonly = readonly;
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.meta.get_or_insert_with(FieldMeta::default).required = required;
        self
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.meta.get_or_insert_with(FieldMeta::default).note = Some(note.to_string());
        self
    }

    pub fn is_alias(&self) -> bool {
        self.schema.is_none()
    }

    pub fn is_primary_key(&self) -> bool {
        self.schema.as_ref().is_some_and(|s| s.is_primary_key)
    }

    /// `None` for alias fields, which have no column to be null.
    pub fn is_nullable(&self) -> Option<bool> {
        self.schema.as_ref().map(|s| s.is_nullable)
    }

    pub fn has_default(&self) -> bool {
        self.schema
            .as_ref()
            .is_some_and(|s| s.default_value.as_ref().is_some_and(|v| !v.is_null()))
    }

    pub fn note(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.note.as_deref())
    }

    pub fn is_readonly(&self) -> bool {
        self.meta.as_ref().is_some_and(|m| m.readonly)
    }

    pub fn is_marked_required(&self) -> bool {
        self.meta.as_ref().is_some_and(|m| m.required)
    }

    pub fn has_special(&self, flag: &str) -> bool {
        self.meta
            .as_ref()
            .and_then(|m| m.special.as_ref())
            .is_some_and(|specials| specials.iter().any(|s| s == flag))
    }

    /// Whether the server fills this field in without client input.
    pub fn is_server_generated(&self) -> bool {
        let column_generated = self
            .schema
            .as_ref()
            .is_some_and(|s| s.has_auto_increment || s.is_generated);
        column_generated || SERVER_POPULATED_SPECIALS.iter().any(|s| self.has_special(s))
    }

    pub fn sort(&self) -> Option<i64> {
        self.meta.as_ref().and_then(|m| m.sort)
    }
}

/// Interface/display metadata. Only `readonly`, `required`, `special`,
/// `note` and `sort` influence generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub sort: Option<i64>,
    #[serde(default)]
    pub special: Option<Vec<String>>,
    #[serde(default)]
    pub interface: Option<String>,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub validation: Option<Value>,
    #[serde(default)]
    pub validation_message: Option<String>,
    #[serde(default)]
    pub width: Option<String>,
}

/// Database column metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub max_length: Option<i64>,
    #[serde(default)]
    pub numeric_precision: Option<i64>,
    #[serde(default)]
    pub numeric_scale: Option<i64>,
    #[serde(default)]
    pub is_nullable: bool,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub is_generated: bool,
    #[serde(default)]
    pub generation_expression: Option<String>,
    #[serde(default)]
    pub has_auto_increment: bool,
    #[serde(default)]
    pub foreign_key_table: Option<String>,
    #[serde(default)]
    pub foreign_key_column: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// A directional association: `collection.field` (the many side) points at
/// `related_collection` (the one side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub collection: String,
    pub field: String,
    #[serde(default)]
    pub related_collection: Option<String>,
    #[serde(default)]
    pub meta: Option<RelationMeta>,
}

impl Relation {
    pub fn many_to_one(collection: &str, field: &str, related: &str) -> Self {
        Self {
            collection: collection.to_string(),
            field: field.to_string(),
            related_collection: Some(related.to_string()),
            meta: Some(RelationMeta::default()),
        }
    }

    /// Exposes the reverse side of this relation as `one_field` on the related collection.
    pub fn with_one_field(mut self, one_field: &str) -> Self {
        self.meta.get_or_insert_with(RelationMeta::default).one_field = Some(one_field.to_string());
        self
    }

    /// Links this leg of a junction collection to its sibling leg.
    pub fn with_junction_field(mut self, junction_field: &str) -> Self {
        self.meta.get_or_insert_with(RelationMeta::default).junction_field =
            Some(junction_field.to_string());
        self
    }

    pub fn one_field(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.one_field.as_deref())
    }

    pub fn junction_field(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.junction_field.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationMeta {
    #[serde(default)]
    pub one_field: Option<String>,
    #[serde(default)]
    pub one_collection_field: Option<String>,
    #[serde(default)]
    pub one_allowed_collections: Option<Vec<String>>,
    #[serde(default)]
    pub junction_field: Option<String>,
    #[serde(default)]
    pub sort_field: Option<String>,
    #[serde(default)]
    pub one_deselect_action: Option<String>,
}

/// The identity a generation request is scoped by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accountability {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub admin: bool,
}

impl Accountability {
    pub fn admin() -> Self {
        Self {
            role: Some("admin".into()),
            user: None,
            admin: true,
        }
    }

    pub fn role(role: &str) -> Self {
        Self {
            role: Some(role.to_string()),
            user: None,
            admin: false,
        }
    }
}

/// Optional narrowing handed to metadata providers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataQuery {
    pub collections: Option<Vec<String>>,
}

impl MetadataQuery {
    pub fn collections<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            collections: Some(names.into_iter().map(Into::into).collect()),
        }
    }

    pub fn matches(&self, collection: &str) -> bool {
        self.collections
            .as_ref()
            .map_or(true, |names| names.iter().any(|n| n == collection))
    }
}
