use crate::schema::SchemaNames;
use crate::types::{base_fragment, key_schema};
use itemspec_core::{Field, Relation, Snapshot};
use serde_json::{json, Map, Value};

/// How a field participates in a relation.
///
/// Every related collection named here exists in the snapshot and has a
/// primary key, so references built from it never dangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Not relational, or the relation could not be resolved.
    None,
    /// The field stores the key of one `related` item.
    ManyToOne { related: &'a str },
    /// The field lists the `related` items pointing back at this one.
    OneToMany { related: &'a str },
    /// The field lists `related` items linked through the `junction` collection.
    ManyToMany { junction: &'a str, related: &'a str },
}

impl Resolution<'_> {
    pub fn is_relational(&self) -> bool {
        !matches!(self, Resolution::None)
    }

    pub fn related(&self) -> Option<&str> {
        match self {
            Resolution::None => None,
            Resolution::ManyToOne { related }
            | Resolution::OneToMany { related }
            | Resolution::ManyToMany { related, .. } => Some(related),
        }
    }
}

/// Which side of the API a schema describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaMode {
    /// Items as returned by the server: relations may be expanded.
    Read,
    /// Items as sent by clients: relations are given by key.
    Write,
}

/// Classifies fields against the relation set of a snapshot.
pub struct RelationResolver<'a> {
    snapshot: &'a Snapshot,
    names: SchemaNames,
}

impl<'a> RelationResolver<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            names: SchemaNames::new(snapshot),
        }
    }

    pub fn names(&self) -> &SchemaNames {
        &self.names
    }

    pub fn resolve(&self, field: &Field) -> Resolution<'a> {
        let relations: &'a [Relation] = self.snapshot.relations();

        if let Some(relation) = relations
            .iter()
            .find(|r| r.collection == field.collection && r.field == field.field)
        {
            return match relation.related_collection.as_deref() {
                Some(related) if self.is_resolvable(related) => Resolution::ManyToOne { related },
                Some(related) => self.unresolved(field, related),
                None => {
                    tracing::debug!(
                        collection = %field.collection,
                        field = %field.field,
                        "Many-to-any relation has no single target, using the raw field type"
                    );
                    Resolution::None
                }
            };
        }

        let Some(relation) = relations.iter().find(|r| {
            r.related_collection.as_deref() == Some(field.collection.as_str())
                && r.one_field() == Some(field.field.as_str())
        }) else {
            return Resolution::None;
        };

        if self.snapshot.field(&relation.collection, &relation.field).is_none() {
            return self.unresolved(field, &relation.collection);
        }

        let Some(junction_field) = relation.junction_field() else {
            return if self.is_resolvable(&relation.collection) {
                Resolution::OneToMany {
                    related: &relation.collection,
                }
            } else {
                self.unresolved(field, &relation.collection)
            };
        };

        let junction = relation.collection.as_str();
        let far = relations
            .iter()
            .find(|r| r.collection == junction && r.field == junction_field)
            .filter(|_| self.snapshot.field(junction, junction_field).is_some())
            .and_then(|r| r.related_collection.as_deref());

        match far {
            Some(related) if self.is_resolvable(related) => {
                Resolution::ManyToMany { junction, related }
            }
            Some(related) => self.unresolved(field, related),
            None => self.unresolved(field, junction),
        }
    }

    /// Render a relational property, or `None` when `resolution` is not relational.
    pub fn property(
        &self,
        field: &Field,
        resolution: &Resolution<'_>,
        mode: SchemaMode,
    ) -> Option<Map<String, Value>> {
        let related = resolution.related()?;
        let key = key_schema(self.snapshot.primary_key(related));
        let reference = json!({ "$ref": self.names.items_ref(related) });
        let mut property = base_fragment(field);

        match (resolution, mode) {
            (Resolution::ManyToOne { .. }, SchemaMode::Read) => {
                property.insert("oneOf".into(), json!([key, reference]));
            }
            (Resolution::ManyToOne { .. }, SchemaMode::Write) => {
                if let Value::Object(key) = key {
                    property.extend(key);
                }
            }
            (_, SchemaMode::Read) => {
                property.insert("type".into(), json!("array"));
                property.insert("items".into(), json!({ "oneOf": [key, reference] }));
            }
            (_, SchemaMode::Write) => {
                property.insert("type".into(), json!("array"));
                property.insert("items".into(), key);
            }
        }

        Some(property)
    }

    fn is_resolvable(&self, collection: &str) -> bool {
        self.snapshot
            .collection(collection)
            .is_some_and(|c| !c.is_folder())
            && self.snapshot.primary_key(collection).is_some()
    }

    fn unresolved(&self, field: &Field, target: &str) -> Resolution<'a> {
        tracing::warn!(
            collection = %field.collection,
            field = %field.field,
            target = %target,
            "Relation target is not part of the visible schema, using the raw field type"
        );
        Resolution::None
    }
}
