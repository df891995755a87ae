use crate::error::{MetadataError, MetadataSource};
use crate::model::{Accountability, Collection, Field, MetadataQuery, Relation};
use crate::provider::{CollectionsProvider, FieldsProvider, RelationsProvider};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::future::Future;

/// What a single role may read.
///
/// Maps a collection name to an optional field allow-list; `None` means
/// every field of the collection is readable.
#[derive(Debug, Clone, Default)]
pub struct Permissions {
    collections: HashMap<String, Option<HashSet<String>>>,
}

impl Permissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant read access to every field of a collection.
    pub fn allow(mut self, collection: &str) -> Self {
        self.collections.insert(collection.to_string(), None);
        self
    }

    /// Grant read access to the listed fields of a collection only.
    pub fn allow_fields(mut self, collection: &str, fields: &[&str]) -> Self {
        self.collections.insert(
            collection.to_string(),
            Some(fields.iter().map(|f| f.to_string()).collect()),
        );
        self
    }

    fn can_read_collection(&self, collection: &str) -> bool {
        self.collections.contains_key(collection)
    }

    fn can_read_field(&self, collection: &str, field: &str) -> bool {
        match self.collections.get(collection) {
            Some(None) => true,
            Some(Some(allowed)) => allowed.contains(field),
            None => false,
        }
    }
}

/// Serialized form of a whole schema: the three metadata lists side by side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDump {
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

/// A metadata provider backed by fixed, in-process lists.
///
/// Applies the same scoping a real provider would: admins see everything,
/// other roles see what their [`Permissions`] grant, and roles registered
/// with [`deny_role`](Self::deny_role) are refused outright.
///
/// # Example
///
/// ```ignore
/// let provider = InMemoryProvider::new()
///     .with_collection(Collection::new("articles"))
///     .with_field(Field::new("articles", "id", "integer").primary_key())
///     .with_permissions("editor", Permissions::new().allow("articles"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    collections: Vec<Collection>,
    fields: Vec<Field>,
    relations: Vec<Relation>,
    roles: HashMap<String, Permissions>,
    denied_roles: HashSet<String>,
    failures: HashMap<MetadataSource, String>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dump(dump: SchemaDump) -> Self {
        Self {
            collections: dump.collections,
            fields: dump.fields,
            relations: dump.relations,
            ..Self::default()
        }
    }

    /// Load a provider from a JSON [`SchemaDump`].
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        let dump: SchemaDump = serde_json::from_str(json)?;
        Ok(Self::from_dump(dump))
    }

    pub fn with_collection(mut self, collection: Collection) -> Self {
        self.collections.push(collection);
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    pub fn with_permissions(mut self, role: &str, permissions: Permissions) -> Self {
        self.roles.insert(role.to_string(), permissions);
        self
    }

    /// Refuse every fetch made on behalf of `role`.
    pub fn deny_role(mut self, role: &str) -> Self {
        self.denied_roles.insert(role.to_string());
        self
    }

    /// Make one fetch fail with a storage error.
    pub fn failing(mut self, source: MetadataSource, message: &str) -> Self {
        self.failures.insert(source, message.to_string());
        self
    }

    fn check(
        &self,
        source: MetadataSource,
        accountability: &Accountability,
    ) -> Result<(), MetadataError> {
        if let Some(message) = self.failures.get(&source) {
            return Err(MetadataError::storage(std::io::Error::other(message.clone())));
        }
        if accountability.admin {
            return Ok(());
        }
        match accountability.role.as_deref() {
            Some(role) if self.denied_roles.contains(role) => Err(MetadataError::Forbidden(format!(
                "role '{role}' may not read {source}"
            ))),
            None => Err(MetadataError::Forbidden(format!(
                "anonymous access to {source} is not allowed"
            ))),
            Some(_) => Ok(()),
        }
    }

    fn permissions(&self, accountability: &Accountability) -> Option<&Permissions> {
        accountability.role.as_deref().and_then(|r| self.roles.get(r))
    }

    fn collection_visible(&self, accountability: &Accountability, collection: &str) -> bool {
        accountability.admin
            || self
                .permissions(accountability)
                .is_some_and(|p| p.can_read_collection(collection))
    }

    fn field_visible(&self, accountability: &Accountability, field: &Field) -> bool {
        accountability.admin
            || self
                .permissions(accountability)
                .is_some_and(|p| p.can_read_field(&field.collection, &field.field))
    }

    fn visible_collections(
        &self,
        accountability: &Accountability,
        query: Option<&MetadataQuery>,
    ) -> Result<Vec<Collection>, MetadataError> {
        self.check(MetadataSource::Collections, accountability)?;
        Ok(self
            .collections
            .iter()
            .filter(|c| query.map_or(true, |q| q.matches(&c.collection)))
            .filter(|c| self.collection_visible(accountability, &c.collection))
            .cloned()
            .collect())
    }

    fn visible_fields(
        &self,
        accountability: &Accountability,
        query: Option<&MetadataQuery>,
    ) -> Result<Vec<Field>, MetadataError> {
        self.check(MetadataSource::Fields, accountability)?;
        let mut fields: Vec<Field> = self
            .fields
            .iter()
            .filter(|f| query.map_or(true, |q| q.matches(&f.collection)))
            .filter(|f| self.field_visible(accountability, f))
            .cloned()
            .collect();
        // Stable: fields without a sort value keep insertion order, after sorted ones.
        fields.sort_by_key(|f| (f.collection.clone(), f.sort().is_none(), f.sort()));
        Ok(fields)
    }

    fn visible_relations(
        &self,
        accountability: &Accountability,
        query: Option<&MetadataQuery>,
    ) -> Result<Vec<Relation>, MetadataError> {
        self.check(MetadataSource::Relations, accountability)?;
        Ok(self
            .relations
            .iter()
            .filter(|r| {
                query.map_or(true, |q| {
                    q.matches(&r.collection)
                        || r.related_collection.as_deref().is_some_and(|c| q.matches(c))
                })
            })
            .filter(|r| {
                self.collection_visible(accountability, &r.collection)
                    || r
                        .related_collection
                        .as_deref()
                        .is_some_and(|c| self.collection_visible(accountability, c))
            })
            .cloned()
            .collect())
    }
}

impl CollectionsProvider for InMemoryProvider {
    fn read_collections(
        &self,
        accountability: &Accountability,
        query: Option<&MetadataQuery>,
    ) -> impl Future<Output = Result<Vec<Collection>, MetadataError>> + Send {
        let result = self.visible_collections(accountability, query);
        async move { result }
    }
}

impl FieldsProvider for InMemoryProvider {
    fn read_fields(
        &self,
        accountability: &Accountability,
        query: Option<&MetadataQuery>,
    ) -> impl Future<Output = Result<Vec<Field>, MetadataError>> + Send {
        let result = self.visible_fields(accountability, query);
        async move { result }
    }
}

impl RelationsProvider for InMemoryProvider {
    fn read_relations(
        &self,
        accountability: &Accountability,
        query: Option<&MetadataQuery>,
    ) -> impl Future<Output = Result<Vec<Relation>, MetadataError>> + Send {
        let result = self.visible_relations(accountability, query);
        async move { result }
    }
}
