use crate::model::{Collection, Field, Relation};
use std::collections::{BTreeMap, HashSet};

/// A point-in-time, already accountability-filtered view of the data model.
///
/// Built once per generation from the three provider fetches and never
/// mutated afterwards. Fields whose collection is not among the visible
/// collections are dropped on construction; relations are kept as-is and
/// resolved defensively by consumers.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    collections: BTreeMap<String, Collection>,
    fields: Vec<Field>,
    relations: Vec<Relation>,
}

impl Snapshot {
    pub fn new(collections: Vec<Collection>, fields: Vec<Field>, relations: Vec<Relation>) -> Self {
        let collections: BTreeMap<String, Collection> = collections
            .into_iter()
            .map(|c| (c.collection.clone(), c))
            .collect();

        let mut seen = HashSet::new();
        let mut dropped = 0usize;
        let fields: Vec<Field> = fields
            .into_iter()
            .filter(|f| {
                let keep = collections.contains_key(&f.collection)
                    && seen.insert((f.collection.clone(), f.field.clone()));
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .collect();

        if dropped > 0 {
            tracing::debug!(dropped, "Ignoring fields outside the visible collections");
        }

        Self {
            collections,
            fields,
            relations,
        }
    }

    /// Collections in ascending name order.
    pub fn collections(&self) -> impl Iterator<Item = &Collection> {
        self.collections.values()
    }

    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    pub fn contains_collection(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Fields of a collection, in the order the provider supplied them.
    pub fn fields_of<'a, 'c>(&'a self, collection: &'c str) -> impl Iterator<Item = &'a Field> + 'c
    where
        'a: 'c,
    {
        self.fields.iter().filter(move |f| f.collection == collection)
    }

    pub fn field(&self, collection: &str, field: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|f| f.collection == collection && f.field == field)
    }

    pub fn primary_key(&self, collection: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|f| f.collection == collection && f.is_primary_key())
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}
