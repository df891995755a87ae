pub mod config;
pub mod error;
mod layers;
pub mod memory;
pub mod model;
pub mod provider;
pub mod snapshot;

pub use config::{ConfigError, ConfigValue, SpecConfig};
pub use error::{MetadataError, MetadataSource};
pub use layers::init_tracing;
pub use memory::{InMemoryProvider, Permissions, SchemaDump};
pub use model::{
    Accountability, Collection, CollectionMeta, CollectionSchema, Field, FieldMeta, FieldSchema,
    FieldType, GeometryKind, MetadataQuery, Relation, RelationMeta,
};
pub use provider::{CollectionsProvider, FieldsProvider, RelationsProvider};
pub use snapshot::Snapshot;
