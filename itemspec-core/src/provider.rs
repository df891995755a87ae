use crate::error::MetadataError;
use crate::model::{Accountability, Collection, Field, MetadataQuery, Relation};
use std::future::Future;
use std::sync::Arc;

/// Source of collection definitions visible to an accountability context.
///
/// Uses RPITIT (return-position `impl Trait` in traits), so no `async-trait` is needed.
pub trait CollectionsProvider: Send + Sync {
    fn read_collections(
        &self,
        accountability: &Accountability,
        query: Option<&MetadataQuery>,
    ) -> impl Future<Output = Result<Vec<Collection>, MetadataError>> + Send;
}

/// Source of field definitions, in the provider's configured sort order.
pub trait FieldsProvider: Send + Sync {
    fn read_fields(
        &self,
        accountability: &Accountability,
        query: Option<&MetadataQuery>,
    ) -> impl Future<Output = Result<Vec<Field>, MetadataError>> + Send;
}

/// Source of relation definitions.
pub trait RelationsProvider: Send + Sync {
    fn read_relations(
        &self,
        accountability: &Accountability,
        query: Option<&MetadataQuery>,
    ) -> impl Future<Output = Result<Vec<Relation>, MetadataError>> + Send;
}

macro_rules! forward_provider {
    ($trait:ident, $method:ident, $item:ty) => {
        impl<T: $trait + ?Sized> $trait for &T {
            fn $method(
                &self,
                accountability: &Accountability,
                query: Option<&MetadataQuery>,
            ) -> impl Future<Output = Result<Vec<$item>, MetadataError>> + Send {
                (**self).$method(accountability, query)
            }
        }

        impl<T: $trait + ?Sized> $trait for Arc<T> {
            fn $method(
                &self,
                accountability: &Accountability,
                query: Option<&MetadataQuery>,
            ) -> impl Future<Output = Result<Vec<$item>, MetadataError>> + Send {
                (**self).$method(accountability, query)
            }
        }
    };
}

forward_provider!(CollectionsProvider, read_collections, Collection);
forward_provider!(FieldsProvider, read_fields, Field);
forward_provider!(RelationsProvider, read_relations, Relation);
