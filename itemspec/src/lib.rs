//! itemspec: OpenAPI documents for runtime-defined collections.
//!
//! This facade crate re-exports the itemspec sub-crates through a single
//! dependency. Import everything you need with:
//!
//! ```ignore
//! use itemspec::prelude::*;
//!
//! let service = SpecificationService::from_provider(&provider, OpenApiConfig::default());
//! let document = service.generate(&Accountability::admin()).await?;
//! ```
//!
//! # Feature flags
//!
//! | Feature   | Default | Crate              |
//! |-----------|---------|--------------------|
//! | `openapi` | **yes** | `itemspec-openapi` |

pub extern crate itemspec_core;

// Re-export everything from itemspec-core at the top level for convenience.
pub use itemspec_core::*;

#[cfg(feature = "openapi")]
pub use itemspec_openapi;

pub mod prelude {
    //! Re-exports of the most commonly used types.
    pub use itemspec_core::{
        init_tracing, Accountability, Collection, CollectionsProvider, Field, FieldType,
        FieldsProvider, InMemoryProvider, MetadataError, MetadataQuery, Permissions, Relation,
        RelationsProvider, Snapshot, SpecConfig,
    };

    #[cfg(feature = "openapi")]
    pub use itemspec_openapi::{build_spec, GenerateError, OpenApiConfig, SpecificationService};
}
