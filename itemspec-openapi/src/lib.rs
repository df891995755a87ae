pub mod body;
mod builder;
mod error;
pub mod paths;
pub mod relation;
pub mod schema;
mod service;
pub mod types;

pub use body::{ComposedBody, RequestBodyComposer};
pub use builder::{build_spec, OpenApiConfig, ServerConfig, DEFAULT_SPEC_VERSION};
pub use error::GenerateError;
pub use paths::PathBuilder;
pub use relation::{RelationResolver, Resolution, SchemaMode};
pub use schema::{SchemaBuilder, SchemaNames, SchemaRegistry};
pub use service::SpecificationService;
pub use types::map_field_type;
