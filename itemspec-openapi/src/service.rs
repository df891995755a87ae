use crate::builder::{build_spec, OpenApiConfig};
use crate::error::GenerateError;
use itemspec_core::{
    Accountability, CollectionsProvider, FieldsProvider, MetadataSource, RelationsProvider,
    Snapshot,
};
use serde_json::Value;

/// Generates OpenAPI documents from the metadata visible to an accountability context.
///
/// # Example
///
/// ```ignore
/// let provider = InMemoryProvider::from_json(&dump)?;
/// let service = SpecificationService::from_provider(&provider, OpenApiConfig::default());
/// let document = service.generate(&Accountability::admin()).await?;
/// ```
pub struct SpecificationService<C, F, R> {
    collections: C,
    fields: F,
    relations: R,
    config: OpenApiConfig,
}

impl<P: Clone> SpecificationService<P, P, P> {
    /// Use one value implementing all three provider traits.
    pub fn from_provider(provider: P, config: OpenApiConfig) -> Self {
        Self::new(provider.clone(), provider.clone(), provider, config)
    }
}

impl<C, F, R> SpecificationService<C, F, R> {
    pub fn new(collections: C, fields: F, relations: R, config: OpenApiConfig) -> Self {
        Self {
            collections,
            fields,
            relations,
            config,
        }
    }

    pub fn config(&self) -> &OpenApiConfig {
        &self.config
    }
}

impl<C, F, R> SpecificationService<C, F, R>
where
    C: CollectionsProvider,
    F: FieldsProvider,
    R: RelationsProvider,
{
    /// Fetch collections, fields and relations concurrently into one snapshot.
    ///
    /// The first failing fetch aborts the others.
    pub async fn snapshot(
        &self,
        accountability: &Accountability,
    ) -> Result<Snapshot, GenerateError> {
        tracing::debug!(
            role = ?accountability.role,
            admin = accountability.admin,
            "Reading schema metadata"
        );

        let (collections, fields, relations) = tokio::try_join!(
            async {
                self.collections
                    .read_collections(accountability, None)
                    .await
                    .map_err(|e| GenerateError::fetch(MetadataSource::Collections, e))
            },
            async {
                self.fields
                    .read_fields(accountability, None)
                    .await
                    .map_err(|e| GenerateError::fetch(MetadataSource::Fields, e))
            },
            async {
                self.relations
                    .read_relations(accountability, None)
                    .await
                    .map_err(|e| GenerateError::fetch(MetadataSource::Relations, e))
            },
        )?;

        Ok(Snapshot::new(collections, fields, relations))
    }

    /// Generate the full document, or fail without producing any part of it.
    pub async fn generate(&self, accountability: &Accountability) -> Result<Value, GenerateError> {
        let snapshot = match self.snapshot(accountability).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(error = %err, "OpenAPI generation failed");
                return Err(err);
            }
        };

        if snapshot.is_empty() && !accountability.admin {
            let role = accountability.role.as_deref().unwrap_or("anonymous");
            tracing::warn!(role, "Accountability context cannot see any collection");
            return Err(GenerateError::Forbidden(format!(
                "role '{role}' cannot read any collection"
            )));
        }

        let document = build_spec(&self.config, &snapshot);
        tracing::info!(
            collections = snapshot.collection_count(),
            paths = document["paths"].as_object().map_or(0, |p| p.len()),
            "Generated OpenAPI document"
        );
        Ok(document)
    }

    /// [`generate`](Self::generate), serialized as pretty-printed JSON.
    pub async fn generate_json(
        &self,
        accountability: &Accountability,
    ) -> Result<String, GenerateError> {
        let document = self.generate(accountability).await?;
        Ok(serde_json::to_string_pretty(&document)?)
    }
}
