use crate::paths::{shared_parameters, shared_responses, PathBuilder};
use crate::schema::{shared_schemas, SchemaBuilder, SchemaRegistry, COLLECTION_EXTENSION};
use itemspec_core::{ConfigError, Snapshot, SpecConfig};
use serde_json::{json, Map, Value};

/// Default `openapi` version: 3.0 is the line that defines `nullable`.
pub const DEFAULT_SPEC_VERSION: &str = "3.0.1";

/// A `servers` entry of the generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub url: String,
    pub description: Option<String>,
}

/// Configuration for the generated OpenAPI specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenApiConfig {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub spec_version: String,
    pub servers: Vec<ServerConfig>,
}

impl OpenApiConfig {
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            version: version.to_string(),
            description: None,
            spec_version: DEFAULT_SPEC_VERSION.to_string(),
            servers: Vec::new(),
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn with_server(mut self, url: &str, description: Option<&str>) -> Self {
        self.servers.push(ServerConfig {
            url: url.to_string(),
            description: description.map(str::to_string),
        });
        self
    }

    pub fn with_spec_version(mut self, version: &str) -> Self {
        self.spec_version = version.to_string();
        self
    }

    /// Read the `openapi.*` section of a loaded config.
    ///
    /// `openapi.title` and `openapi.version` are required. Servers come from
    /// `openapi.servers` (a list of URLs) or, failing that, `openapi.public_url`.
    pub fn from_config(config: &SpecConfig) -> Result<Self, ConfigError> {
        let title: String = config.get("openapi.title")?;
        let version: String = config.get("openapi.version")?;
        let mut openapi = Self::new(&title, &version);

        if let Some(description) = config.get_opt::<String>("openapi.description")? {
            openapi = openapi.with_description(&description);
        }
        if let Some(spec_version) = config.get_opt::<String>("openapi.spec_version")? {
            openapi = openapi.with_spec_version(&spec_version);
        }

        let mut urls: Vec<String> = config.get_opt("openapi.servers")?.unwrap_or_default();
        if urls.is_empty() {
            urls.extend(config.get_opt::<String>("openapi.public_url")?);
        }
        for url in urls {
            openapi = openapi.with_server(&url, None);
        }

        Ok(openapi)
    }
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self::new("Dynamic API Specification", "1.0.0")
    }
}

/// Build the OpenAPI document of a snapshot.
///
/// Pure: the same config and snapshot always produce the same document,
/// down to key order.
pub fn build_spec(config: &OpenApiConfig, snapshot: &Snapshot) -> Value {
    let mut registry = SchemaRegistry::new();
    SchemaBuilder::new(snapshot).register_all(&mut registry);
    for (name, schema) in shared_schemas() {
        registry.register(name, schema);
    }

    let paths = PathBuilder::new(snapshot).build_all();

    let tags: Vec<Value> = snapshot
        .collections()
        .filter(|c| !c.is_folder())
        .map(|c| {
            let mut tag = Map::new();
            tag.insert("name".into(), json!(c.collection));
            if let Some(note) = c.note() {
                tag.insert("description".into(), json!(note));
            }
            tag.insert(COLLECTION_EXTENSION.into(), json!(c.collection));
            Value::Object(tag)
        })
        .collect();

    let mut info = Map::new();
    info.insert("title".into(), json!(config.title));
    info.insert("version".into(), json!(config.version));
    if let Some(ref desc) = config.description {
        info.insert("description".into(), json!(desc));
    }

    tracing::debug!(
        schemas = registry.len(),
        paths = paths.len(),
        tags = tags.len(),
        "Assembled OpenAPI document"
    );

    let mut document = Map::new();
    document.insert("openapi".into(), json!(config.spec_version));
    document.insert("info".into(), Value::Object(info));
    if !config.servers.is_empty() {
        let servers: Vec<Value> = config
            .servers
            .iter()
            .map(|server| match &server.description {
                Some(description) => json!({ "url": server.url, "description": description }),
                None => json!({ "url": server.url }),
            })
            .collect();
        document.insert("servers".into(), Value::Array(servers));
    }
    document.insert("paths".into(), Value::Object(paths));
    document.insert(
        "components".into(),
        json!({
            "schemas": registry.into_schemas(),
            "parameters": shared_parameters(),
            "responses": shared_responses(),
        }),
    );
    document.insert("tags".into(), Value::Array(tags));
    Value::Object(document)
}
