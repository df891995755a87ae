mod loader;
pub mod value;

use std::path::Path;

use loader::Entries;
pub use value::{ConfigValue, FromConfigValue};

/// Prefix of environment variables that override file settings.
pub const ENV_PREFIX: &str = "ITEMSPEC";

#[derive(Debug)]
pub enum ConfigError {
    /// No setting under this key.
    NotFound(String),
    /// The setting exists but does not convert to the requested type.
    TypeMismatch { key: String, expected: &'static str },
    /// The settings file could not be read or is not valid YAML.
    Load(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Missing setting '{key}'"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Setting '{key}' should be {expected}")
            }
            ConfigError::Load(reason) => write!(f, "Cannot load settings: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Generator settings addressed by dotted keys (`openapi.title`).
///
/// [`SpecConfig::load`] layers, later sources winning:
/// 1. the YAML file
/// 2. a `.env` file, loaded into the process environment without overwriting it
/// 3. `ITEMSPEC_*` variables, `ITEMSPEC_OPENAPI_TITLE` overriding `openapi.title`
#[derive(Debug, Clone, Default)]
pub struct SpecConfig {
    entries: Entries,
}

impl SpecConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut entries = Entries::new();
        loader::read_file(path.as_ref(), &mut entries)?;

        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                tracing::warn!(error = %err, "Ignoring unreadable .env file");
            }
        }
        loader::apply_env(ENV_PREFIX, std::env::vars(), &mut entries);

        Ok(Self { entries })
    }

    /// Settings from YAML text only; the environment is not consulted.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let mut entries = Entries::new();
        loader::read_str(yaml, &mut entries)?;
        Ok(Self { entries })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: ConfigValue) {
        self.entries.insert(key.to_owned(), value);
    }

    /// Read and convert the setting under `key`.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        match self.entries.get(key) {
            Some(value) => V::from_config_value(value, key),
            None => Err(ConfigError::NotFound(key.to_owned())),
        }
    }

    /// Absent and explicitly null settings both read as `None`.
    pub fn get_opt<V: FromConfigValue>(&self, key: &str) -> Result<Option<V>, ConfigError> {
        match self.entries.get(key) {
            None | Some(ConfigValue::Null) => Ok(None),
            Some(value) => V::from_config_value(value, key).map(Some),
        }
    }

    /// Falls back to `default` when the setting is missing or malformed.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Dotted keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
