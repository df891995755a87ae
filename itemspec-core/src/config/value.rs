use super::ConfigError;

/// A raw setting as read from YAML or the environment.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<ConfigValue>),
}

impl From<&serde_yaml::Value> for ConfigValue {
    fn from(value: &serde_yaml::Value) -> Self {
        use serde_yaml::Value as Yaml;
        match value {
            Yaml::Null => ConfigValue::Null,
            Yaml::Bool(flag) => ConfigValue::Bool(*flag),
            Yaml::Number(n) => n
                .as_i64()
                .map(ConfigValue::Integer)
                .or_else(|| n.as_f64().map(ConfigValue::Float))
                .unwrap_or_else(|| ConfigValue::String(n.to_string())),
            Yaml::String(text) => ConfigValue::String(text.clone()),
            Yaml::Sequence(items) => {
                ConfigValue::List(items.iter().map(ConfigValue::from).collect())
            }
            // Mappings are flattened by the loader; tagged values keep their debug form.
            other => ConfigValue::String(format!("{other:?}")),
        }
    }
}

impl ConfigValue {
    /// Scalars rendered as text, the form every env override arrives in.
    fn as_text(&self) -> Option<String> {
        match self {
            ConfigValue::String(text) => Some(text.clone()),
            ConfigValue::Integer(n) => Some(n.to_string()),
            ConfigValue::Float(n) => Some(n.to_string()),
            ConfigValue::Bool(flag) => Some(flag.to_string()),
            ConfigValue::Null | ConfigValue::List(_) => None,
        }
    }
}

fn wrong_type(key: &str, expected: &'static str) -> ConfigError {
    ConfigError::TypeMismatch {
        key: key.to_owned(),
        expected,
    }
}

/// Typed view of a [`ConfigValue`].
pub trait FromConfigValue: Sized {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError>;
}

impl FromConfigValue for String {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        value.as_text().ok_or_else(|| wrong_type(key, "a string"))
    }
}

impl FromConfigValue for i64 {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        if let ConfigValue::Integer(n) = value {
            return Ok(*n);
        }
        value
            .as_text()
            .and_then(|text| text.trim().parse().ok())
            .ok_or_else(|| wrong_type(key, "an integer"))
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        if let ConfigValue::Bool(flag) = value {
            return Ok(*flag);
        }
        let text = value.as_text().map(|t| t.trim().to_ascii_lowercase());
        match text.as_deref() {
            Some("true" | "yes" | "on" | "1") => Ok(true),
            Some("false" | "no" | "off" | "0") => Ok(false),
            _ => Err(wrong_type(key, "a boolean")),
        }
    }
}

impl<T: FromConfigValue> FromConfigValue for Option<T> {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        if *value == ConfigValue::Null {
            Ok(None)
        } else {
            T::from_config_value(value, key).map(Some)
        }
    }
}

/// YAML sequences, or comma-separated text for env overrides
/// (`ITEMSPEC_OPENAPI_SERVERS=https://a,https://b`).
impl<T: FromConfigValue> FromConfigValue for Vec<T> {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::Null => Ok(Vec::new()),
            ConfigValue::List(items) => items
                .iter()
                .map(|item| T::from_config_value(item, key))
                .collect(),
            ConfigValue::String(text) => text
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| T::from_config_value(&ConfigValue::String(part.to_owned()), key))
                .collect(),
            scalar => T::from_config_value(scalar, key).map(|item| vec![item]),
        }
    }
}
