use std::collections::BTreeMap;
use std::path::Path;

use super::value::ConfigValue;
use super::ConfigError;

pub(crate) type Entries = BTreeMap<String, ConfigValue>;

/// Merge a YAML settings file into `entries`. An absent file contributes nothing.
pub(crate) fn read_file(path: &Path, entries: &mut Entries) -> Result<(), ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                path = %path.display(),
                "No settings file, using defaults and environment"
            );
            return Ok(());
        }
        Err(err) => return Err(ConfigError::Load(format!("{}: {err}", path.display()))),
    };
    read_str(&text, entries)
}

pub(crate) fn read_str(text: &str, entries: &mut Entries) -> Result<(), ConfigError> {
    let document: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|err| ConfigError::Load(err.to_string()))?;
    let mut path = Vec::new();
    collect(&document, &mut path, entries);
    Ok(())
}

/// Walk nested mappings, recording each leaf under its dotted path.
/// Sequences are leaves.
fn collect(node: &serde_yaml::Value, path: &mut Vec<String>, entries: &mut Entries) {
    let serde_yaml::Value::Mapping(mapping) = node else {
        if !path.is_empty() {
            entries.insert(path.join("."), ConfigValue::from(node));
        }
        return;
    };
    for (name, child) in mapping {
        let segment = match name.as_str() {
            Some(text) => text.to_owned(),
            None => serde_yaml::to_string(name)
                .map(|s| s.trim_end().to_owned())
                .unwrap_or_default(),
        };
        path.push(segment);
        collect(child, path, entries);
        path.pop();
    }
}

/// Apply `PREFIX_SECTION_NAME=value` variables as `section.name` overrides.
///
/// Only the first underscore after the prefix separates section from name,
/// so `ITEMSPEC_OPENAPI_PUBLIC_URL` lands on `openapi.public_url`.
pub(crate) fn apply_env(
    prefix: &str,
    vars: impl IntoIterator<Item = (String, String)>,
    entries: &mut Entries,
) {
    let lead = format!("{}_", prefix.to_ascii_uppercase());
    let mut applied = 0usize;
    for (name, value) in vars {
        let Some(rest) = name.strip_prefix(&lead) else {
            continue;
        };
        let key = rest.to_ascii_lowercase().replacen('_', ".", 1);
        entries.insert(key, ConfigValue::String(value));
        applied += 1;
    }
    if applied > 0 {
        tracing::debug!(applied, prefix = %lead, "Applied environment overrides");
    }
}
