use itemspec_core::{MetadataError, MetadataSource};

/// Why a document could not be generated. No partial document accompanies it.
#[derive(Debug)]
pub enum GenerateError {
    /// A metadata fetch failed; `source` names which one.
    Fetch {
        source: MetadataSource,
        error: MetadataError,
    },
    /// The accountability context cannot see any collection.
    Forbidden(String),
    /// The document could not be serialized.
    Serialize(serde_json::Error),
}

impl GenerateError {
    pub fn fetch(source: MetadataSource, error: MetadataError) -> Self {
        GenerateError::Fetch { source, error }
    }

    /// Authorization failures, whether raised by a provider or by the generator.
    pub fn is_forbidden(&self) -> bool {
        match self {
            GenerateError::Forbidden(_) => true,
            GenerateError::Fetch { error, .. } => error.is_forbidden(),
            GenerateError::Serialize(_) => false,
        }
    }
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::Fetch { source, error } => {
                write!(f, "Failed to read {source}: {error}")
            }
            GenerateError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            GenerateError::Serialize(err) => write!(f, "Serialization error: {err}"),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Fetch { error, .. } => Some(error),
            GenerateError::Serialize(err) => Some(err),
            GenerateError::Forbidden(_) => None,
        }
    }
}

impl From<serde_json::Error> for GenerateError {
    fn from(err: serde_json::Error) -> Self {
        GenerateError::Serialize(err)
    }
}
